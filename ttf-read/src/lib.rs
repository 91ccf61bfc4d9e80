//! Reading TrueType tables
//!
//! This crate provides memory safe parsing of the subset of a TrueType font
//! needed to turn text into glyph outlines: the table directory, `head`,
//! `maxp`, `loca`, `hhea`, `hmtx`, `cmap` (format 4) and simple glyphs from
//! `glyf`.
//!
//! All reads go through a [`Cursor`] over borrowed [`FontData`], which
//! decodes big-endian scalars and fails with [`ReadError::OutOfBounds`]
//! instead of reading past the end of the buffer.
//!
//! For the assembled font model (character mapping, advance widths and
//! reconstructed outlines) see the `ttf-outline` crate.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use ttf_read::{tables::head::{self, Head}, FontRead, FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let mut cursor = font.data().cursor();
//! font.seek_table(&mut cursor, head::TAG).expect("missing 'head' table");
//! let head = Head::read(&mut cursor).unwrap();
//! println!("{} units per em", head.units_per_em);
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod read;
mod table_directory;
mod table_provider;
pub mod tables;

pub use font_data::{Cursor, FontData};
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use table_directory::{FontRef, TableDirectory, TableRecord};
pub use table_provider::TableProvider;

/// Public re-export of the ttf-types crate.
pub extern crate ttf_types as types;

pub use types::{GlyphId, Scalar, Tag};
