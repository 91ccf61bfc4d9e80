//! The [table directory] at the start of every sfnt font
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

use std::collections::HashMap;

use types::Tag;

use crate::{FontData, FontRead, ReadError, TableProvider};

/// One entry of the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableRecord {
    /// Table identifier.
    pub tag: Tag,
    /// Checksum for the table; never verified.
    pub checksum: u32,
    /// Offset from the beginning of the font data.
    pub offset: u32,
    /// Length of the table, in bytes.
    pub length: u32,
}

/// The table directory: the sfnt version and one record per table.
#[derive(Clone, Debug)]
pub struct TableDirectory {
    sfnt_version: u32,
    table_records: Vec<TableRecord>,
}

impl TableDirectory {
    /// The scaler type, `0x00010000` for TrueType outlines.
    ///
    /// This is not validated.
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn table_records(&self) -> &[TableRecord] {
        &self.table_records
    }
}

impl<'a> FontRead<'a> for TableDirectory {
    fn read(cursor: &mut crate::Cursor<'a>) -> Result<Self, ReadError> {
        let sfnt_version = cursor.read::<u32>()?;
        let num_tables = cursor.read::<u16>()?;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let mut table_records = Vec::with_capacity(num_tables as usize);
        for _ in 0..num_tables {
            let tag = cursor.read_tag()?;
            let checksum = cursor.read::<u32>()?;
            let offset = cursor.read::<u32>()?;
            let length = cursor.read::<u32>()?;
            if table_records.iter().any(|rec: &TableRecord| rec.tag == tag) {
                return Err(ReadError::DuplicateTable(tag));
            }
            table_records.push(TableRecord {
                tag,
                checksum,
                offset,
                length,
            });
        }
        Ok(Self {
            sfnt_version,
            table_records,
        })
    }
}

/// Reference to an in-memory font.
///
/// Holds the borrowed font bytes and the tag to offset map built from the
/// table directory. This is a simple implementation of the [`TableProvider`]
/// trait.
#[derive(Clone, Debug)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    table_directory: TableDirectory,
    offsets: HashMap<Tag, u32>,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must begin with a table directory. Tables are not checked
    /// for presence here; see [`TableProvider::expect_table_offset`].
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let table_directory = TableDirectory::read(&mut data.cursor())?;
        let offsets = table_directory
            .table_records()
            .iter()
            .map(|record| (record.tag, record.offset))
            .collect();
        Ok(Self {
            data,
            table_directory,
            offsets,
        })
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory {
        &self.table_directory
    }

    /// The scaler type read from the start of the font.
    pub fn sfnt_version(&self) -> u32 {
        self.table_directory.sfnt_version()
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data(&self) -> FontData<'a> {
        self.data
    }

    fn table_offset(&self, tag: Tag) -> Option<u32> {
        self.offsets.get(&tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::{be_buffer, FontBuilder};
    use types::TT_SFNT_VERSION;

    #[test]
    fn directory_maps_tags_to_offsets() {
        let font = FontBuilder::new()
            .add_table(Tag::new(b"maxp"), &[0u8; 6][..])
            .add_table(Tag::new(b"head"), &[0u8; 54][..])
            .build();
        let font = FontRef::new(&font).unwrap();
        assert_eq!(font.sfnt_version(), TT_SFNT_VERSION);
        assert_eq!(font.table_directory().table_records().len(), 2);
        // the builder sorts records by tag and lays tables out in that order
        let header_len = 12 + 2 * 16;
        assert_eq!(font.table_offset(Tag::new(b"head")), Some(header_len));
        assert_eq!(font.table_offset(Tag::new(b"maxp")), Some(header_len + 56));
        assert_eq!(font.table_offset(Tag::new(b"glyf")), None);
    }

    #[test]
    fn missing_table_is_an_error() {
        let font = FontBuilder::new()
            .add_table(Tag::new(b"head"), &[0u8; 54][..])
            .build();
        let font = FontRef::new(&font).unwrap();
        assert_eq!(
            font.expect_table_offset(Tag::new(b"cmap")),
            Err(ReadError::TableIsMissing(Tag::new(b"cmap")))
        );
    }

    #[test]
    fn duplicate_tags() {
        let buf = be_buffer! {
            0x00010000_u32, 2_u16, 0_u16, 0_u16, 0_u16,
            Tag::new(b"head"), 0_u32, 44_u32, 0_u32,
            Tag::new(b"head"), 0_u32, 44_u32, 0_u32
        };
        assert!(matches!(
            FontRef::new(&buf),
            Err(ReadError::DuplicateTable(tag)) if tag == Tag::new(b"head")
        ));
    }

    #[test]
    fn truncated_directory() {
        let buf = be_buffer! {
            0x00010000_u32, 3_u16, 0_u16, 0_u16, 0_u16,
            Tag::new(b"head"), 0_u32, 44_u32, 0_u32
        };
        assert!(matches!(FontRef::new(&buf), Err(ReadError::OutOfBounds)));
    }
}
