//! a trait for things that can serve font tables

use types::Tag;

use crate::{Cursor, FontData, ReadError};

/// An interface for locating tables in a font (or font-like object)
pub trait TableProvider<'a> {
    /// The complete font data that table offsets are relative to.
    fn data(&self) -> FontData<'a>;

    /// The absolute offset of the table with this tag, if present.
    fn table_offset(&self, tag: Tag) -> Option<u32>;

    fn expect_table_offset(&self, tag: Tag) -> Result<u32, ReadError> {
        self.table_offset(tag).ok_or(ReadError::TableIsMissing(tag))
    }

    /// Move `cursor` to the start of the table with this tag.
    ///
    /// Returns the table's offset, which is the base for any offsets stored
    /// inside the table.
    fn seek_table(&self, cursor: &mut Cursor<'a>, tag: Tag) -> Result<u32, ReadError> {
        let offset = self.expect_table_offset(tag)?;
        cursor.seek(offset as usize);
        Ok(offset)
    }
}
