//! Assembling tables into a complete font

use std::collections::BTreeMap;

use ttf_types::{Tag, TT_SFNT_VERSION};

use crate::BeBuffer;

const TABLE_RECORD_LEN: usize = 16;
const HEADER_LEN: usize = 12;

/// Builds a font file from raw table data.
///
/// Table records are written sorted by tag, and the tables are laid out in
/// the same order, each padded to a four byte boundary.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl FontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any existing table with the same tag.
    pub fn add_table(mut self, tag: Tag, data: impl Into<Vec<u8>>) -> Self {
        self.tables.insert(tag, data.into());
        self
    }

    pub fn remove_table(mut self, tag: Tag) -> Self {
        self.tables.remove(&tag);
        self
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    pub fn build(self) -> Vec<u8> {
        let num_tables = self.tables.len() as u16;
        let entry_selector = (num_tables.max(1)).ilog2() as u16;
        let search_range = (1u16 << entry_selector) * 16;
        let range_shift = (num_tables * 16).saturating_sub(search_range);

        let mut header = BeBuffer::new()
            .push(TT_SFNT_VERSION)
            .push(num_tables)
            .push(search_range)
            .push(entry_selector)
            .push(range_shift);
        let mut offset = HEADER_LEN + self.tables.len() * TABLE_RECORD_LEN;
        for (tag, data) in &self.tables {
            header = header
                .push(*tag)
                .push(checksum(data))
                .push(offset as u32)
                .push(data.len() as u32);
            offset += padded_len(data.len());
        }

        let mut result: Vec<u8> = header.into();
        for data in self.tables.values() {
            result.extend_from_slice(data);
            result.resize(result.len() + padded_len(data.len()) - data.len(), 0);
        }
        result
    }
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(data: &[u8]) -> u32 {
    data.chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        })
        .fold(0u32, u32::wrapping_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let font = FontBuilder::new()
            .add_table(Tag::new(b"maxp"), vec![1, 2, 3, 4, 5, 6])
            .add_table(Tag::new(b"cmap"), vec![9; 4])
            .build();
        // header, two records, 4 bytes cmap, 8 bytes padded maxp
        assert_eq!(font.len(), 12 + 32 + 4 + 8);
        assert_eq!(&font[12..16], b"cmap");
        assert_eq!(&font[28..32], b"maxp");
        assert_eq!(&font[44..48], &[9; 4]);
        assert_eq!(&font[48..56], &[1, 2, 3, 4, 5, 6, 0, 0]);
    }

    #[test]
    fn checksums() {
        assert_eq!(checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
        assert_eq!(checksum(&[1]), 0x0100_0000);
    }
}
