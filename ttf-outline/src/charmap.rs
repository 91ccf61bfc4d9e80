//! Mapping of characters (codepoints, not graphemes) to glyph identifiers.

use std::collections::HashMap;

use ttf_read::{tables::cmap::Cmap, types::GlyphId, Cursor, ReadError};

use crate::FontOptions;

/// Mapping of codepoints to glyph identifiers, collected from every
/// Unicode format 4 subtable in the font.
///
/// When subtables overlap, the last one read wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Charmap {
    mappings: HashMap<u32, GlyphId>,
}

impl Charmap {
    /// Decodes the subtables listed in `cmap`.
    ///
    /// Subtables in other formats are skipped with a warning unless
    /// [`FontOptions::strict_cmap`] is set, in which case their format is
    /// returned as an error.
    pub fn new(cmap: &Cmap, cursor: &mut Cursor, options: &FontOptions) -> Result<Self, ReadError> {
        let mut mappings = HashMap::new();
        for record in cmap.encoding_records() {
            if !record.is_unicode_mapping() {
                log::debug!(
                    "skipping cmap subtable ({}, {})",
                    record.platform_id,
                    record.encoding_id
                );
                continue;
            }
            let subtable = match cmap.read_subtable(cursor, record) {
                Ok(subtable) => subtable,
                Err(ReadError::InvalidFormat(format)) if !options.strict_cmap => {
                    log::warn!(
                        "skipping unsupported format {format} cmap subtable ({}, {})",
                        record.platform_id,
                        record.encoding_id
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };
            let decoded = subtable.mappings(options.segment_end, options.range_offset_base)?;
            log::debug!(
                "read {} mappings from cmap subtable ({}, {})",
                decoded.len(),
                record.platform_id,
                record.encoding_id
            );
            mappings.extend(decoded);
        }
        Ok(Self { mappings })
    }

    /// Maps a character to a glyph identifier.
    ///
    /// Returns `None` if a mapping does not exist.
    pub fn map(&self, ch: impl Into<u32>) -> Option<GlyphId> {
        self.mappings.get(&ch.into()).copied()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// All mappings, ordered by codepoint.
    pub fn mappings(&self) -> Vec<(u32, GlyphId)> {
        let mut result = self
            .mappings
            .iter()
            .map(|(cp, gid)| (*cp, *gid))
            .collect::<Vec<_>>();
        result.sort_unstable();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RangeOffsetBase;
    use ttf_read::{FontData, FontRead};
    use ttf_test_data::{be_buffer, tables, tables::Cmap4Segment};

    fn charmap(cmap_data: &[u8], strict: bool) -> Result<Charmap, ReadError> {
        let options = FontOptions {
            strict_cmap: strict,
            range_offset_base: RangeOffsetBase::Slot,
            ..Default::default()
        };
        let mut cursor = FontData::new(cmap_data).cursor();
        let cmap = Cmap::read(&mut cursor)?;
        Charmap::new(&cmap, &mut cursor, &options)
    }

    fn format12() -> Vec<u8> {
        be_buffer! { 12_u16, 0_u16, 28_u32, 0_u32, 1_u32, 0x1F600_u32, 0x1F601_u32, 5_u32 }.into()
    }

    #[test]
    fn later_subtables_overwrite() {
        let first = tables::cmap4(&[Cmap4Segment::delta(65, 68, 0)]);
        let second = tables::cmap4(&[Cmap4Segment::delta(66, 67, 10)]);
        let buf = tables::cmap(&[(0, 3, first.into()), (0, 4, second.into())]);
        let charmap = charmap(&buf, false).unwrap();
        assert_eq!(charmap.len(), 3);
        assert_eq!(charmap.map(65u32), Some(GlyphId::new(65)));
        assert_eq!(charmap.map('B'), Some(GlyphId::new(76)));
        assert_eq!(charmap.map('D'), None);
        assert_eq!(
            charmap.mappings(),
            vec![
                (65, GlyphId::new(65)),
                (66, GlyphId::new(76)),
                (67, GlyphId::new(67))
            ]
        );
    }

    #[test]
    fn non_unicode_subtables_are_ignored() {
        let subtable = tables::cmap4(&[Cmap4Segment::delta(65, 68, 0)]);
        let buf = tables::cmap(&[(3, 1, subtable.clone().into()), (0, 14, subtable.into())]);
        assert!(charmap(&buf, false).unwrap().is_empty());
    }

    #[test]
    fn unsupported_format_policy() {
        let _ = env_logger::builder().is_test(true).try_init();
        let subtable = tables::cmap4(&[Cmap4Segment::delta(65, 68, 0)]);
        let buf = tables::cmap(&[(0, 4, format12()), (0, 3, subtable.into())]);
        assert_eq!(charmap(&buf, false).unwrap().len(), 3);
        assert_eq!(charmap(&buf, true), Err(ReadError::InvalidFormat(12)));
    }
}
