//! The font model: everything needed to turn text into outlines.

use std::{collections::HashMap, sync::Arc};

use ttf_read::{
    tables::{
        cmap::{self, Cmap},
        glyf::{self, Glyph},
        head::{self, Head},
        hhea::{self, Hhea},
        hmtx::{self, Hmtx},
        loca::{self, Loca, LocaArgs},
        maxp::{self, Maxp},
    },
    types::{GlyphId, UfWord},
    FontData, FontRead, FontReadWithArgs, FontRef, ReadError, TableDirectory, TableProvider,
};

use crate::{Charmap, FallbackAdvance, FontOptions, GlyphOutline, Outline, OutlineError};

/// The advance of the space character, in ems, whatever the font says.
const SPACE_ADVANCE: f32 = 0.5;

/// A loaded font.
///
/// All tables are read when the font is created; glyph records are decoded
/// on request. Outlines decoded through [`outline_at`](Self::outline_at)
/// (and the lookups built on it) are kept, keyed by their offset, unless
/// [`FontOptions::memoize`] is off. The cache needs `&mut self`, so sharing
/// a font between threads requires external synchronization.
#[derive(Clone, Debug)]
pub struct Font<'a> {
    font: FontRef<'a>,
    options: FontOptions,
    units_per_em: u16,
    loca: Loca,
    hmtx: Hmtx,
    charmap: Charmap,
    notdef_offset: u32,
    cache: HashMap<u32, Outline>,
}

impl<'a> Font<'a> {
    /// Loads a font with the default options.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Self::with_options(data, FontOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: FontOptions) -> Result<Self, ReadError> {
        let font = FontRef::new(data)?;
        log::debug!(
            "read {} table records",
            font.table_directory().table_records().len()
        );
        let mut cursor = font.data().cursor();

        font.seek_table(&mut cursor, head::TAG)?;
        let head = Head::read(&mut cursor)?;
        log::debug!(
            "head: unitsPerEm {}, long loca {}",
            head.units_per_em,
            head.is_long_loca()
        );

        font.seek_table(&mut cursor, maxp::TAG)?;
        let num_glyphs = Maxp::read(&mut cursor)?.num_glyphs;
        if num_glyphs == 0 {
            return Err(ReadError::MalformedData("font has no glyphs"));
        }

        let glyf_offset = font.expect_table_offset(glyf::TAG)?;
        font.seek_table(&mut cursor, loca::TAG)?;
        let loca = Loca::read_with_args(
            &mut cursor,
            &LocaArgs {
                is_long: head.is_long_loca(),
                num_glyphs,
                glyf_offset,
            },
        )?;
        log::debug!("loca: {} glyphs", loca.len());

        font.seek_table(&mut cursor, hhea::TAG)?;
        let hhea = Hhea::read(&mut cursor)?;
        font.seek_table(&mut cursor, hmtx::TAG)?;
        let hmtx = Hmtx::read_with_args(&mut cursor, &(hhea.number_of_h_metrics, num_glyphs))?;
        log::debug!("hmtx: {} explicit advances", hhea.number_of_h_metrics);

        font.seek_table(&mut cursor, cmap::TAG)?;
        let cmap = Cmap::read(&mut cursor)?;
        let charmap = Charmap::new(&cmap, &mut cursor, &options)?;
        log::debug!("cmap: {} mappings", charmap.len());

        let notdef_offset = loca
            .get(GlyphId::NOTDEF)
            .ok_or(ReadError::MalformedData("glyph 0 has no location"))?;
        Ok(Self {
            font,
            options,
            units_per_em: head.units_per_em,
            loca,
            hmtx,
            charmap,
            notdef_offset,
            cache: HashMap::new(),
        })
    }

    pub fn data(&self) -> FontData<'a> {
        self.font.data()
    }

    pub fn table_directory(&self) -> &TableDirectory {
        self.font.table_directory()
    }

    pub fn options(&self) -> &FontOptions {
        &self.options
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    pub fn glyph_count(&self) -> u16 {
        self.loca.len() as u16
    }

    pub fn charmap(&self) -> &Charmap {
        &self.charmap
    }

    pub fn loca(&self) -> &Loca {
        &self.loca
    }

    /// The glyph for a character, or glyph 0 if it is not mapped.
    pub fn glyph_index(&self, ch: impl Into<u32>) -> GlyphId {
        self.charmap.map(ch).unwrap_or(GlyphId::NOTDEF)
    }

    /// The absolute offset of a glyph's record.
    pub fn glyph_offset(&self, gid: GlyphId) -> Result<u32, OutlineError> {
        self.loca.get(gid).ok_or(OutlineError::GlyphNotFound(gid))
    }

    /// The absolute offset of the record for a character's glyph.
    ///
    /// Characters without a glyph resolve to glyph 0.
    pub fn find_glyph_offset(&self, ch: impl Into<u32>) -> u32 {
        self.loca
            .get(self.glyph_index(ch))
            .unwrap_or(self.notdef_offset)
    }

    /// The outline for a character, or for glyph 0 if it is not mapped.
    pub fn outline_for_char(&mut self, ch: impl Into<u32>) -> Result<Outline, OutlineError> {
        self.outline_for_glyph(self.glyph_index(ch))
    }

    /// The outline for a glyph.
    ///
    /// Glyphs whose record is empty have an empty outline.
    pub fn outline_for_glyph(&mut self, gid: GlyphId) -> Result<Outline, OutlineError> {
        let offset = self.glyph_offset(gid)?;
        if self.loca.is_empty_glyph(gid) {
            return Ok(Outline::Simple(Arc::default()));
        }
        self.outline_at(offset)
    }

    /// The outline for the glyph record at `offset`, from the cache if it
    /// has been decoded before.
    pub fn outline_at(&mut self, offset: u32) -> Result<Outline, OutlineError> {
        if let Some(outline) = self.cache.get(&offset) {
            log::debug!("outline cache hit at {offset}");
            return Ok(outline.clone());
        }
        let outline = self.decode_outline(offset)?;
        if self.options.memoize {
            self.cache.insert(offset, outline.clone());
        }
        Ok(outline)
    }

    /// Decode the glyph record at `offset` without touching the cache.
    pub fn decode_outline(&self, offset: u32) -> Result<Outline, OutlineError> {
        match self.read_glyph(offset)? {
            Glyph::Simple(glyph) => self
                .build_outline(&glyph)
                .map(|outline| Outline::Simple(Arc::new(outline))),
            Glyph::Composite(_) => {
                log::warn!("composite glyph at {offset} is drawn as glyph 0");
                Ok(Outline::CompositeFallback {
                    glyph_offset: offset,
                    notdef: Arc::new(self.notdef_outline()?),
                })
            }
        }
    }

    fn notdef_outline(&self) -> Result<GlyphOutline, OutlineError> {
        if self.loca.is_empty_glyph(GlyphId::NOTDEF) {
            return Ok(GlyphOutline::default());
        }
        match self.read_glyph(self.notdef_offset)? {
            Glyph::Simple(glyph) => self.build_outline(&glyph),
            Glyph::Composite(_) => Err(OutlineError::CompositeNotdef),
        }
    }

    fn read_glyph(&self, offset: u32) -> Result<Glyph, ReadError> {
        let mut cursor = self.font.data().cursor();
        cursor.seek(offset as usize);
        Glyph::read(&mut cursor)
    }

    fn build_outline(&self, glyph: &glyf::SimpleGlyph) -> Result<GlyphOutline, OutlineError> {
        self.options.coordinate_policy.check(glyph)?;
        Ok(GlyphOutline::from_simple_glyph(glyph, self.units_per_em))
    }

    /// Drop every memoized outline.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cached_outline_count(&self) -> usize {
        self.cache.len()
    }

    /// The advance width of a glyph, in font units.
    pub fn advance_width(&self, gid: GlyphId) -> Option<UfWord> {
        self.hmtx.advance(gid)
    }

    /// The total advance of `text` in ems.
    ///
    /// Spaces always advance half an em. Characters are not shaped or
    /// kerned.
    pub fn string_advance_width(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.char_advance(ch)).sum()
    }

    fn char_advance(&self, ch: char) -> f32 {
        if ch == ' ' {
            return SPACE_ADVANCE;
        }
        if let Some(advance) = self.charmap.map(ch).and_then(|gid| self.advance_width(gid)) {
            return advance.to_em(self.units_per_em);
        }
        match self.options.fallback_advance {
            FallbackAdvance::NotdefWidth => self
                .advance_width(GlyphId::NOTDEF)
                .map(|advance| advance.to_em(self.units_per_em))
                .unwrap_or_default(),
            FallbackAdvance::EmFraction(fraction) => fraction,
        }
    }
}
