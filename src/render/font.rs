use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use imageproc::drawing::text_size;
use thiserror::Error;

use crate::card::FontFace;
use crate::fit::{GlyphMetrics, TextExtent};

#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font data: {0}")]
    Invalid(#[from] ab_glyph::InvalidFont),
    #[error("font has no glyph for '{0}' (U+{1:04X})")]
    MissingGlyph(char, u32),
}

/// OpenType/TrueType font used to measure and draw card text.
pub struct CardFont {
    font: FontVec,
}

impl CardFont {
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let font = FontVec::try_from_vec(data)?;
        Ok(Self { font })
    }

    pub fn font(&self) -> &FontVec {
        &self.font
    }

    pub fn scale(font_size: u32) -> PxScale {
        PxScale::from(font_size as f32)
    }

    /// Height of one line (ascent to descent) at `font_size`, in whole pixels.
    pub fn line_height(&self, font_size: u32) -> u32 {
        self.font.as_scaled(Self::scale(font_size)).height().ceil().max(0.0) as u32
    }

    fn check_glyphs(&self, text: &str) -> Result<(), FontError> {
        match text
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .find(|ch| self.font.glyph_id(*ch).0 == 0)
        {
            Some(ch) => Err(FontError::MissingGlyph(ch, ch as u32)),
            None => Ok(()),
        }
    }
}

impl GlyphMetrics for CardFont {
    type Error = FontError;

    fn measure(&self, text: &str, font_size: u32) -> Result<TextExtent, FontError> {
        self.check_glyphs(text)?;
        let (width, _) = text_size(Self::scale(font_size), &self.font, text);
        Ok(TextExtent::new(width, self.line_height(font_size)))
    }
}

/// Fonts for every face on the card. Faces without their own font use the text font.
pub struct FontSet {
    text: CardFont,
    faces: BTreeMap<FontFace, CardFont>,
}

impl FontSet {
    pub fn new(text: CardFont) -> Self {
        Self {
            text,
            faces: BTreeMap::new(),
        }
    }

    pub fn with_face(mut self, face: FontFace, font: CardFont) -> Self {
        if face == FontFace::Text {
            self.text = font;
        } else {
            self.faces.insert(face, font);
        }
        self
    }

    pub fn text(&self) -> &CardFont {
        &self.text
    }

    pub fn face(&self, face: FontFace) -> &CardFont {
        self.faces.get(&face).unwrap_or(&self.text)
    }
}
