//! Static font-metric table for the built-in PDF font used in exports.
//!
//! Widths are in em units (relative to font size), taken from the standard
//! Helvetica AFM. The table covers ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Layout parameters for an exported page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub font_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub line_spacing: f32,
}

const MM_PER_PT: f32 = 25.4 / 72.0;

impl PageConfig {
    /// Usable text width in em units at the configured font size.
    pub fn text_width_em(&self) -> f32 {
        let width_mm = self.page_width_mm - 2.0 * self.margin_mm;
        width_mm / (self.font_size_pt * MM_PER_PT)
    }

    /// Vertical advance per line in millimetres.
    pub fn line_height_mm(&self) -> f32 {
        self.font_size_pt * self.line_spacing * MM_PER_PT
    }

    /// Number of text lines that fit between the top and bottom margins.
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height_mm - 2.0 * self.margin_mm;
        ((usable / self.line_height_mm()).floor() as usize).max(1)
    }
}

/// A4 portrait, 15 mm margins, Helvetica 11pt.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 15.0,
        font_size_pt: 11.0,
        line_spacing: 1.25,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for characters outside the table.
    pub average_char_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Characters outside printable ASCII fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            self.average_char_width
        }
    }
}

#[rustfmt::skip]
static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        // sp     !      "      #      $      %      &      '
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191,
        // (      )      *      +      ,      -      .      /
        0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0-9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A-Z
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500,
        0.667, 0.556, 0.833, 0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611,
        0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a-z
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222,
        0.500, 0.222, 0.833, 0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278,
        0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
};

pub fn helvetica() -> &'static FontMetricTable {
    &HELVETICA
}
