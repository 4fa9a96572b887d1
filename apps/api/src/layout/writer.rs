//! Plain-text → PDF export.
//!
//! Single font, single size, linear layout: text is wrapped to the page width
//! and a new page starts whenever the current one is full.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use crate::layout::font_metrics::{default_page_config, helvetica, FontMetricTable, PageConfig};

#[derive(Debug, Error)]
#[error("PDF rendering failed: {0}")]
pub struct PdfWriteError(String);

impl From<printpdf::Error> for PdfWriteError {
    fn from(e: printpdf::Error) -> Self {
        PdfWriteError(e.to_string())
    }
}

/// Renders `text` with the default page config.
pub fn render_text_pdf(text: &str) -> Result<Vec<u8>, PdfWriteError> {
    render_with_config(text, &default_page_config())
}

pub fn render_with_config(text: &str, config: &PageConfig) -> Result<Vec<u8>, PdfWriteError> {
    let lines = wrap_text(&to_win_ansi(text), helvetica(), config.text_width_em());
    let per_page = config.lines_per_page();

    let width = Mm(config.page_width_mm);
    let height = Mm(config.page_height_mm);
    let (doc, first_page, first_layer) =
        PdfDocument::new("Rewritten Resume", width, height, "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let top = config.page_height_mm - config.margin_mm - config.line_height_mm();
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    for (i, line) in lines.iter().enumerate() {
        let slot = i % per_page;
        if slot == 0 && i > 0 {
            let (page, page_layer) = doc.add_page(width, height, "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
        }
        if line.is_empty() {
            continue;
        }
        let y = top - slot as f32 * config.line_height_mm();
        layer.use_text(
            line.as_str(),
            config.font_size_pt,
            Mm(config.margin_mm),
            Mm(y),
            &font,
        );
    }

    Ok(doc.save_to_bytes()?)
}

/// Characters WinAnsiEncoding places in 0x80..=0x9F, where Latin-1 has controls.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Replaces characters the built-in font cannot encode (outside WinAnsiEncoding)
/// with `?`. Tabs and other control characters become spaces; carriage returns
/// are dropped.
pub fn to_win_ansi(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\r')
        .map(|c| match c as u32 {
            0x0A => '\n',
            0x00..=0x1F | 0x7F..=0x9F => ' ',
            0x20..=0xFF => c,
            _ if WIN_ANSI_EXTRAS.contains(c) => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap. Each input line produces at least one output line, so
/// blank lines are preserved; words wider than the line are split by character.
pub fn wrap_text(text: &str, font: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let space = font.char_width(' ');
    let mut out = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in raw_line.split_whitespace() {
            let word_width = font.measure_str(word);
            let needed = if current.is_empty() {
                word_width
            } else {
                current_width + space + word_width
            };

            if needed <= max_width_em {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_width = needed;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width <= max_width_em {
                current.push_str(word);
                current_width = word_width;
            } else {
                for c in word.chars() {
                    let w = font.char_width(c);
                    if current_width + w > max_width_em && !current.is_empty() {
                        out.push(std::mem::take(&mut current));
                        current_width = 0.0;
                    }
                    current.push(c);
                    current_width += w;
                }
            }
        }

        out.push(current);
    }

    out
}
