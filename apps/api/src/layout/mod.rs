// PDF export layout: static font metrics, word wrap, pagination.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod writer;

pub use writer::render_text_pdf;
