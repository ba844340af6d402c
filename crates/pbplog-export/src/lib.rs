//! Export: the finished log as one self-contained HTML page.

mod filename;
mod html;

pub use filename::export_filename;
pub use html::{escape, render_document};
