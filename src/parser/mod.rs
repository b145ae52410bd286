//! PDF parsing module.

mod backend;
mod text;

pub use backend::{LopdfBackend, PdfBackend};
pub use text::TextFragment;
