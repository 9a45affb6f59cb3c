//! Drawing plate outlines and labels onto image copies.

mod font;
mod writer;

pub use font::{FontSource, LabelFont, resolve_font};
pub use writer::{Annotator, output_file_name};
