//! Reply content parsing
//!
//! Pure text-to-blocks segmentation; no rendering and no dependencies on the
//! rest of the engine.

mod parser;

pub use parser::{parse, Block, Span};
