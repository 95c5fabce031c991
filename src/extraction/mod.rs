/// Tree-sitter based source extraction.
///
/// Parses TypeScript/JSX-flavored modules, extracts their import/export
/// surface and slices out the text of their exported declarations.
pub mod analyzer;
pub mod parser;
pub mod slicer;

pub use analyzer::analyze_file;
pub use parser::{parse_file, ParsedFile, SourceParser};
pub use slicer::{export_pieces, slice_exports, PIECE_SEPARATOR};
