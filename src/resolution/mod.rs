/// Import resolution module.
///
/// Maps relative import specifiers found in source files to concrete files
/// on disk using a fixed extension and index-file probe order.
mod resolver;

pub use resolver::{
    absolutize, candidate_paths, is_relative_specifier, normalize_path, resolve_import,
    INDEX_STEM, RESOLVE_EXTENSIONS,
};
