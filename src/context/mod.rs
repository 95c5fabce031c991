/// Builds context bundles from a main file and its local dependencies.
pub mod builder;

/// Formats bundles as text or JSON.
pub mod formatter;

pub use builder::{build_context_bundle, ContextBuilder, BUNDLE_DEPTH};
pub use formatter::{
    format_bundle_as_json, format_bundle_as_text, CHANGED_LOGIC_HEADER, DEPENDENCIES_HEADER,
};
