use crate::extraction::PIECE_SEPARATOR;
use crate::types::ContextBundle;

/// Header line opening the main file's section.
pub const CHANGED_LOGIC_HEADER: &str = "CHANGED LOGIC:";

/// Header line opening the dependencies section.
pub const DEPENDENCIES_HEADER: &str = "DEPENDENCIES:";

/// Formats a bundle in the two-section text format read by prompt builders.
///
/// Dependencies with an empty slice are left out. The dependencies section
/// is always present, even when it has no content.
pub fn format_bundle_as_text(bundle: &ContextBundle) -> String {
    let dependencies: Vec<&str> = bundle
        .non_empty_dependencies()
        .map(|d| d.exports.as_str())
        .collect();

    format!(
        "\n{}\n{}\n\n{}\n{}\n",
        CHANGED_LOGIC_HEADER,
        bundle.changed_logic,
        DEPENDENCIES_HEADER,
        dependencies.join(PIECE_SEPARATOR)
    )
}

/// Formats a bundle as pretty-printed JSON.
pub fn format_bundle_as_json(bundle: &ContextBundle) -> String {
    serde_json::to_string_pretty(bundle).unwrap_or_default()
}
