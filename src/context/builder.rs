use std::path::Path;

use tracing::{debug, info};

use crate::context::formatter::format_bundle_as_text;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::errors::Result;
use crate::extraction::{slice_exports, SourceParser};
use crate::graph::{DependencyCollector, VisitedSet};
use crate::resolution::absolutize;
use crate::types::{ContextBundle, DependencyErrorPolicy, DependencySlice, SkippedDependency};

/// Import hops followed from the main file when building a bundle.
pub const BUNDLE_DEPTH: usize = 1;

/// Builds context bundles: the export slice of a changed file plus the
/// export slices of its direct local dependencies.
pub struct ContextBuilder<'a> {
    parser: SourceParser,
    policy: DependencyErrorPolicy,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> ContextBuilder<'a> {
    /// Creates a builder reporting skipped dependencies to `sink`.
    pub fn new(sink: &'a dyn DiagnosticSink) -> Result<Self> {
        Ok(Self {
            parser: SourceParser::new()?,
            policy: DependencyErrorPolicy::default(),
            sink,
        })
    }

    /// Sets the policy the dependency collector applies to broken files.
    pub fn with_policy(mut self, policy: DependencyErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the bundle for `main_file`.
    ///
    /// Pipeline:
    /// 1. Parse and slice the main file; any failure here is returned.
    /// 2. Collect dependencies with a depth of [`BUNDLE_DEPTH`].
    /// 3. Parse and slice each dependency. One that fails is left out of
    ///    the bundle, recorded in `skipped` and reported to the sink.
    pub fn build(&mut self, main_file: &Path) -> Result<ContextBundle> {
        let main_file = absolutize(main_file);
        let main = self.parser.parse_file(&main_file)?;
        let changed_logic = slice_exports(&main);

        let mut visited = VisitedSet::new();
        let deps = DependencyCollector::new(self.sink)?
            .with_policy(self.policy)
            .collect(&main_file, BUNDLE_DEPTH, &mut visited)?;

        info!(
            main = %main_file.display(),
            dependencies = deps.len(),
            "building context bundle"
        );

        let mut dependencies = Vec::new();
        let mut skipped = Vec::new();
        for dep in deps {
            match self.parser.parse_file(&dep) {
                Ok(parsed) => {
                    debug!(dependency = %dep.display(), "sliced dependency");
                    dependencies.push(DependencySlice {
                        exports: slice_exports(&parsed),
                        path: dep,
                    });
                }
                Err(e) => {
                    self.sink.report(Diagnostic::warning(
                        &dep,
                        format!("skipping dependency (parse failed): {e}"),
                    ));
                    skipped.push(SkippedDependency {
                        path: dep,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(ContextBundle {
            main_file,
            changed_logic,
            dependencies,
            skipped,
        })
    }
}

/// Builds the bundle for `main_file` and renders it in the bundle text
/// format, reporting skipped dependencies through `tracing`.
pub fn build_context_bundle(main_file: &Path) -> Result<String> {
    let bundle = ContextBuilder::new(&TracingSink)?.build(main_file)?;
    Ok(format_bundle_as_text(&bundle))
}
