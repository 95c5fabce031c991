use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::errors::Result;
use crate::extraction::{analyze_file, SourceParser};
use crate::resolution::absolutize;
use crate::types::DependencyErrorPolicy;

/// Files seen during one collection walk.
///
/// A file is *visited* once it has been parsed and analyzed; it is *listed*
/// once it has been placed in the result. Both are tracked so that a file
/// first reached with no depth left can still be expanded by a later path
/// without being listed twice. Create one per top-level collection.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    visited: HashSet<PathBuf>,
    listed: HashSet<PathBuf>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the file has already been parsed and analyzed.
    pub fn contains(&self, path: &Path) -> bool {
        self.visited.contains(path)
    }

    /// Number of files parsed and analyzed so far.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Marks a file visited; returns `false` if it already was.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        self.visited.insert(path)
    }

    fn list(&mut self, path: &Path) -> bool {
        if self.listed.contains(path) {
            return false;
        }
        self.listed.insert(path.to_path_buf())
    }
}

/// Pending imports of one expanded file.
struct Frame {
    imports: Vec<PathBuf>,
    next: usize,
    /// Remaining import hops of the file these imports belong to.
    depth: usize,
}

/// Walks the local import graph depth-first from a starting file.
pub struct DependencyCollector<'a> {
    parser: SourceParser,
    policy: DependencyErrorPolicy,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> DependencyCollector<'a> {
    /// Creates a collector that tolerates broken dependencies and reports
    /// them to `sink`.
    pub fn new(sink: &'a dyn DiagnosticSink) -> Result<Self> {
        Ok(Self {
            parser: SourceParser::new()?,
            policy: DependencyErrorPolicy::default(),
            sink,
        })
    }

    /// Sets the policy applied when a dependency fails to read or parse.
    pub fn with_policy(mut self, policy: DependencyErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Collects the dependencies of `start` up to `max_depth` import hops.
    ///
    /// The result is in pre-order: each resolved import is followed by its
    /// own dependencies before the next import of the same file. A file
    /// appears at most once and `start` itself never appears. Depth `0`, or
    /// a start file already in `visited`, yields an empty list.
    ///
    /// The walk uses an explicit stack, so deep graphs do not grow the call
    /// stack. A failure to read or parse `start` always propagates.
    pub fn collect(
        &mut self,
        start: &Path,
        max_depth: usize,
        visited: &mut VisitedSet,
    ) -> Result<Vec<PathBuf>> {
        let start = absolutize(start);
        if max_depth == 0 || visited.contains(&start) {
            return Ok(Vec::new());
        }

        visited.insert(start.clone());
        visited.list(&start);
        let imports = self.resolved_imports(&start)?;

        let mut deps = Vec::new();
        let mut stack = vec![Frame {
            imports,
            next: 0,
            depth: max_depth,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(dep) = frame.imports.get(frame.next).cloned() else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let remaining = frame.depth - 1;

            if visited.list(&dep) {
                deps.push(dep.clone());
            }
            if remaining == 0 || visited.contains(&dep) {
                continue;
            }

            visited.insert(dep.clone());
            match self.resolved_imports(&dep) {
                Ok(imports) => stack.push(Frame {
                    imports,
                    next: 0,
                    depth: remaining,
                }),
                Err(e) if e.is_parse_failure() && self.policy == DependencyErrorPolicy::Skip => {
                    self.sink.report(Diagnostic::warning(
                        &dep,
                        format!("dependency not expanded: {e}"),
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        debug!(
            start = %start.display(),
            depth = max_depth,
            found = deps.len(),
            "collected dependencies"
        );
        Ok(deps)
    }

    fn resolved_imports(&mut self, file: &Path) -> Result<Vec<PathBuf>> {
        let parsed = self.parser.parse_file(file)?;
        let analysis = analyze_file(&parsed);
        debug!(
            file = %file.display(),
            imports = analysis.imports.len(),
            resolved = analysis.resolved_imports.len(),
            "analyzed file"
        );
        Ok(analysis.resolved_imports)
    }
}

/// Collects dependencies with the default policy, reporting skipped
/// dependencies through `tracing`.
pub fn collect_dependencies(
    start: &Path,
    max_depth: usize,
    visited: &mut VisitedSet,
) -> Result<Vec<PathBuf>> {
    DependencyCollector::new(&TracingSink)?.collect(start, max_depth, visited)
}
