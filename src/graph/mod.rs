/// Depth-bounded walk of the local import graph.
pub mod collector;

pub use collector::{collect_dependencies, DependencyCollector, VisitedSet};
