pub mod changes;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod errors;
pub mod extraction;
pub mod graph;
pub mod resolution;
pub mod types;
pub mod workspace;
