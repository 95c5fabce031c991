use std::path::{Path, PathBuf};

use tracing::debug;

use crate::changes;
use crate::config::{load_config, save_config, BundleConfig};
use crate::context::ContextBuilder;
use crate::diagnostics::DiagnosticSink;
use crate::errors::Result;
use crate::types::ContextBundle;

/// Ties a project root to its configuration and drives bundling for it.
pub struct Workspace {
    config: BundleConfig,
    root: PathBuf,
}

/// Outcome of bundling one changed file.
pub struct ChangeBundle {
    pub file: PathBuf,
    pub bundle: Result<ContextBundle>,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl Workspace {
    /// Opens a project, loading `.ctxbundle/config.json` or the defaults.
    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self {
            config: load_config(root)?,
            root: root.to_path_buf(),
        })
    }

    /// Writes the default configuration for a project and opens it.
    pub fn init(root: &Path) -> Result<Self> {
        let config = BundleConfig::default();
        save_config(root, &config)?;
        Ok(Self {
            config,
            root: root.to_path_buf(),
        })
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// Returns the project root path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

// ---------------------------------------------------------------------------
// Bundling
// ---------------------------------------------------------------------------

impl Workspace {
    /// Creates a context builder using this project's dependency policy.
    pub fn builder<'a>(&self, sink: &'a dyn DiagnosticSink) -> Result<ContextBuilder<'a>> {
        Ok(ContextBuilder::new(sink)?.with_policy(self.config.dependency_errors))
    }

    /// Builds the bundle for one file. Relative paths are taken from the
    /// project root.
    pub fn bundle(&self, file: &Path, sink: &dyn DiagnosticSink) -> Result<ContextBundle> {
        let file = self.root.join(file);
        self.builder(sink)?.build(&file)
    }

    /// Lists changed files in the enclosing repository that the
    /// configuration accepts and that still exist on disk.
    pub fn changed_sources(&self) -> Result<Vec<PathBuf>> {
        let repo_root = changes::repo_root(&self.root)?;
        let diff = changes::changed_files(&repo_root)?;
        let files = changes::select_changed_sources(&diff, &repo_root, &self.config)
            .into_iter()
            .filter(|path| {
                let exists = path.is_file();
                if !exists {
                    debug!(path = %path.display(), "skipping deleted file");
                }
                exists
            })
            .collect();
        Ok(files)
    }

    /// Builds a bundle for every changed source file. A file that fails
    /// does not stop the others.
    pub fn bundle_changes(&self, sink: &dyn DiagnosticSink) -> Result<Vec<ChangeBundle>> {
        let files = self.changed_sources()?;
        let mut builder = self.builder(sink)?;
        Ok(files
            .into_iter()
            .map(|file| ChangeBundle {
                bundle: builder.build(&file),
                file,
            })
            .collect())
    }
}
