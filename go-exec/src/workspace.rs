use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::Error;

/// Name of the source file written into every workspace.
const SOURCE_FILE: &str = "main.go";

/// Ephemeral per-call module directory.
///
/// Uniquely named under the system temp dir and exclusively owned by
/// one invocation. The directory and everything in it is removed when
/// the value is dropped, on every exit path.
pub struct Workspace {
    root_dir: PathBuf,
}

impl Workspace {
    pub async fn new() -> Result<Self, Error> {
        let id = Uuid::new_v4();
        let root_dir = std::env::temp_dir().join(format!("go-exec-{}", id));

        fs::create_dir_all(&root_dir).await.map_err(|e| {
            Error::Workspace(format!("Failed to create workspace directory: {}", e))
        })?;

        debug!(dir = %root_dir.display(), "created workspace");
        Ok(Self { root_dir })
    }

    pub fn path(&self) -> &Path {
        &self.root_dir
    }

    /// Write the snippet verbatim as the module's `main.go`.
    pub async fn write_source(&self, code: &str) -> Result<(), Error> {
        fs::write(self.root_dir.join(SOURCE_FILE), code)
            .await
            .map_err(Error::Io)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.root_dir) {
            error!("Failed to clean up workspace directory: {}", e);
        }
    }
}
