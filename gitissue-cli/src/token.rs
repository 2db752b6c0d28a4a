//! Bearer token persistence
//!
//! The token lives in a single-line text file, by default under the
//! user's config directory (`~/.config/gitissue/token`). The file is
//! written with owner-only permissions on Unix; the token is as good
//! as a password.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

/// On-disk storage for the bearer token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a store at `path`, or at the default location when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(Self::default_path),
        }
    }

    /// Default token file location
    ///
    /// Falls back to `./token` when no config directory is available.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("gitissue").join("token"))
            .unwrap_or_else(|| PathBuf::from("token"))
    }

    /// Where this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token
    pub fn load(&self) -> anyhow::Result<String> {
        let contents = std::fs::read_to_string(&self.path).with_context(|| {
            format!(
                "no token at {}; run `gitissue auth <note>` first",
                self.path.display()
            )
        })?;

        let token = contents.lines().next().unwrap_or_default().trim();
        if token.is_empty() {
            anyhow::bail!("token file {} is empty", self.path.display());
        }

        debug!(path = %self.path.display(), "loaded token");
        Ok(token.to_string())
    }

    /// Write the token, creating parent directories as needed
    pub fn store(&self, token: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }

        std::fs::write(&self.path, format!("{token}\n"))
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        // The token grants repo access; keep it owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("failed to set permissions on {}", self.path.display()))?;
        }

        debug!(path = %self.path.display(), "stored token");
        Ok(())
    }
}
