//! Locating and loading cached cassettes for replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use super::session::cassette_path;

/// Per-port cassette files to replay from.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the commit source.
    pub git: Option<PathBuf>,
    /// Cassette for the issue tracker.
    pub issues: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the commit source.
    pub git: Option<CassetteReplayer>,
    /// Replayer for the issue tracker.
    pub issues: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Uses the cassettes found in a cache directory written by `--save-cache`.
    ///
    /// Ports whose cassette file is absent are left unset.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let existing = |port: &str| Some(cassette_path(dir, port)).filter(|p| p.exists());
        Self {
            git: existing("git"),
            issues: existing("issues"),
        }
    }

    /// Load a single cassette file and create a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cache file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cache file {}: {e}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            recorded_at = %cassette.recorded_at,
            calls = cassette.interactions.len(),
            "loaded cache"
        );
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Load all configured cassette files.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: Option<&Path>| path.map(Self::load_cassette).transpose();
        Ok(PortReplayers {
            git: load(self.git.as_deref())?,
            issues: load(self.issues.as_deref())?,
        })
    }
}
