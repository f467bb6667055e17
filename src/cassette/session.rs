//! Recording session writing one cassette per port into a cache directory.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::recorder::CassetteRecorder;

/// File name of the cassette for `port` inside a cache directory.
#[must_use]
pub fn cassette_path(dir: &Path, port: &str) -> PathBuf {
    dir.join(format!("{port}.cassette.yaml"))
}

/// Per-port recorders for one run.
///
/// Recording adapters hold clones of these handles; [`RecordingSession::finish`]
/// can only succeed once every adapter has been dropped.
pub struct RecordingSession {
    /// Recorder for commit source calls.
    pub git: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for issue tracker calls.
    pub issues: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Starts a session that will write into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be created.
    pub fn new(dir: &Path) -> Result<Self, String> {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create cache directory {}: {e}", dir.display()))?;

        let make_recorder = |port: &str| {
            let recorder = CassetteRecorder::new(cassette_path(dir, port), format!("cache-{port}"));
            Arc::new(Mutex::new(recorder))
        };

        Ok(Self {
            git: make_recorder("git"),
            issues: make_recorder("issues"),
            output_dir: dir.to_path_buf(),
        })
    }

    /// Writes every cassette to disk and returns the cache directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            let calls = recorder.len();
            let path = recorder
                .finish()
                .map_err(|e| format!("Failed to write {port} cache: {e}"))?;
            tracing::info!(port, calls, path = %path.display(), "wrote cache");
            Ok(())
        }

        finish_one(self.git, "git")?;
        finish_one(self.issues, "issues")?;
        Ok(self.output_dir)
    }
}
