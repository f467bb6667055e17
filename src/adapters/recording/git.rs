//! Recording adapter for the `CommitSource` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::PortError;
use crate::ports::{Commit, CommitSource, RevisionRange};

/// Records commit-source calls while delegating to an inner implementation.
pub struct RecordingGitRepo {
    inner: Box<dyn CommitSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGitRepo {
    /// Creates a new recording commit source wrapping the given implementation.
    pub fn new(inner: Box<dyn CommitSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CommitSource for RecordingGitRepo {
    fn log(&self, range: &RevisionRange) -> Result<Vec<Commit>, PortError> {
        let result = self.inner.log(range);
        record_result(&self.recorder, "git", "log", range, &result);
        result
    }
}
