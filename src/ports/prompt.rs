//! Confirmation port for operator prompts.

use crate::error::PortError;

/// Asks the operator to approve an action.
///
/// Abstracting the prompt lets tests approve or decline without a terminal.
pub trait Confirmer: Send + Sync {
    /// Shows `message` and returns `true` if the operator approves.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be read.
    fn confirm(&self, message: &str) -> Result<bool, PortError>;
}
