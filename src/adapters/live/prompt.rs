//! Live confirmation prompt on the terminal.

use std::io::{BufRead, Write};

use crate::error::PortError;
use crate::ports::prompt::Confirmer;

/// Prints the message to stderr and waits for Enter on stdin.
///
/// End of input (Ctrl-D, closed pipe) counts as a refusal; Ctrl-C ends the
/// process before anything is sent.
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, message: &str) -> Result<bool, PortError> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{message}")?;
        writeln!(stderr, "Press enter to confirm, or Ctrl-C to cancel.")?;
        stderr.flush()?;
        read_confirmation(&mut std::io::stdin().lock())
    }
}

fn read_confirmation(input: &mut impl BufRead) -> Result<bool, PortError> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    Ok(read > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_confirms() {
        let mut input = std::io::Cursor::new(b"\n".to_vec());
        assert!(read_confirmation(&mut input).unwrap());
    }

    #[test]
    fn end_of_input_declines() {
        let mut input = std::io::Cursor::new(Vec::new());
        assert!(!read_confirmation(&mut input).unwrap());
    }
}
