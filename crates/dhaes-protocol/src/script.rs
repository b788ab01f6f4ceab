//! Whole-script execution.

use tracing::debug;

use crate::command::Command;
use crate::error::ProtocolError;
use crate::session::Session;

/// Runs a command script against one session, returning one output line per
/// executed command, in order.
///
/// The first line carries the operation count; at most that many command
/// lines are consumed, and a script that ends early simply stops at EOF.
/// Any malformed line or failed command aborts the run.
pub fn run_script(input: &str, session: &mut Session) -> Result<Vec<String>, ProtocolError> {
    let mut lines = input.lines();
    let header = lines.next().unwrap_or_default().trim();
    let count: usize = header
        .parse()
        .map_err(|_| ProtocolError::BadCount(header.to_string()))?;

    let mut outputs = Vec::with_capacity(count);
    for line in lines.take(count) {
        let command = Command::parse(line)?;
        debug!(verb = command.verb(), "executing command");
        outputs.push(session.execute(&command)?);
    }
    Ok(outputs)
}
