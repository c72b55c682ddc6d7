use std::io;
use std::process::Command;

/// Run a command with inherited stdout/stderr, failing on non-zero exit.
pub fn run_visible(cmd: &mut Command) -> io::Result<()> {
    let status = cmd.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!(
            "command failed with status: {status}"
        )))
    }
}
