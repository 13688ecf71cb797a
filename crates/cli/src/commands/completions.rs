//! Shell completions for the `portal` binary.

use clap::Command;
use clap_complete::Shell;

/// Write the completion script for `shell` to stdout.
pub fn completions(shell: Shell, cmd: &mut Command) { clap_complete::generate(shell, cmd, "portal", &mut std::io::stdout()); }
