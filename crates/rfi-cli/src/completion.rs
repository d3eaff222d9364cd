//! Shell completion generation.

use std::io;

use clap::Command;
use clap_complete::{generate, Shell};

/// Generate shell completion script for `rfi-compare`.
pub fn generate_completion(cmd: &mut Command, shell: Shell, out: &mut dyn io::Write) {
    generate(shell, cmd, "rfi-compare", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_bash_completion() {
        let mut cmd = Command::new("rfi-compare").arg(clap::Arg::new("band").long("band"));
        let mut buf = Vec::new();
        generate_completion(&mut cmd, Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("rfi-compare"));
        assert!(script.contains("--band"));
    }
}
