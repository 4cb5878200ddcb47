//! Shell completions command - Generate shell completion scripts

use std::io;

use clap::Command;
use clap_complete::{generate, shells};

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Fish => write!(f, "fish"),
            Shell::PowerShell => write!(f, "powershell"),
            Shell::Elvish => write!(f, "elvish"),
        }
    }
}

/// Installation hint for a shell.
pub fn instructions(shell: Shell) -> Vec<String> {
    match shell {
        Shell::Bash => vec![
            "# Add to ~/.bashrc:".to_string(),
            "eval \"$(pathtrace completions bash)\"".to_string(),
        ],
        Shell::Zsh => vec![
            "# Save to a file in fpath:".to_string(),
            "pathtrace completions zsh > ~/.zfunc/_pathtrace".to_string(),
        ],
        Shell::Fish => vec![
            "# Save to fish completions directory:".to_string(),
            "pathtrace completions fish > ~/.config/fish/completions/pathtrace.fish".to_string(),
        ],
        Shell::PowerShell => vec![
            "# Add to $PROFILE:".to_string(),
            "Invoke-Expression (& pathtrace completions powershell | Out-String)".to_string(),
        ],
        Shell::Elvish => vec![
            "# Add to ~/.elvish/rc.elv:".to_string(),
            "eval (pathtrace completions elvish | slurp)".to_string(),
        ],
    }
}

/// Generate completions and write to stdout using provided Command
pub fn generate_completions_with_cmd(shell: Shell, cmd: &mut Command) {
    let out = &mut io::stdout();
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, "pathtrace", out),
        Shell::Zsh => generate(shells::Zsh, cmd, "pathtrace", out),
        Shell::Fish => generate(shells::Fish, cmd, "pathtrace", out),
        Shell::PowerShell => generate(shells::PowerShell, cmd, "pathtrace", out),
        Shell::Elvish => generate(shells::Elvish, cmd, "pathtrace", out),
    }
}
