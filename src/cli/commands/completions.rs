//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, `PowerShell` and elvish.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::DoingError;

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell, install: bool) -> Result<String, DoingError> {
    if install {
        Ok(completion_install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, DoingError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "doing", &mut buf);
    String::from_utf8(buf).map_err(|e| DoingError::Config(format!("UTF-8 error: {e}")))
}

/// Get installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => "# Add to ~/.bashrc or ~/.bash_profile:
source <(doing completions bash)

# Or save to a file:
doing completions bash > ~/.local/share/bash-completion/completions/doing
"
        .to_string(),

        Shell::Zsh => "# Save to your fpath:
doing completions zsh > ~/.zsh/completions/_doing
# Then add to ~/.zshrc:
fpath=(~/.zsh/completions $fpath)
autoload -Uz compinit && compinit
"
        .to_string(),

        Shell::Fish => "# Save to fish completions directory:
doing completions fish > ~/.config/fish/completions/doing.fish
"
        .to_string(),

        Shell::PowerShell => "# Add to your PowerShell profile ($PROFILE):
doing completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => "# Save to elvish completions directory:
doing completions elvish > ~/.elvish/lib/doing.elv

# Then add to ~/.elvish/rc.elv:
use doing
"
        .to_string(),

        _ => format!("# Run `doing completions {shell}` and source the output in your shell.\n"),
    }
}
