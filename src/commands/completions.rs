use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;
use std::path::{Path, PathBuf};

const BIN_NAME: &str = "fontpeek";

pub fn run(shell: Shell, install: bool) {
    let mut cmd = crate::Cli::command();

    if !install {
        clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
        return;
    }

    if let Err(e) = install_completions(shell, &mut cmd) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn home_dir() -> Result<PathBuf, String> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| "HOME is not set.".to_string())
}

fn install_completions(shell: Shell, cmd: &mut clap::Command) -> Result<(), String> {
    let home = home_dir()?;
    let comp_path = match shell {
        Shell::Zsh => home.join(".zfunc").join(format!("_{BIN_NAME}")),
        Shell::Bash => home
            .join(".local/share/bash-completion/completions")
            .join(BIN_NAME),
        Shell::Fish => home
            .join(".config/fish/completions")
            .join(format!("{BIN_NAME}.fish")),
        _ => {
            return Err(format!(
                "Auto-install not supported for {shell:?}. \
                 Use `{BIN_NAME} completions {shell:?}` to print completions and install manually."
            ));
        }
    };

    let mut buf = Vec::new();
    clap_complete::generate(shell, cmd, BIN_NAME, &mut buf);
    write_file(&comp_path, &buf)?;
    println!("Installed {shell:?} completions to {}", comp_path.display());

    match shell {
        Shell::Zsh => {
            let zshrc = home.join(".zshrc");
            let current = std::fs::read_to_string(&zshrc).unwrap_or_default();
            if !current.contains(".zfunc") {
                let snippet = format!(
                    "\n# {BIN_NAME} shell completions\nfpath=(~/.zfunc $fpath)\nautoload -Uz compinit && compinit\n"
                );
                append_file(&zshrc, &snippet)?;
                println!("Added fpath + compinit to ~/.zshrc");
            }
            println!("Restart your shell or run: source ~/.zshrc");
        }
        Shell::Bash => println!("Restart your shell to activate."),
        _ => {}
    }
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Could not create {}: {e}", parent.display()))?;
    }
    std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn append_file(path: &Path, content: &str) -> Result<(), String> {
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    write!(f, "{content}").map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
