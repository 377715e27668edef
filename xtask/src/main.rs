use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use xshell::cmd;

const COMMAND_NAME: &str = "expire";
const SHELLS: [Shell; 3] = [Shell::Bash, Shell::Fish, Shell::Zsh];

#[derive(Clone, Debug, Parser)]
pub enum Commands {
    /// Render expire(1) and expire(5)
    ManPages(OutputOptions),
    /// Write completion scripts for bash, fish and zsh
    ShellCompletions(OutputOptions),
}

#[derive(Clone, Debug, Parser)]
pub struct OutputOptions {
    /// Output directory, created if missing
    #[arg(long)]
    pub out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let sh = xshell::Shell::new()?;
    match Commands::parse() {
        Commands::ManPages(options) => generate_man_pages(&options, &sh),
        Commands::ShellCompletions(options) => generate_shell_completions(&options, &sh),
    }
}

fn generate_man_pages(options: &OutputOptions, sh: &xshell::Shell) -> anyhow::Result<()> {
    let out = &options.out;
    sh.create_dir(out)?;

    // the example configuration is the copy shipped inside the binary
    let example = expire::embedded::Etc::get("example-config.toml")
        .context("example configuration is not embedded")?;
    let config_md = sh
        .read_file("docs/config.md")?
        .replace(
            "EXAMPLE_CONFIG_PLACEHOLDER",
            String::from_utf8_lossy(&example.data).trim_end(),
        );
    let temp_dir = sh.create_temp_dir()?;
    let config_md_path = temp_dir.path().join("config.md");
    sh.write_file(&config_md_path, config_md)?;
    let page = out.join(format!("{COMMAND_NAME}.5"));
    cmd!(sh, "go-md2man -in {config_md_path} -out {page}").run()?;

    clap_mangen::generate_to(expire::command::Options::command(), out)?;
    Ok(())
}

fn generate_shell_completions(options: &OutputOptions, sh: &xshell::Shell) -> anyhow::Result<()> {
    let out = &options.out;
    sh.create_dir(out)?;
    let mut cli = expire::command::Options::command();
    for shell in SHELLS {
        let path = clap_complete::generate_to(shell, &mut cli, COMMAND_NAME, out)
            .with_context(|| format!("failed to generate {shell} completion"))?;
        println!("{}", path.display());
    }
    Ok(())
}
