use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "region-marker")]
#[command(version, about = "Outline the region markers in a source file")]
pub struct Cli {
    /// Source file to scan for region markers
    #[arg(required_unless_present = "init_config")]
    pub file: Option<PathBuf>,

    /// Language key from the config table (e.g. rust, python)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Explicit comment prefix; wins over --language
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Browse the outline in a terminal viewer
    #[arg(long)]
    pub tui: bool,

    /// Write the built-in language table to the user config file
    #[arg(long, conflicts_with_all = ["file", "language", "prefix", "tui"])]
    pub init_config: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print (or browse) the regions of one file.
    Outline(CliArgs),
    InitConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub file: PathBuf,
    pub language: Option<String>,
    pub prefix: Option<String>,
    pub tui: bool,
}

impl Cli {
    pub fn into_command(self) -> Result<Command> {
        if self.init_config {
            return Ok(Command::InitConfig);
        }
        Ok(Command::Outline(CliArgs {
            file: self.file.context("No file given")?,
            language: self.language,
            prefix: self.prefix,
            tui: self.tui,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Command> {
        let cli = Cli::try_parse_from(std::iter::once("region-marker").chain(args.iter().copied()))?;
        cli.into_command()
    }

    #[test]
    fn file_only() {
        let command = parse(&["src/main.rs"]).unwrap();
        assert_eq!(
            command,
            Command::Outline(CliArgs {
                file: PathBuf::from("src/main.rs"),
                language: None,
                prefix: None,
                tui: false,
            })
        );
    }

    #[test]
    fn all_options() {
        let Command::Outline(args) =
            parse(&["--tui", "-l", "python", "script.txt", "--prefix", ";;"]).unwrap()
        else {
            panic!("expected an outline command");
        };
        assert_eq!(args.file, PathBuf::from("script.txt"));
        assert_eq!(args.language.as_deref(), Some("python"));
        assert_eq!(args.prefix.as_deref(), Some(";;"));
        assert!(args.tui);
    }

    #[test]
    fn init_config_command() {
        assert_eq!(parse(&["--init-config"]).unwrap(), Command::InitConfig);
        assert!(parse(&["--init-config", "a.rs"]).is_err());
        assert!(parse(&["--init-config", "--tui"]).is_err());
    }

    #[test]
    fn errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.rs", "b.rs"]).is_err());
        assert!(parse(&["a.rs", "--prefix"]).is_err());
        assert!(parse(&["a.rs", "--verbose"]).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
