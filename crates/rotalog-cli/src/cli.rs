//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use rotalog::Level;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rotalog")]
#[command(version, about = "Structured logging to console and rotated files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a sink config and show the files it writes
    Check(CheckArgs),

    /// Initialize the sink from a config and write one event
    Emit(EmitArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Config file (defaults to rotalog.{json,toml,yaml,yml} in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct EmitArgs {
    /// Config file (defaults to rotalog.{json,toml,yaml,yml} in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Event level (trace, debug, info, warn, error, fatal, panic)
    #[arg(short, long, default_value = "info")]
    pub level: Level,

    /// Write a fatal event and exit with status 1
    #[arg(long, conflicts_with = "level")]
    pub fatal: bool,

    /// Drop events below this level
    #[arg(long, default_value = "trace")]
    pub min_level: Level,

    /// Extra field (KEY=VALUE, repeatable)
    #[arg(short, long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Event message
    pub message: String,
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    let pos = s.find('=').ok_or("Expected KEY=VALUE format")?;
    if pos == 0 {
        return Err("Field key must not be empty".to_string());
    }
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("user=ada").unwrap(),
            ("user".to_string(), "ada".to_string())
        );
        assert_eq!(
            parse_field("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn test_emit_args() {
        let cli = Cli::parse_from([
            "rotalog", "emit", "-c", "app.json", "-l", "warn", "-f", "k=v", "hello",
        ]);
        match cli.command {
            Commands::Emit(args) => {
                assert_eq!(args.config, Some(PathBuf::from("app.json")));
                assert_eq!(args.level, Level::Warn);
                assert_eq!(args.fields, vec![("k".to_string(), "v".to_string())]);
                assert_eq!(args.message, "hello");
                assert!(!args.fatal);
                assert_eq!(args.min_level, Level::Trace);
            }
            Commands::Check(_) => panic!("expected emit"),
        }
    }

    #[test]
    fn test_emit_fatal_args() {
        let cli = Cli::parse_from(["rotalog", "emit", "--fatal", "--min-level", "panic", "bye"]);
        match cli.command {
            Commands::Emit(args) => {
                assert!(args.fatal);
                assert_eq!(args.min_level, Level::Panic);
            }
            Commands::Check(_) => panic!("expected emit"),
        }

        let conflict = Cli::try_parse_from(["rotalog", "emit", "--fatal", "-l", "warn", "bye"]);
        assert!(conflict.is_err());
    }
}
