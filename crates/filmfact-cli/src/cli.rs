//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Filmfact - extract Prolog-style facts from a film database snapshot.
#[derive(Debug, Parser)]
#[command(name = "filmfact")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a generation pass and write a fact file
    Generate(GenerateArgs),

    /// Print the run manifest for a configuration without generating
    Manifest(ManifestArgs),
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// JSON database snapshot to read
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Output fact file (truncated on start)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Run profile (TOML); command-line flags override it
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Number of root records to accept
    #[arg(short, long)]
    pub quota: Option<usize>,

    /// Root entity kind: work, person, organization or role
    #[arg(short, long)]
    pub root: Option<String>,

    /// Pick root candidates in random order
    #[arg(long)]
    pub random: bool,

    /// Enable a sub-kind, as KIND:NAME (e.g. work:Series)
    #[arg(long = "sub-kind", value_name = "KIND:NAME")]
    pub sub_kinds: Vec<String>,

    /// Enable a link kind, as SOURCE:TARGET:NAME (e.g. work:person:cast)
    #[arg(long = "link", value_name = "SOURCE:TARGET:NAME")]
    pub links: Vec<String>,

    /// Skip writing the run manifest next to the output file
    #[arg(long)]
    pub no_manifest: bool,
}

/// Arguments for the manifest command.
#[derive(Debug, Parser)]
pub struct ManifestArgs {
    /// Run profile (TOML)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Root entity kind: work, person, organization or role
    #[arg(short, long)]
    pub root: Option<String>,

    /// Enable a sub-kind, as KIND:NAME
    #[arg(long = "sub-kind", value_name = "KIND:NAME")]
    pub sub_kinds: Vec<String>,

    /// Enable a link kind, as SOURCE:TARGET:NAME
    #[arg(long = "link", value_name = "SOURCE:TARGET:NAME")]
    pub links: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "filmfact",
            "generate",
            "--snapshot",
            "db.json",
            "--output",
            "facts.pl",
            "--quota",
            "50",
            "--link",
            "work:person:cast",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.quota, Some(50));
        assert_eq!(args.links, vec!["work:person:cast".to_string()]);
        assert!(!args.random);
    }

    #[test]
    fn test_parse_manifest() {
        let cli = Cli::try_parse_from(["filmfact", "manifest", "--root", "person"]).unwrap();
        let Command::Manifest(args) = cli.command else {
            panic!("expected manifest");
        };
        assert_eq!(args.root.as_deref(), Some("person"));
    }

    #[test]
    fn test_snapshot_is_required() {
        assert!(Cli::try_parse_from(["filmfact", "generate", "--output", "facts.pl"]).is_err());
    }
}
