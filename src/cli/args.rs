//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Environment health refresher: discover services, probe them, persist status
#[derive(Parser, Debug)]
#[command(name = "voltmeter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh and store the status of environments
    Refresh {
        /// Environment names, refreshed in order
        #[arg(required = true)]
        environments: Vec<String>,
    },

    /// Show the stored status of an environment
    Status {
        /// Environment name
        environment: String,
    },

    /// List configured environments
    Envs,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn refresh_accepts_many_environments() {
        let cli = Cli::try_parse_from(["voltmeter", "-dd", "refresh", "dev", "prod"]).unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Refresh { environments }) => {
                assert_eq!(environments, vec!["dev", "prod"])
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn refresh_requires_an_environment() {
        assert!(Cli::try_parse_from(["voltmeter", "refresh"]).is_err());
    }
}
