//! Root CLI parser and global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Chat with and manage models served by a local Ollama server.
#[derive(Debug, Parser)]
#[command(name = "ochat")]
#[command(about = "Chat with and manage local models")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Server executable to spawn when no server is running
    #[arg(long = "server-bin", env = "OCHAT_SERVER_BIN", global = true)]
    pub server_bin: Option<PathBuf>,

    /// Directory holding the favourites file
    #[arg(long = "data-dir", env = "OCHAT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{FavouritesCommand, ModelsCommand};
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from([
            "ochat",
            "models",
            "list",
            "--verbose",
            "--server-bin",
            "/opt/ollama/bin/ollama",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.server_bin, Some(PathBuf::from("/opt/ollama/bin/ollama")));
        assert!(matches!(
            cli.command,
            Some(Commands::Models {
                command: ModelsCommand::List
            })
        ));
    }

    #[test]
    fn test_chat_flags() {
        let cli = Cli::parse_from(["ochat", "chat", "llama3", "--no-stream", "-s", "Be brief."]);
        let Some(Commands::Chat {
            model,
            no_stream,
            system,
        }) = cli.command
        else {
            panic!("expected chat command");
        };
        assert_eq!(model, "llama3");
        assert!(no_stream);
        assert_eq!(system.as_deref(), Some("Be brief."));
    }

    #[test]
    fn test_chat_requires_model() {
        assert!(Cli::try_parse_from(["ochat", "chat"]).is_err());
    }

    #[test]
    fn test_pull_and_delete_take_name() {
        let cli = Cli::parse_from(["ochat", "models", "pull", "phi3:mini"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Models {
                command: ModelsCommand::Pull { ref name }
            }) if name == "phi3:mini"
        ));

        let cli = Cli::parse_from(["ochat", "models", "delete", "phi3:mini"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Models {
                command: ModelsCommand::Delete { .. }
            })
        ));
    }

    #[test]
    fn test_favourites_subcommand_optional() {
        let cli = Cli::parse_from(["ochat", "favourites"]);
        assert!(matches!(cli.command, Some(Commands::Favourites { command: None })));

        let cli = Cli::parse_from(["ochat", "favourites", "toggle", "llama3"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Favourites {
                command: Some(FavouritesCommand::Toggle { ref name })
            }) if name == "llama3"
        ));
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["ochat"]);
        assert!(cli.command.is_none());
    }
}
