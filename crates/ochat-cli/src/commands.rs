//! Subcommands of the `ochat` shell.

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Chat interactively with a model
    Chat {
        /// Model to chat with (e.g., "llama3" or "phi3:mini")
        model: String,
        /// Wait for each complete reply instead of streaming tokens
        #[arg(long)]
        no_stream: bool,
        /// System prompt that opens the conversation
        #[arg(short, long)]
        system: Option<String>,
    },

    /// List, pull and delete local models
    Models {
        #[command(subcommand)]
        command: ModelsCommand,
    },

    /// Show or toggle favourite models (lists them by default)
    #[command(visible_alias = "favorites")]
    Favourites {
        #[command(subcommand)]
        command: Option<FavouritesCommand>,
    },

    /// Start the server and keep it running until Ctrl+C
    Serve,
}

impl Commands {
    /// Whether the command talks to the inference server.
    pub const fn needs_server(&self) -> bool {
        !matches!(self, Self::Favourites { .. })
    }
}

#[derive(Debug, Subcommand)]
pub enum ModelsCommand {
    /// List locally installed models
    List,
    /// Download a model from the registry
    Pull {
        /// Model name, optionally with a tag (e.g., "llama3:8b")
        name: String,
    },
    /// Delete a locally installed model
    Delete {
        /// Model name as shown by `ochat models list`
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavouritesCommand {
    /// List favourite models
    List,
    /// Add a model to the favourites, or remove it if already there
    Toggle {
        /// Model name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_favourites_skip_server() {
        assert!(!Commands::Favourites { command: None }.needs_server());
        assert!(Commands::Serve.needs_server());
        assert!(
            Commands::Models {
                command: ModelsCommand::List
            }
            .needs_server()
        );
    }
}
