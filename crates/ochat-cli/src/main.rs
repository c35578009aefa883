//! CLI entry point, the composition root.
//!
//! Every command that talks to the server runs `ensure_server` first and
//! `shutdown` last, so a server spawned here never outlives the command.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use ochat_cli::handlers::{self, chat::ChatArgs};
use ochat_cli::presentation::hint_for;
use ochat_cli::{Cli, CliConfig, CliContext, Commands, FavouritesCommand, ModelsCommand, bootstrap};
use ochat_runtime::ServerOrigin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let ctx = bootstrap(config)?;

    let result = run(&ctx, command).await;
    if let Err(err) = &result {
        if let Some(hint) = hint_for(err) {
            eprintln!("{hint}");
        }
    }
    result
}

/// Route a command to its handler, bracketing server commands with startup
/// and teardown.
async fn run(ctx: &CliContext, command: Commands) -> anyhow::Result<()> {
    if !command.needs_server() {
        return dispatch(ctx, command, None).await;
    }

    let origin = match ctx.ensure_server().await {
        Ok(origin) => origin,
        Err(e) => {
            ctx.shutdown().await;
            return Err(e);
        }
    };
    let result = dispatch(ctx, command, Some(origin)).await;
    ctx.shutdown().await;
    result
}

async fn dispatch(
    ctx: &CliContext,
    command: Commands,
    origin: Option<ServerOrigin>,
) -> anyhow::Result<()> {
    match command {
        Commands::Chat {
            model,
            no_stream,
            system,
        } => {
            let args = ChatArgs {
                model,
                no_stream,
                system_prompt: system,
            };
            handlers::chat::execute(ctx, args).await
        }
        Commands::Models { command } => match command {
            ModelsCommand::List => handlers::models::list(ctx).await,
            ModelsCommand::Pull { name } => handlers::pull::execute(ctx, &name).await,
            ModelsCommand::Delete { name } => handlers::models::delete(ctx, &name).await,
        },
        Commands::Favourites { command } => match command {
            None | Some(FavouritesCommand::List) => handlers::favourites::list(ctx.favourites()),
            Some(FavouritesCommand::Toggle { name }) => {
                handlers::favourites::toggle(ctx.favourites(), &name).map(|_| ())
            }
        },
        Commands::Serve => {
            let origin = origin.unwrap_or(ServerOrigin::AlreadyManaged);
            handlers::serve::execute(ctx, origin).await
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
///
/// Server output is logged under the `ochat::server` target and stays
/// hidden unless verbose, since it would interleave with chat replies.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,ochat::server=error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
