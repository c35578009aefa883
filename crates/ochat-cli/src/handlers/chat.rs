//! Chat command handler.
//!
//! Interactive loop: read a line with rustyline, send the conversation, and
//! print the reply as it streams in. Each turn is built on a copy of the
//! conversation and committed only once the server has answered, so a failed
//! turn can be retried without duplicating the user's message.

use std::io::{self, Write};

use anyhow::{Context, Result};
use ochat_client::ClientError;
use ochat_core::Conversation;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use super::CtrlC;
use crate::bootstrap::CliContext;
use crate::presentation::hint_for;

const PROMPT: &str = ">>> ";

/// Arguments for the chat command.
#[derive(Debug, Clone)]
pub struct ChatArgs {
    pub model: String,
    pub no_stream: bool,
    pub system_prompt: Option<String>,
}

/// One line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Empty,
    Quit,
    Clear,
    Message(&'a str),
}

impl<'a> ShellInput<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => Self::Empty,
            "/bye" | "/exit" | "/quit" => Self::Quit,
            "/clear" => Self::Clear,
            text => Self::Message(text),
        }
    }
}

/// Execute the chat command.
pub async fn execute(ctx: &CliContext, args: ChatArgs) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to initialise line editor")?;
    let mut conversation = new_conversation(args.system_prompt.as_deref());

    println!(
        "Chatting with {}. Type /clear to start over, /bye or Ctrl+D to quit.",
        args.model
    );

    loop {
        let line = match tokio::task::block_in_place(|| editor.readline(PROMPT)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let text = match ShellInput::parse(&line) {
            ShellInput::Empty => continue,
            ShellInput::Quit => break,
            ShellInput::Clear => {
                conversation = new_conversation(args.system_prompt.as_deref());
                println!("Conversation cleared.");
                continue;
            }
            ShellInput::Message(text) => text,
        };
        if let Err(e) = editor.add_history_entry(text) {
            debug!(error = %e, "Failed to record history entry");
        }

        let mut turn = conversation.clone();
        turn.push_user(text);

        let outcome = if args.no_stream {
            reply_once(ctx, &args.model, &mut turn).await
        } else {
            reply_streamed(ctx, &args.model, &mut turn).await
        };

        match outcome {
            Ok(()) => conversation = turn,
            Err(err) if err.is_unreachable() => {
                return Err(err).context("Lost connection to the inference server");
            }
            Err(err) => report_turn_error(err),
        }
    }

    println!("Bye.");
    Ok(())
}

fn new_conversation(system_prompt: Option<&str>) -> Conversation {
    system_prompt.map_or_else(Conversation::new, Conversation::with_system_prompt)
}

async fn reply_once(
    ctx: &CliContext,
    model: &str,
    turn: &mut Conversation,
) -> Result<(), ClientError> {
    let response = ctx.client().chat(model, turn.messages()).await?;
    println!("{}", response.message.content);
    turn.finish_assistant(response.message);
    Ok(())
}

/// Stream a reply to stdout, folding tokens into `turn`. Ctrl+C stops the
/// reply but keeps what arrived.
async fn reply_streamed(
    ctx: &CliContext,
    model: &str,
    turn: &mut Conversation,
) -> Result<(), ClientError> {
    let interrupt = CtrlC::install();
    let history = turn.messages().to_vec();
    turn.begin_assistant();
    let mut received = 0usize;
    let mut stdout = io::stdout();

    let result = ctx
        .client()
        .chat_stream_with_cancel(
            model,
            &history,
            |token| {
                received += 1;
                turn.append_token(token);
                let _ = write!(stdout, "{token}");
                let _ = stdout.flush();
            },
            interrupt.token(),
        )
        .await;
    println!();

    match result {
        Err(ClientError::Cancelled { .. }) if received > 0 => {
            println!("[interrupted]");
            Ok(())
        }
        other => other,
    }
}

fn report_turn_error(err: ClientError) {
    let err = anyhow::Error::new(err);
    eprintln!("Error: {err}");
    if let Some(hint) = hint_for(&err) {
        eprintln!("{hint}");
    }
}
