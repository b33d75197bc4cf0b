//! `memo` – command-line view over a memo-server.
//!
//! Without a subcommand it opens an interactive session: every line is a new
//! note (Enter submits; end a line with `\` to continue the note on the next
//! line), `:rm <id>` deletes, `:reload` refreshes and `:q` quits.  After a
//! failed save an empty line retries it.

use anyhow::bail;
use clap::{Parser, Subcommand};
use memo_client::{HttpNotesApi, NoteSession, NotesApi, Prompt, Step, view};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "memo", version, about = "Timestamped quick notes")]
struct Cli {
    /// memo-server root URL.
    #[arg(long, env = "MEMO_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server: String,

    /// `tracing` filter for client diagnostics (written to stderr).
    #[arg(long, env = "MEMO_LOG", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every note, newest first.
    List,
    /// Save a new note.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Delete a note by id.
    Rm { id: String },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = cli
        .log
        .parse::<tracing_subscriber::EnvFilter>()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let session = NoteSession::new(HttpNotesApi::new(&cli.server)?);

    match cli.command {
        Some(Command::List) => {
            session.reload().await;
            print_view(&session);
        }
        Some(Command::Add { text }) => {
            session.set_input(text.join(" "));
            if !session.submit().await {
                bail!("{}", memo_types::CONTENT_REQUIRED);
            }
            if let Some(note) = session.snapshot().notes.first() {
                println!("{}  [{}]", view::format_timestamp(&note.created_at), note.id);
            }
        }
        Some(Command::Rm { id }) => session.delete(&id).await,
        None => interactive(&session).await?,
    }

    if let Some(error) = session.snapshot().error {
        bail!(error);
    }
    Ok(())
}

async fn interactive<A: NotesApi>(session: &NoteSession<A>) -> anyhow::Result<()> {
    session.reload().await;
    print_view(session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut prompt = Prompt::new();
    while let Some(line) = lines.next_line().await? {
        match prompt.feed(session, &line).await {
            Step::Quit => break,
            Step::Render => print_view(session),
            Step::MissingId => eprintln!("{}", memo_types::ID_REQUIRED),
            Step::Idle => {}
        }
    }
    Ok(())
}

fn print_view<A: NotesApi>(session: &NoteSession<A>) {
    for line in view::render(&session.snapshot()) {
        println!("{line}");
    }
}
