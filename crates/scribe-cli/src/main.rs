use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::sync::mpsc;

use scribe_core::{ChangeListener, DocumentAdapter, EditorEvent, TextDocument};
use scribe_llm::{create_provider, ProviderConfig};
use scribe_loop::{EditorSession, SessionConfig};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Terminal front end for the scribe continuation session")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive writing session
    Write,
    /// Continue a single piece of text and exit
    Continue {
        /// Text to continue
        text: String,
    },
}

/// Document decorator that echoes appended text to the terminal while a
/// reveal is running, so the animation is visible as it lands.
struct EchoDocument {
    inner: TextDocument,
    live: AtomicBool,
}

impl EchoDocument {
    fn new() -> Self {
        Self {
            inner: TextDocument::new(),
            live: AtomicBool::new(false),
        }
    }

    fn set_live(&self, live: bool) {
        self.live.store(live, Ordering::SeqCst);
    }
}

impl DocumentAdapter for EchoDocument {
    fn plain_text(&self) -> String {
        self.inner.plain_text()
    }

    fn append_text(&self, text: &str) {
        if self.live.load(Ordering::SeqCst) {
            print!("{}", text.cyan());
            let _ = io::stdout().flush();
        }
        self.inner.append_text(text);
    }

    fn clear(&self) {
        self.inner.clear();
    }

    fn move_cursor_to_end(&self) {
        self.inner.move_cursor_to_end();
    }

    fn on_change(&self, listener: ChangeListener) {
        self.inner.on_change(listener);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    let provider = match create_provider(&ProviderConfig::from_env()) {
        Ok(provider) => provider,
        Err(error) => {
            eprintln!("{}", format!("Provider setup failed: {error}").red());
            eprintln!("Set OPENAI_API_KEY (or HF_API_KEY with SCRIBE_PROVIDER=huggingface).");
            std::process::exit(1);
        }
    };

    let document = Arc::new(EchoDocument::new());
    let adapter: Arc<dyn DocumentAdapter> = document.clone();
    let (session, events) = EditorSession::new(adapter, provider, SessionConfig::default());

    match cli.command {
        Commands::Write => run_write(session, events, document).await,
        Commands::Continue { text } => run_continue(session, events, document, text).await,
    }

    Ok(())
}

async fn run_write(
    session: EditorSession,
    mut events: mpsc::Receiver<EditorEvent>,
    document: Arc<EchoDocument>,
) {
    println!(
        "{}",
        "Type prose to build the document. /continue asks the AI to carry on, \
/show prints the document, /reset starts over, /quit exits."
            .dimmed()
    );

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".bold());
        let _ = io::stdout().flush();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }

        match line.trim() {
            "/quit" => break,
            "/show" => println!("{}", document.plain_text()),
            "/reset" => {
                session.reset().await;
                drain(&mut events);
                println!("{}", "(document cleared)".yellow());
            }
            "/continue" => {
                if !session.submit().await {
                    println!(
                        "{}",
                        "(nothing to continue — type some text first, or wait a moment)".yellow()
                    );
                    continue;
                }
                document.set_live(true);
                wait_for_outcome(&mut events).await;
                document.set_live(false);
                println!();
            }
            "" => {}
            text => document.append_text(&format!("{text}\n")),
        }
    }
}

async fn run_continue(
    session: EditorSession,
    mut events: mpsc::Receiver<EditorEvent>,
    document: Arc<EchoDocument>,
    text: String,
) {
    document.append_text(&text);
    print!("{text}");
    let _ = io::stdout().flush();

    if !session.submit().await {
        eprintln!("{}", "Nothing to continue: text is empty.".red());
        return;
    }

    document.set_live(true);
    wait_for_outcome(&mut events).await;
    document.set_live(false);
    println!();
}

/// Consume events until the current request settles one way or the other.
async fn wait_for_outcome(events: &mut mpsc::Receiver<EditorEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            EditorEvent::RevealFinished { .. } => break,
            EditorEvent::RequestFailed { reason } => {
                eprintln!("{}", format!("\nerror: {reason}").red());
                break;
            }
            _ => {}
        }
    }
}

/// Drop any events left over from a settled request (e.g. the error-cleared
/// notification after a failure).
fn drain(events: &mut mpsc::Receiver<EditorEvent>) {
    while events.try_recv().is_ok() {}
}
