use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use evidence_chat::config::Config;
use evidence_chat::evidence::{classify_by_extension, read_archive_file, reconcile};
use evidence_chat::render::{render_outcome, render_upload};
use evidence_chat::session::{Session, UploadStatus};
use evidence_chat::upstream::RawUpstreamReply;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evidence-chat")]
#[command(about = "Evidence triage assistant for hosted AI endpoints", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: platform config dir, e.g. ~/.config/evidence-chat/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat (/upload PATH, /files, /clear, /quit)
    Chat(SessionArgs),

    /// Ask a single question
    Ask {
        /// Question text; may be empty when an archive is given
        #[arg(default_value = "")]
        question: String,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// List the files of an evidence archive
    Inspect {
        path: PathBuf,

        /// Print metadata as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify filenames by extension
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Reconcile a saved upstream reply against a list of filenames
    Reconcile {
        /// File holding the raw reply body
        #[arg(long)]
        reply: PathBuf,

        /// Comma-separated evidence filenames
        #[arg(long, value_delimiter = ',')]
        files: Vec<String>,

        /// HTTP status the reply came with (non-2xx makes it a transport error)
        #[arg(long)]
        status: Option<u16>,
    },
}

#[derive(Args)]
struct SessionArgs {
    /// Evidence archive to upload before the first turn
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Answer from the built-in knowledge base even if an endpoint is configured
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Chat(args) => {
            let session = open_session(&config, &args).await?;
            run_chat(session).await
        }
        Commands::Ask { question, session } => {
            let mut chat = open_session(&config, &session).await?;
            match chat.ask(&question).await {
                Some(outcome) => println!("{}", render_outcome(&outcome)),
                None => println!("Nothing to ask: give a question or an --archive."),
            }
            Ok(())
        }
        Commands::Inspect { path, json } => inspect(&config, &path, json).await,
        Commands::Classify { names } => {
            for name in names {
                let (label, mime) = classify_by_extension(&name);
                println!("{name}\t{label}\t{mime}");
            }
            Ok(())
        }
        Commands::Reconcile {
            reply,
            files,
            status,
        } => {
            let body = tokio::fs::read_to_string(&reply)
                .await
                .with_context(|| format!("Failed to read {}", reply.display()))?;
            let raw = match status {
                Some(code) if !(200..300).contains(&code) => {
                    RawUpstreamReply::TransportError(format!("HTTP {code}: {}", body.trim()))
                }
                _ => RawUpstreamReply::from_body(&body),
            };
            let outcome = reconcile(&raw, &files, &config.reconcile.policy());
            println!("{}", render_outcome(&outcome));
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "evidence_chat=debug" } else { "evidence_chat=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn open_session(config: &Config, args: &SessionArgs) -> Result<Session> {
    let mut session = if args.offline {
        Session::offline(config)
    } else {
        Session::from_config(config)?
    };
    if let Some(path) = &args.archive {
        let status = session.upload_archive_file(path).await;
        eprintln!("{}", render_upload(&status));
    }
    Ok(session)
}

async fn inspect(config: &Config, path: &Path, json: bool) -> Result<()> {
    let files = read_archive_file(path, &config.upload.archive_options())
        .await
        .with_context(|| format!("Failed to read archive {}", path.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }
    for file in &files {
        println!("{}\t{}\t{}\t{} bytes", file.path, file.file_type, file.mime, file.size_bytes);
    }
    println!("{} file(s)", files.len());
    Ok(())
}

async fn run_chat(mut session: Session) -> Result<()> {
    let mode = if session.is_online() { "online" } else { "offline" };
    println!("Evidence triage chat ({mode}). Commands: /upload PATH, /files, /clear, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        if line == "/quit" || line == "/exit" {
            break;
        } else if line == "/files" {
            match session.evidence() {
                Some(set) if !set.is_empty() => {
                    for file in &set.files {
                        println!("  {} ({}, {} bytes)", file.path, file.file_type, file.size_bytes);
                    }
                }
                _ => println!("No evidence loaded."),
            }
        } else if line == "/clear" {
            session.clear_evidence();
            println!("Evidence cleared.");
        } else if let Some(path) = line.strip_prefix("/upload ") {
            let expanded = shellexpand::tilde(path.trim()).to_string();
            let status = session.upload_archive_file(Path::new(&expanded)).await;
            println!("{}", render_upload(&status));
            if let UploadStatus::Accepted { .. } = status {
                // Let the assistant describe the new evidence right away.
                if let Some(outcome) = session.ask("").await {
                    println!("{}\n", render_outcome(&outcome));
                }
            }
        } else if let Some(outcome) = session.ask(line).await {
            println!("{}\n", render_outcome(&outcome));
        }
    }
    Ok(())
}
