mod explorer;
mod trie;

use std::env;

use clap::Parser;
use explorer::session::{Outcome, Session, SessionConfig};
use simple_log::LogConfigBuilder;
use simple_log::{error, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const PROMPT: &str = "trie> ";

#[derive(Parser, Debug)]
#[command(version, about = "Interactive prefix tree explorer", long_about = None)]
struct ExplorerArgs {
    /// Word files to load at startup, glob patterns allowed
    #[arg(long)]
    words: Vec<String>,
    /// Do not load the initial word list into an empty trie
    #[arg(long)]
    no_initial: bool,
    #[arg(long, default_value_t = 10)]
    limit: usize,
    #[arg(long, default_value_t = 7)]
    tree_depth: usize,
    #[arg(long)]
    debug: bool,
}

impl From<&ExplorerArgs> for SessionConfig {
    fn from(args: &ExplorerArgs) -> Self {
        SessionConfig {
            limit: args.limit,
            tree_depth: args.tree_depth,
        }
    }
}

fn setup_debug_logging() {
    let mut temp_dir = env::temp_dir();
    temp_dir.push("trie-explorer.log");
    if let Some(log_path) = temp_dir.to_str() {
        let config = LogConfigBuilder::builder()
            .path(log_path)
            .build();
        if let Err(_e) = simple_log::new(config) {
            eprintln!("fail to setup log {}", log_path);
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = ExplorerArgs::parse();

    if args.debug {
        setup_debug_logging();
    }

    let session = Session::new(SessionConfig::from(&args));
    for pattern in args.words.iter() {
        match session.load_pattern(pattern).await {
            Ok(added) => println!("loaded {} words from {}", added, pattern),
            Err(e) => {
                error!("failed to load {}: {}", pattern, e);
                eprintln!("error: {}", e);
            }
        }
    }
    if !args.no_initial {
        session.load_initial().await;
    }
    info!("explorer started with {} words", session.word_count().await);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout.write_all(PROMPT.as_bytes()).await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        match session.execute(&line).await {
            Outcome::Quit => break,
            Outcome::Nothing => {}
            outcome => {
                stdout.write_all(format!("{}\n", outcome).as_bytes()).await?;
            }
        }
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("explorer finished");
    Ok(())
}
