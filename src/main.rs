use anyhow::Result;
use chainlog_core::{CommitHistory, CommitId};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chainlog")]
#[command(about = "An in-memory linear commit history", long_about = None)]
struct Cli {
    /// Name of the history
    #[arg(short, long, default_value = "chainlog")]
    name: String,

    /// Read commands from a script file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut history = CommitHistory::new(cli.name)?;

    match cli.file {
        Some(path) => {
            let reader = BufReader::new(File::open(&path)?);
            run(reader, &mut history)
        }
        None => run(io::stdin().lock(), &mut history),
    }
}

/// Interpret one command per line until EOF or `quit`.
fn run<R: BufRead>(reader: R, history: &mut CommitHistory) -> Result<()> {
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match execute(history, line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}

/// Run a single command; Ok(false) ends the session.
fn execute(history: &mut CommitHistory, line: &str) -> Result<bool> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "commit" => {
            let id = history.commit(rest);
            println!("Created commit: {}", id);
        }
        "log" => {
            let count: usize = parse_count(rest)?;
            let rendered = history.history(count)?;
            if rendered.is_empty() {
                println!("No commits");
            } else {
                println!("{}", rendered);
            }
        }
        "head" => match history.head_id() {
            Some(id) => println!("{}", id),
            None => println!("No commits"),
        },
        "describe" => {
            println!("{}", history.describe());
        }
        "contains" => {
            let id = parse_id(rest)?;
            println!("{}", history.contains(id));
        }
        "reset" => {
            let count: usize = parse_count(rest)?;
            history.reset(count)?;
            println!("{}", history.describe());
        }
        "drop" => {
            let id = parse_id(rest)?;
            if history.drop_commit(id) {
                println!("Dropped commit: {}", id);
            } else {
                println!("No such commit: {}", id);
            }
        }
        "squash" => {
            let id = parse_id(rest)?;
            if history.squash(id) {
                println!("Squashed into: {}", history.describe());
            } else {
                println!("Nothing to squash at: {}", id);
            }
        }
        "export" => {
            let commits = history.commits(usize::MAX)?;
            println!("{}", serde_json::to_string_pretty(&commits)?);
        }
        "quit" | "exit" => return Ok(false),
        other => {
            eprintln!("unknown command: {}", other);
        }
    }

    Ok(true)
}

fn parse_count(arg: &str) -> Result<usize> {
    arg.parse()
        .map_err(|_| anyhow::anyhow!("expected a positive count, got '{}'", arg))
}

fn parse_id(arg: &str) -> Result<CommitId> {
    arg.parse()
        .map_err(|_| anyhow::anyhow!("expected a commit id, got '{}'", arg))
}
