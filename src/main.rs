use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dialoguer::Input;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use student_desk::{Category, Config, Desk, Response};

/// Desk - Answers student admissions and academic guidance questions
#[derive(Parser)]
#[command(name = "desk", version, about)]
struct Cli {
    /// Knowledge file (TOML or JSON); overrides config and environment
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Minimum out-of-scope score to decline
    #[arg(long)]
    out_of_scope_threshold: Option<f64>,

    /// Minimum in-scope score to accept
    #[arg(long)]
    in_scope_threshold: Option<f64>,

    /// Minimum score for a responder to pick an entry
    #[arg(long)]
    match_threshold: Option<f64>,

    /// Keep stopwords when scoring
    #[arg(long)]
    keep_stopwords: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Answer questions interactively until an empty line, quit or exit
    Chat,
    /// Show how a question is classified without answering it
    Explain {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Keyword search over the knowledge base
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Maximum number of hits
        #[arg(short, long, default_value = "5")]
        top_k: usize,
    },
    /// List loaded knowledge entries
    Topics,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,student_desk=info",
        1 => "info,student_desk=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!(
        knowledge = ?config.knowledge_path,
        options = ?config.options,
        "resolved config"
    );
    let desk = config.desk()?;

    match cli.command {
        Command::Ask { text } => print_response(&desk.answer(&text.join(" ")), cli.json),
        Command::Chat => chat(&desk, cli.json),
        Command::Explain { text } => {
            let explanation = desk.explain(&text.join(" "));
            println!("{}", serde_json::to_string_pretty(&explanation)?);
            Ok(())
        }
        Command::Search { text, top_k } => search(&desk, &text.join(" "), top_k, cli.json),
        Command::Topics => topics(&desk, cli.json),
    }
}

/// Apply command-line overrides on top of file and environment config
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load()?;

    if let Some(path) = &cli.knowledge {
        config.knowledge_path = Some(path.clone());
    }
    if let Some(value) = cli.out_of_scope_threshold {
        config.options.thresholds.out_of_scope = value;
    }
    if let Some(value) = cli.in_scope_threshold {
        config.options.thresholds.in_scope = value;
    }
    if let Some(value) = cli.match_threshold {
        config.options.match_threshold = value;
    }
    if cli.keep_stopwords {
        config.options.ignore_stopwords = false;
    }

    Ok(config)
}

fn print_response(response: &Response, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        println!("{}", response.text);
    }
    Ok(())
}

fn chat(desk: &Desk, json: bool) -> anyhow::Result<()> {
    println!("Ask about admissions, study skills, orientation or careers.");
    println!("Press enter on an empty line, or type quit, to leave.\n");

    loop {
        let line: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()?;

        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
        {
            break;
        }

        print_response(&desk.answer(line), json)?;
        println!();
    }

    Ok(())
}

fn search(desk: &Desk, text: &str, top_k: usize, json: bool) -> anyhow::Result<()> {
    let hits = desk.search(text, top_k);

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matching topics.");
    }
    for hit in hits {
        println!("{:>3}  {:<20} {} ({})", hit.overlap, hit.key, hit.title, hit.category);
    }
    Ok(())
}

#[derive(Serialize)]
struct Topic<'a> {
    category: Category,
    key: &'a str,
    title: &'a str,
}

fn topics(desk: &Desk, json: bool) -> anyhow::Result<()> {
    let knowledge = desk.knowledge();
    let categories = [Category::Admissions, Category::Guidance];

    if json {
        let topics: Vec<Topic<'_>> = categories
            .iter()
            .flat_map(|&category| {
                knowledge.entries(category).iter().map(move |e| Topic {
                    category,
                    key: e.key(),
                    title: e.title(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&topics)?);
        return Ok(());
    }

    for category in categories {
        println!("{category}:");
        for entry in knowledge.entries(category) {
            println!("  {:<20} {}", entry.key(), entry.title());
        }
    }
    Ok(())
}
