mod cli;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
use vecsim::Config;
use vecsim::config::{DEFAULT_EMBED_MODEL, DEFAULT_OLLAMA_URL};

/// vecsim - explore embeddings and vector similarity
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the Ollama server
    #[arg(long, global = true, env = "VECSIM_OLLAMA_URL", default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Embedding model name
    #[arg(long, global = true, env = "VECSIM_EMBED_MODEL", default_value = DEFAULT_EMBED_MODEL)]
    embed_model: String,

    /// Texts per embedding request
    #[arg(long, global = true, env = "VECSIM_BATCH_SIZE", default_value_t = 10)]
    batch_size: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive session over named vectors (default)
    Repl,

    /// Similarity report for the hand-crafted royalty features
    Features,

    /// Similarity report for royalty descriptions embedded by Ollama
    Embed,

    /// Strip stopwords from JSON-lines reviews into a training corpus
    Clean {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },

    /// Words nearest to a word in a trained word2vec model
    Nearest {
        #[arg(long)]
        model: PathBuf,
        /// Model is in binary layout
        #[arg(long)]
        binary: bool,
        word: String,
        #[arg(short, default_value_t = 10)]
        n: usize,
    },

    /// Similarity between two words in a trained word2vec model
    Compare {
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        binary: bool,
        a: String,
        b: String,
    },

    /// Embed a chunk file and find the chunks closest to a question
    Search {
        /// One chunk per line
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 5)]
        limit: usize,
        #[arg(long, default_value_t = 5)]
        num_candidates: usize,
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("vecsim=info".parse()?))
        .init();

    let args = Args::parse();

    let config = Config::default()
        .with_ollama_url(&args.ollama_url)
        .with_embed_model(&args.embed_model)
        .with_batch_size(args.batch_size);

    match args.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let mut session = cli::Session::default();
            cli::run_repl(&mut session)?;
        }
        Commands::Features => commands::features(),
        Commands::Embed => commands::embed(&config).await?,
        Commands::Clean { input, output } => commands::clean(&input, &output)?,
        Commands::Nearest { model, binary, word, n } => commands::nearest(&model, binary, &word, n)?,
        Commands::Compare { model, binary, a, b } => commands::compare(&model, binary, &a, &b)?,
        Commands::Search { input, limit, num_candidates, question } => {
            let config = config.with_search(num_candidates, limit);
            commands::search(&config, &input, &question).await?;
        }
    }

    Ok(())
}
