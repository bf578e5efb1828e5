use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use string_compress::config::EngineConfig;
use string_compress::{CompressionEngine, TreeDumpStyle};

#[derive(Debug, Parser)]
#[command(name = "string-compress")]
#[command(about = "Huffman-compress a string and show the tree, payload size and ratio")]
struct Args {
    /// Text to compress; read from stdin when omitted.
    text: Option<String>,

    /// JSON engine configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Print the tree one node per line.
    #[arg(long)]
    indented: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if args.indented {
        config.tree_style = TreeDumpStyle::Indented;
    }

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading text from stdin")?;
            buf
        }
    };

    let mut engine = CompressionEngine::new(config);
    engine.set_string(&text);
    let report = engine.report()?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
