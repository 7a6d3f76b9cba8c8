use clap::Parser;
use quire::{ConversionOptions, Converter, PipelineError};
use std::fs;
use std::path::PathBuf;

/// Converts a HAST JSON tree into a document definition for the layout engine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Parsed document tree (HAST JSON)
    #[arg(long)]
    tree: PathBuf,

    /// Raw source text used to detect which scripts need fonts
    #[arg(long)]
    source: Option<PathBuf>,

    /// Conversion options (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the document definition; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Never fetch images or fonts over the network
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let args = Args::parse();

    let options = match &args.config {
        Some(path) => ConversionOptions::from_path(path)?,
        None => ConversionOptions::default(),
    };
    let mut converter = Converter::new(options);
    if args.offline {
        converter = converter.offline();
    }

    let tree = fs::read_to_string(&args.tree)?;
    let source = args.source.as_ref().map(fs::read_to_string).transpose()?;

    log::info!("Converting {}", args.tree.display());
    let document = converter.convert_json(&tree, source.as_deref()).await?;
    let json = document.to_json_pretty()?;

    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
