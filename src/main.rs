use anyhow::Result;
use clap::Parser;
use csv2lua::{convert, dataset::Dataset};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Convert a CSV file into Lua table literals: a 2-D features table and an
/// optional flat target array.
#[derive(Parser, Debug)]
#[command(name = "csv2lua")]
struct Args {
    /// Input CSV file (first row is the header)
    input: PathBuf,

    /// Feature columns for the X table, in output order.
    /// Defaults to every column except the target.
    #[arg(short = 'x', long = "features", value_delimiter = ',')]
    features: Option<Vec<String>>,

    /// Target column, emitted as a flat y array
    #[arg(short = 'y', long = "target")]
    target: Option<String>,

    /// Output basename: write <basename>_X.lua and <basename>_y.lua
    /// instead of printing to stdout
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    let dataset = Dataset::from_csv_path(&args.input)?;
    info!(
        rows = dataset.num_rows(),
        columns = ?dataset.columns(),
        "loaded {}",
        args.input.display()
    );
    for row in dataset.rows().iter().take(5) {
        debug!(?row, "preview");
    }

    let conversion = convert::convert(
        &dataset,
        args.features.as_deref(),
        args.target.as_deref(),
    )?;

    match args.output {
        Some(basename) => {
            let written = convert::write_artifacts(&conversion, &basename)?;
            info!("{} file(s) written", written.len());
        }
        None => {
            print!("{}", conversion.features);
            if let Some(target) = &conversion.target {
                print!("{}", target);
            }
        }
    }

    Ok(())
}
