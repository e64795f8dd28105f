use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use bubblegraph::data::Table;
use bubblegraph::parser::parse_controls;
use bubblegraph::render::render_png;
use bubblegraph::runtime::Session;
use bubblegraph::{csv_reader, synth, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "bubblegraph")]
#[command(about = "Aggregate categorical data and emit bubble chart specs", long_about = None)]
struct Args {
    /// Control string (e.g., 'bubble(x: Category1, y: Category2) | color(Category3)')
    controls: String,

    /// Read a headered CSV table from stdin instead of synthesizing one
    #[arg(long)]
    stdin: bool,

    /// Read a JSON array of record objects from stdin
    #[arg(long, conflicts_with = "stdin")]
    json: bool,

    /// Name of the per-record count column
    #[arg(long, default_value = "Profiles")]
    count_column: String,

    /// Rows to synthesize when no CSV is piped in
    #[arg(long, default_value_t = 1000)]
    rows: usize,

    /// RNG seed for the synthetic table
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Emit a rendered PNG instead of the JSON chart spec
    #[arg(long)]
    png: bool,

    /// Rendered image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Rendered image height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Parse the control string
    let selection = match parse_controls(&args.controls) {
        Ok((remaining, selection)) => {
            if !remaining.trim().is_empty() {
                eprintln!("Warning: unparsed input: '{}'", remaining);
            }
            selection
        }
        Err(e) => {
            eprintln!("Parse error: {:?}", e);
            std::process::exit(1);
        }
    };

    // Build the record table
    let table = if args.json {
        let value: serde_json::Value = serde_json::from_reader(io::stdin().lock())
            .context("Failed to read JSON from stdin")?;
        Table::from_json(&value).context("Failed to build table from JSON")?
    } else if args.stdin {
        let csv_data = csv_reader::read_csv_from_stdin()
            .context("Failed to read CSV from stdin")?;
        Table::from_csv(csv_data)
    } else {
        synth::profile_table(args.rows, args.seed)
    };

    let session = Session::new(table, &args.count_column, selection)
        .context("Failed to build chart pipeline")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.png {
        let options = RenderOptions {
            width: args.width,
            height: args.height,
        };
        let png_bytes = render_png(session.spec(), &options)
            .context("Failed to render chart")?;
        handle
            .write_all(&png_bytes)
            .context("Failed to write PNG to stdout")?;
    } else {
        serde_json::to_writer_pretty(&mut handle, session.spec())
            .context("Failed to write chart spec to stdout")?;
        handle.write_all(b"\n").context("Failed to write to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
