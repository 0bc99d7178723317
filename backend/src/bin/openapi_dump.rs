//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::Result;
use users_api::ApiDoc;
use utoipa::OpenApi;

/// Command-line options for the dump.
#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the OpenAPI document as JSON")]
struct Cli {
    /// Indent the output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let json = if cli.pretty {
        doc.to_pretty_json()?
    } else {
        doc.to_json()?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
