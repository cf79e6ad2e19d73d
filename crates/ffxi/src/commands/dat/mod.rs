pub mod items;
pub mod main_stream;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use miette::{Context, IntoDiagnostic, Result};
use serde::Serialize;
use tracing::info;

#[derive(clap::Subcommand)]
pub enum DatCommands {
    /// Decode the abilities and spells of a main resource stream
    Main(main_stream::MainArgs),
    /// Decode a pair of English and Japanese item tables
    Items(items::ItemsArgs),
}

impl DatCommands {
    pub fn handle(&self) -> Result<()> {
        match self {
            DatCommands::Main(main) => main.handle(),
            DatCommands::Items(items) => items.handle(),
        }
    }
}

fn open(path: &Path) -> Result<std::io::BufReader<File>> {
    let file = File::open(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))?;
    Ok(std::io::BufReader::new(file))
}

/// Write `value` as pretty JSON to `output`, or stdout when there is none.
fn write_json(value: &impl Serialize, output: Option<&Path>, overwrite: bool) -> Result<()> {
    let Some(path) = output else {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, value).into_diagnostic()?;
        return writeln!(stdout).into_diagnostic();
    };

    info!("writing {}", path.display());
    let out = if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))?
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))?
    };

    let mut out = BufWriter::new(out);
    serde_json::to_writer_pretty(&mut out, value).into_diagnostic()?;
    out.flush().into_diagnostic()
}
