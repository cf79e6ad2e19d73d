use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Args)]
pub struct TextArgs {
    /// A file holding encoded text
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Offset of the first byte to decode
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Number of bytes to decode, the rest of the file when omitted
    #[arg(long)]
    length: Option<usize>,
}

impl TextArgs {
    pub fn handle(&self) -> Result<()> {
        let bytes = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let length = self
            .length
            .unwrap_or_else(|| bytes.len().saturating_sub(self.offset));

        let text = ffxi_text::decode_range(&bytes, self.offset, length)?;
        println!("{}", text.to_string_lossy());

        Ok(())
    }
}
