pub mod dat;
pub mod text;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Decode resource DAT files
    Dat {
        #[command(subcommand)]
        command: dat::DatCommands,
    },
    /// Decode a run of encoded text
    Text(text::TextArgs),
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Dat { command } => command.handle(),
            Commands::Text(text) => text.handle(),
        }
    }
}
