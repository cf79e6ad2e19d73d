use clap::Args;
use ffxi_dat::{BitCountRotation, ParseOptions, ResourceModel, ResourceParser};
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct ItemsArgs {
    /// The English item table
    #[arg(short, long, value_name = "FILE")]
    english: PathBuf,

    /// The Japanese item table holding the same items
    #[arg(short, long, value_name = "FILE")]
    japanese: PathBuf,

    /// A target JSON file, stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ItemsArgs {
    pub fn handle(&self) -> Result<()> {
        let mut english = super::open(&self.english)?;
        let mut japanese = super::open(&self.japanese)?;

        let mut model = ResourceModel::new();
        ResourceParser::new(&BitCountRotation, &mut model, ParseOptions::default())
            .parse_items(&mut english, &mut japanese)
            .context(format!(
                "parsing {} and {}",
                self.english.display(),
                self.japanese.display()
            ))?;

        info!(
            items = model.items.len(),
            monstrosity = model.monstrosity.len(),
            "decoded item tables"
        );

        super::write_json(&model, self.output.as_deref(), self.overwrite)
    }
}
