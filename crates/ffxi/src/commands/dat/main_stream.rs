use clap::{Args, ValueEnum};
use ffxi_dat::{BitCountRotation, ParseOptions, ResourceModel, ResourceParser, SpellValidity};
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct MainArgs {
    /// An input DAT file holding ability and spell tables
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target JSON file, stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Rule used to drop placeholder spells
    #[arg(long, value_enum, default_value_t)]
    spell_validity: ValidityArg,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum ValidityArg {
    /// Drop spells no job can learn
    #[default]
    AnySlot,
    /// Drop spells whose first job slot is unset
    FirstSlot,
    /// Keep every spell
    KeepAll,
}

impl From<ValidityArg> for SpellValidity {
    fn from(value: ValidityArg) -> Self {
        match value {
            ValidityArg::FirstSlot => SpellValidity::FirstSlot,
            ValidityArg::AnySlot => SpellValidity::AnySlot,
            ValidityArg::KeepAll => SpellValidity::KeepAll,
        }
    }
}

impl MainArgs {
    pub fn handle(&self) -> Result<()> {
        let mut reader = super::open(&self.file)?;
        let options = ParseOptions::builder()
            .spell_validity(self.spell_validity.into())
            .build();

        let mut model = ResourceModel::new();
        ResourceParser::new(&BitCountRotation, &mut model, options)
            .parse_main_stream(&mut reader)
            .context(format!("parsing {}", self.file.display()))?;

        info!(
            actions = model.actions.len(),
            recasts = model.ability_recasts.len(),
            spells = model.spells.len(),
            "decoded {}",
            self.file.display()
        );

        super::write_json(&model, self.output.as_deref(), self.overwrite)
    }
}
