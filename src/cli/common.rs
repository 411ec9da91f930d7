//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use proxygen::CardKind;

/// Card kind selector used by several commands.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum CardKindArg {
    Event,
    Hardware,
    Resource,
    Program,
    RunnerIdentity,
    CorpIdentity,
    Agenda,
    Asset,
    Upgrade,
    Ice,
    Operation,
}

impl From<CardKindArg> for CardKind {
    fn from(value: CardKindArg) -> CardKind {
        match value {
            CardKindArg::Event => CardKind::Event,
            CardKindArg::Hardware => CardKind::Hardware,
            CardKindArg::Resource => CardKind::Resource,
            CardKindArg::Program => CardKind::Program,
            CardKindArg::RunnerIdentity => CardKind::RunnerIdentity,
            CardKindArg::CorpIdentity => CardKind::CorpIdentity,
            CardKindArg::Agenda => CardKind::Agenda,
            CardKindArg::Asset => CardKind::Asset,
            CardKindArg::Upgrade => CardKind::Upgrade,
            CardKindArg::Ice => CardKind::Ice,
            CardKindArg::Operation => CardKind::Operation,
        }
    }
}

/// Text source, layout and font options shared by `fit` and `render`.
#[derive(Args, Debug)]
pub struct FitInputArgs {
    /// Card text, markup allowed.
    #[arg(long, conflicts_with_all = ["from", "card"])]
    pub text: Option<String>,
    /// Load card text from file (`-` for stdin).
    #[arg(long = "from", conflicts_with = "card")]
    pub from: Option<PathBuf>,
    /// Card face as JSON; supplies the text, kind and fixed fields.
    #[arg(long)]
    pub card: Option<PathBuf>,
    /// Card kind selecting the text box (defaults to the card's own kind, else event).
    #[arg(long, value_enum)]
    pub kind: Option<CardKindArg>,
    /// Font file; overrides `text_font` from the layout config.
    #[arg(long)]
    pub font: Option<PathBuf>,
    /// TOML layout config (defaults to the built-in table).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fit the text as given, without markup substitution.
    #[arg(long)]
    pub raw: bool,
    /// Override the starting font size.
    #[arg(long = "start-size")]
    pub start_size: Option<u32>,
    /// Override the minimum font size.
    #[arg(long = "min-size")]
    pub min_size: Option<u32>,
}
