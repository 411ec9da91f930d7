//! Command-line interface wiring for the `proxygen` binary.
//!
//! This module owns the clap definitions and delegates execution to the
//! submodule for each command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod common;
pub mod fit;
pub mod layout;
pub mod render;
pub mod utils;

/// Parsed CLI entrypoint for the `proxygen` binary.
#[derive(Parser, Debug)]
#[command(name = "proxygen", version, about = "Fit and render Netrunner proxy card text")]
pub struct Cli {
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fit card text into a text box and print the layout.
    Fit(fit::FitArgs),
    /// Fit card text and draw it onto a card image.
    Render(render::RenderArgs),
    #[command(subcommand)]
    Layout(layout::LayoutCommand),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Fit(args) => fit::handle(args),
        Command::Render(args) => render::handle(args),
        Command::Layout(cmd) => layout::handle(cmd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_fit_invocation() {
        let cli = Cli::try_parse_from([
            "proxygen",
            "fit",
            "--text",
            "Gain 3[credit].",
            "--kind",
            "corp-identity",
            "--font",
            "fonts/minionNR.otf",
            "--json",
        ])
        .unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit command");
        };
        assert!(args.json);
        assert_eq!(args.input.text.as_deref(), Some("Gain 3[credit]."));
        assert!(matches!(args.input.kind, Some(common::CardKindArg::CorpIdentity)));
    }

    #[test]
    fn parses_card_render_invocation() {
        let cli = Cli::try_parse_from([
            "proxygen",
            "render",
            "--card",
            "cards/ice-wall.json",
            "--templates",
            "templates",
            "-o",
            "out/ice-wall.png",
        ])
        .unwrap();
        let Command::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert!(args.input.kind.is_none());
        assert_eq!(args.templates.as_deref(), Some(std::path::Path::new("templates")));
    }

    #[test]
    fn card_and_text_inputs_conflict() {
        let result = Cli::try_parse_from([
            "proxygen", "fit", "--card", "card.json", "--text", "a",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn text_and_file_inputs_conflict() {
        let result = Cli::try_parse_from([
            "proxygen", "fit", "--text", "a", "--from", "card.txt",
        ]);
        assert!(result.is_err());
    }
}
