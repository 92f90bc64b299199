//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{AttributePrinter, Document, NamePrinter};
use crate::infrastructure::{write_document_with, InfraError};
use crate::sample::{apply_sample_edits, sample_document};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".to_string()));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    let mut document = sample_document()?;

    match command {
        Commands::Show => show(&document, &settings),
        Commands::Names => names(&mut document),
        Commands::Attributes => attributes(&mut document),
        Commands::Find { expr } => find(&document, &settings, expr),
        Commands::Export { output, raw } => {
            let path = output.as_deref().unwrap_or(settings.output.as_path());
            export(&mut document, &settings, path, *raw)
        }
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip_all)]
fn show(document: &Document, settings: &Settings) -> CliResult<()> {
    output::info(&document.render_with(&settings.renderer()));
    Ok(())
}

#[instrument(skip_all)]
fn names(document: &mut Document) -> CliResult<()> {
    output::header("Element names:");
    let mut printer = NamePrinter::new(io::stdout().lock());
    document.accept(&mut printer);
    let _stdout = printer
        .finish()
        .map_err(|e| InfraError::io("print element names", e))?;
    Ok(())
}

#[instrument(skip_all)]
fn attributes(document: &mut Document) -> CliResult<()> {
    output::header("Attributes:");
    let mut printer = AttributePrinter::new(io::stdout().lock());
    document.accept(&mut printer);
    let _stdout = printer
        .finish()
        .map_err(|e| InfraError::io("print attributes", e))?;
    Ok(())
}

#[instrument(skip(document, settings))]
fn find(document: &Document, settings: &Settings, expr: &str) -> CliResult<()> {
    let matches = document.find(expr);
    if matches.is_empty() {
        output::warning(&format!("no element matches '{expr}'"));
        return Ok(());
    }
    let renderer = settings.renderer();
    for id in matches {
        output::info(&renderer.render(document.tree(), id));
    }
    Ok(())
}

#[instrument(skip(document, settings))]
fn export(document: &mut Document, settings: &Settings, path: &Path, raw: bool) -> CliResult<()> {
    if !raw {
        apply_sample_edits(document)?;
    }
    write_document_with(document, path, &settings.renderer())?;
    output::action("Written", &path.display());
    Ok(())
}
