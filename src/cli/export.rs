//! CLI commands for data export
//!
//! Writes the signed-in user's data to a file, or to stdout when no output
//! path is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use super::context::CliContext;
use crate::error::{PlannerError, PlannerResult};
use crate::export::{export_full_json, export_full_yaml, export_items_csv, FullExport};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (budget items, or the summary with --summary)
    Csv,
    /// JSON format (everything)
    Json,
    /// YAML format (everything, human-readable)
    Yaml,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file path (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// With CSV, export the budget summary instead of the items
    #[arg(long)]
    pub summary: bool,
}

fn create_output(output: &Path) -> PlannerResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        PlannerError::Export(format!(
            "Gagal membuat file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn write_export<W: Write>(ctx: &CliContext, args: &ExportArgs, writer: &mut W) -> PlannerResult<()> {
    match args.format {
        ExportFormat::Csv if args.summary => ctx.app.summary().export_csv(&mut *writer)?,
        ExportFormat::Csv => export_items_csv(&ctx.app.items(), &mut *writer)?,
        ExportFormat::Json => {
            let export = FullExport::from_app(&ctx.app)?;
            export_full_json(&export, writer, args.pretty)?;
            writeln!(writer)?;
        }
        ExportFormat::Yaml => {
            let export = FullExport::from_app(&ctx.app)?;
            export_full_yaml(&export, writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Handle the export command
pub fn handle_export_command(ctx: &mut CliContext, args: ExportArgs) -> PlannerResult<()> {
    match &args.output {
        Some(output) => {
            let mut writer = create_output(output)?;
            write_export(ctx, &args, &mut writer)?;
            println!("Data diekspor ke: {}", output.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(ctx, &args, &mut writer)?;
        }
    }
    Ok(())
}
