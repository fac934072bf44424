//! Import and export command handlers.

use std::path::{Path, PathBuf};

use ::barillet::io::{ExportService, Format, ImportService};

use super::AppContext;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Executes the import command.
pub fn cmd_import(ctx: &AppContext, file: &Path) -> CmdResult {
    let service = ImportService::new(ctx.service.clone());
    let id = service.import_from_file(file, &ctx.session)?;
    let barillet = ctx.service.get(&id)?;
    println!("Imported \"{}\" as {id}", barillet.title);
    Ok(())
}

/// Executes the export command.
pub fn cmd_export(ctx: &AppContext, id: &str, format: &str, output: Option<PathBuf>) -> CmdResult {
    let format: Format = format.parse()?;
    let barillet = ctx.owned(id)?;
    let dir = output.unwrap_or_else(|| ctx.config.export_dir.clone());

    let path = ExportService::new().export_to_dir(&barillet, format, &dir)?;
    println!("Wrote {}", path.display());
    Ok(())
}
