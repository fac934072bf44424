//! Barillet lifecycle command handlers.

use ::barillet::models::{
    BarilletDraft, BarilletId, CategoryCatalog, DurationType, ThemeDuration, ThemeType,
};
use ::barillet::services::{calculate_barillet_stats, is_valid_theme};
use ::barillet::{Barillet, Error};
use chrono::NaiveDate;
use clap::Args;

use super::AppContext;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Fields to change on a theme. Omitted fields keep their value.
#[derive(Args, Debug, Default)]
pub struct ThemeEdit {
    /// Theme type: Mixte or Comparée.
    #[arg(long = "type")]
    pub theme_type: Option<String>,

    /// Title.
    #[arg(long)]
    pub title: Option<String>,

    /// Participation.
    #[arg(long)]
    pub participation: Option<String>,

    /// Category.
    #[arg(long)]
    pub category: Option<String>,

    /// Duration value (`3:00`, `2 fois 2:30`, or free text with --special).
    #[arg(long)]
    pub duration: Option<String>,

    /// Treat the duration as free text.
    #[arg(long)]
    pub special: bool,

    /// Mark the duration as a maximum.
    #[arg(long)]
    pub maximum: Option<bool>,

    /// Notes.
    #[arg(long)]
    pub notes: Option<String>,
}

fn parse_date(text: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput(format!("invalid date '{text}', expected YYYY-MM-DD")))
}

/// Executes the new command.
pub fn cmd_new(
    ctx: &AppContext,
    title: Option<String>,
    date: Option<String>,
    location: Option<String>,
) -> CmdResult {
    let mut draft = BarilletDraft::default();
    if let Some(title) = title {
        draft = draft.with_title(title);
    }
    if let Some(date) = date.as_deref() {
        draft = draft.with_date(parse_date(date)?);
    }
    if let Some(location) = location {
        draft = draft.with_location(location);
    }

    let id = ctx.service.create(&ctx.session, draft)?;
    println!("Created barillet {id}");
    Ok(())
}

/// Executes the list command.
pub fn cmd_list(ctx: &AppContext) -> CmdResult {
    ctx.session.require_identity()?;
    let barillets = ctx.service.list(&ctx.session)?;
    if barillets.is_empty() {
        println!("No barillets yet. Create one with `barillet new`.");
        return Ok(());
    }

    for barillet in &barillets {
        let stats = calculate_barillet_stats(barillet);
        let date = barillet
            .date
            .map_or_else(|| "----------".to_string(), |d| d.to_string());
        println!(
            "{:<34} {date} {:>8}  {}",
            barillet.id.as_ref().map_or("", BarilletId::as_str),
            stats.total_duration,
            barillet.title
        );
    }
    Ok(())
}

/// Executes the show command.
pub fn cmd_show(ctx: &AppContext, id: &str, json: bool) -> CmdResult {
    let barillet = ctx.owned(id)?;
    if json {
        let document = ::barillet::io::ExportableBarillet::from(&barillet);
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }
    print_barillet(&barillet);
    Ok(())
}

fn print_barillet(barillet: &Barillet) {
    let stats = calculate_barillet_stats(barillet);

    println!("{}", barillet.title);
    println!("{}", "=".repeat(barillet.title.chars().count().max(8)));
    if let Some(date) = barillet.date {
        println!("Date:      {}", date.format("%d/%m/%Y"));
    }
    if !barillet.location.is_empty() {
        println!("Lieu:      {}", barillet.location);
    }
    println!("Durée:     {}", stats.total_duration);
    println!(
        "Types:     {} Mixte / {} Comparée",
        stats.type_proportions.mixte, stats.type_proportions.comparee
    );
    println!("Libre:     {} ({}%)", stats.libre_count, stats.libre_percentage);
    println!();

    for (index, theme) in barillet.themes.iter().enumerate() {
        let flag = if is_valid_theme(theme) { ' ' } else { '!' };
        let maximum = if theme.duration.maximum { " max" } else { "" };
        println!(
            "{flag}{:>2}. {:<9} {:<30} {:<12} {:<16} {}{maximum}",
            index + 1,
            theme.theme_type.as_str(),
            theme.title_or_empty(),
            theme.participation,
            theme.category,
            theme.duration.value,
        );
        if !theme.notes.trim().is_empty() {
            println!("     {}", theme.notes);
        }
    }
}

/// Executes the edit-theme command.
pub fn cmd_edit_theme(ctx: &AppContext, id: &str, number: usize, edit: ThemeEdit) -> CmdResult {
    let barillet = ctx.owned(id)?;
    let index = number
        .checked_sub(1)
        .filter(|i| *i < barillet.themes.len())
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "theme number must be between 1 and {}",
                barillet.themes.len()
            ))
        })?;
    let mut theme = barillet.themes[index].clone();

    if let Some(name) = edit.theme_type.as_deref() {
        theme.theme_type = ThemeType::parse(name)
            .ok_or_else(|| Error::InvalidInput(format!("unknown theme type '{name}'")))?;
    }
    if let Some(title) = edit.title {
        theme.title = Some(title);
    }
    if let Some(participation) = edit.participation {
        theme.participation = participation;
    }
    if let Some(category) = edit.category {
        theme.category = category;
    }
    if let Some(value) = edit.duration {
        let maximum = theme.duration.maximum;
        theme.duration = if edit.special {
            ThemeDuration::special(value)
        } else {
            ThemeDuration::fixed(value)
        }
        .with_maximum(maximum);
    } else if edit.special && theme.duration.kind == DurationType::Fixed {
        theme.duration.toggle_type();
    }
    if let Some(maximum) = edit.maximum {
        theme.duration.maximum = maximum;
    }
    if let Some(notes) = edit.notes {
        theme.notes = notes;
    }

    let barillet_id = BarilletId::new(id);
    let updated = ctx.service.update_theme(&barillet_id, index, theme)?;
    println!("Updated theme {number} of {}", updated.title);
    Ok(())
}

/// Executes the duplicate command.
pub fn cmd_duplicate(ctx: &AppContext, id: &str) -> CmdResult {
    let copy = ctx.service.duplicate(&ctx.session, &BarilletId::new(id))?;
    println!("Created copy {copy}");
    Ok(())
}

/// Executes the delete command.
pub fn cmd_delete(ctx: &AppContext, id: &str) -> CmdResult {
    let barillet = ctx.owned(id)?;
    let deleted = ctx.service.delete(&BarilletId::new(id))?;
    if deleted {
        println!("Deleted {}", barillet.title);
    } else {
        println!("Nothing to delete");
    }
    Ok(())
}

/// Executes the categories command.
pub fn cmd_categories() {
    for preset in CategoryCatalog::new().categories() {
        println!("{:<18} {}", preset.name, preset.description);
    }
}
