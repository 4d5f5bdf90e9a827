use std::error::Error;
use std::path::Path;

use tally_core::{
    RecordedLedger, Recording, RecordingParser, ReplayPass, default_actor, load_profile,
    spender_breakdown,
};

use crate::format::{format_metric, format_thousands};

/// Render an error with its immediate cause, if any.
fn describe(err: impl Error) -> String {
    match err.source() {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}

fn parse_recording(log: &Path) -> Result<Recording, String> {
    let parser = RecordingParser::new(chrono::Local::now().naive_local());
    parser.parse_file(log).map_err(describe)
}

pub fn report(log: &Path, profile_path: &Path, actor: Option<i64>) -> Result<(), String> {
    let profile = load_profile(profile_path).map_err(describe)?;
    let recording = parse_recording(log)?;

    let Some(actor_id) = actor.or_else(|| default_actor(&recording)) else {
        return Err("recording contains no casts".to_string());
    };

    let ledger = RecordedLedger::from_recording(&recording, actor_id);
    let totals = ReplayPass::new(&profile, actor_id).run(&recording, &ledger);
    let rows = spender_breakdown(&totals, &ledger, &recording.catalog, &profile);

    if rows.is_empty() {
        println!("no attributed spends for actor {actor_id}");
        return Ok(());
    }

    println!(
        "{}: {} events, actor {}",
        profile.name,
        recording.events.len(),
        actor_id
    );
    println!(
        "{:<24} {:>6} {:>12} {:>10} {:>10} {:>10}",
        "Ability", "Casts", "Attributed", "Amt/Pt", "Pt/Cast", "Amt/Cast"
    );
    for row in &rows {
        println!(
            "{:<24} {:>6} {:>12} {:>10} {:>10} {:>10}",
            row.label,
            row.casts,
            format_thousands(row.attributed),
            format_metric(row.amount_per_point),
            format_metric(row.points_per_cast),
            format_metric(row.amount_per_cast),
        );
    }
    Ok(())
}

pub fn validate(profile_path: &Path) -> Result<(), String> {
    let profile = load_profile(profile_path).map_err(describe)?;
    println!(
        "profile '{}' ok: {} eligible abilities, {} substitutions, chain {}",
        profile.name,
        profile.eligible_abilities.len(),
        profile.substitutions.len(),
        if profile.chain.is_some() {
            "enabled"
        } else {
            "disabled"
        },
    );
    Ok(())
}

pub fn abilities(log: &Path) -> Result<(), String> {
    let recording = parse_recording(log)?;
    if recording.catalog.is_empty() {
        println!("no abilities found");
        return Ok(());
    }

    let mut entries: Vec<_> = recording.catalog.iter().collect();
    entries.sort_by_key(|(id, _)| *id);
    for (id, label) in entries {
        println!("{id:>16}  {label}");
    }
    Ok(())
}
