use std::path::Path;

use cram_core::local::NoteStore;
use cram_core::models::NoteId;
use cram_core::prefs::PreferenceStore;

use crate::commands::common::{format_note_lines, parse_id, write_or_print};
use crate::error::CliError;

pub fn run_add(title: &str, content: &str, prefs: &PreferenceStore) -> Result<(), CliError> {
    let store = NoteStore::new(prefs);
    let note = store.add(title, content)?;
    println!("{}", note.id);
    Ok(())
}

pub fn run_list(
    as_json: bool,
    search: Option<&str>,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let store = NoteStore::new(prefs);
    let notes = store.list();
    let notes: Vec<_> = cram_core::search::filter_matching(&notes, search.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        for line in format_note_lines(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn run_edit(
    id: &str,
    title: &str,
    content: &str,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let note_id: NoteId = parse_id(id)?;
    let store = NoteStore::new(prefs);

    let updated = store.update(&note_id, title, content)?;
    println!("{}", updated.id);
    Ok(())
}

pub fn run_delete(id: &str, prefs: &PreferenceStore) -> Result<(), CliError> {
    let note_id: NoteId = parse_id(id)?;
    let store = NoteStore::new(prefs);

    store.delete(&note_id)?;
    println!("{note_id}");
    Ok(())
}

pub fn run_export(output_path: Option<&Path>, prefs: &PreferenceStore) -> Result<(), CliError> {
    let store = NoteStore::new(prefs);
    if store.list().is_empty() {
        return Err(CliError::NoNotesToExport);
    }

    let rendered = store.export_json()?;
    write_or_print(&rendered, output_path)
}

pub fn run_import(input_path: &Path, prefs: &PreferenceStore) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(input_path)?;
    let store = NoteStore::new(prefs);

    let imported = store.import_json(&payload)?;
    println!("Imported {} notes", imported.len());
    Ok(())
}
