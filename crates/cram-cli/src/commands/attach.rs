use std::path::Path;

use base64::prelude::{Engine as _, BASE64_STANDARD};
use cram_core::local::AttachmentStore;
use cram_core::models::{Attachment, AttachmentId};
use cram_core::prefs::PreferenceStore;

use crate::cli::ParentKindArg;
use crate::commands::common::parse_id;
use crate::error::CliError;

pub fn run_add(
    parent: ParentKindArg,
    parent_id: &str,
    file: &Path,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let bytes = std::fs::read(file)?;
    let filename = file
        .file_name()
        .map_or_else(|| "attachment".to_string(), |name| name.to_string_lossy().to_string());
    let mime_type = infer_mime_type(file);
    let encoded = BASE64_STANDARD.encode(&bytes);

    #[allow(clippy::cast_possible_wrap)]
    let attachment = Attachment::new(
        filename,
        mime_type,
        bytes.len() as i64,
        format!("data:{mime_type};base64,{encoded}"),
    )?;

    let store = AttachmentStore::new(prefs);
    let stored = store.add_for(parent.into(), parent_id, attachment)?;

    println!("{}", stored.id);
    Ok(())
}

pub fn run_list(
    parent: ParentKindArg,
    parent_id: &str,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let store = AttachmentStore::new(prefs);
    let attachments = store.list_for(parent.into(), parent_id);

    for attachment in &attachments {
        println!(
            "{:<13}  {:<32}  {:<24}  {} bytes",
            attachment
                .id
                .to_string()
                .chars()
                .take(13)
                .collect::<String>(),
            attachment.filename,
            attachment.mime_type,
            attachment.size_bytes
        );
    }
    if !attachments.is_empty() {
        println!(
            "total: {} bytes",
            store.total_size_for(parent.into(), parent_id)
        );
    }

    Ok(())
}

pub fn run_delete(
    parent: ParentKindArg,
    parent_id: &str,
    attachment_id: &str,
    prefs: &PreferenceStore,
) -> Result<(), CliError> {
    let id: AttachmentId = parse_id(attachment_id)?;
    let store = AttachmentStore::new(prefs);

    store.delete_for(parent.into(), parent_id, &id)?;
    println!("{id}");
    Ok(())
}

fn infer_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}
