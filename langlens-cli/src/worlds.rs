use std::path::Path;

use langlens::{UnpackedRecord, WorldRecord};
use langlens_cli::config::Config;
use langlens_cli::table;
use langlens_cli::validation::validate_world_archive;
use serde_json::json;
use tracing::info;

fn user_name(config: &Config, user: Option<String>) -> String {
    user.unwrap_or_else(|| config.user.clone())
}

pub fn run_import_command(
    config: &Config,
    file: &Path,
    user: Option<String>,
) -> Result<(), String> {
    validate_world_archive(file)?;
    let store = config.open_store()?;
    let record = store
        .import(file, &user_name(config, user))
        .map_err(|e| e.to_string())?;
    info!(id = record.id, filename = %record.filename, "imported world");
    println!(
        "✅ Imported {} as world {} ({} MB)",
        record.original_filename, record.id, record.file_size_mb
    );
    Ok(())
}

pub fn run_list_command(config: &Config, json_output: bool) -> Result<(), String> {
    let store = config.open_store()?;
    let worlds = store.worlds().map_err(|e| e.to_string())?;
    let unpacked = store.unpacked_worlds().map_err(|e| e.to_string())?;

    if json_output {
        let out = json!({
            "worlds": worlds,
            "unpacked": unpacked,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    println!("=== Worlds ===");
    if worlds.is_empty() {
        println!("(none)");
    } else {
        let headers = ["ID", "File", "Type", "Size MB", "Uploaded", "Unpacked"];
        print!("{}", table::render(&headers, &world_rows(&worlds)));
    }
    println!();
    println!("=== Unpacked ===");
    if unpacked.is_empty() {
        println!("(none)");
    } else {
        let headers = ["ID", "World", "Folder", "Size MB", "Unpacked"];
        print!("{}", table::render(&headers, &unpacked_rows(&unpacked)));
    }
    Ok(())
}

fn world_rows(worlds: &[WorldRecord]) -> Vec<Vec<String>> {
    worlds
        .iter()
        .map(|w| {
            let status = match (&w.unpacked_folder, w.repacked_from) {
                (Some(folder), _) if w.unpacked => folder.clone(),
                (_, Some(from)) => format!("repacked from {}", from),
                _ => "-".to_string(),
            };
            vec![
                w.id.to_string(),
                w.original_filename.clone(),
                w.file_type.clone(),
                format!("{:.2}", w.file_size_mb),
                w.upload_date.clone(),
                status,
            ]
        })
        .collect()
}

fn unpacked_rows(unpacked: &[UnpackedRecord]) -> Vec<Vec<String>> {
    unpacked
        .iter()
        .map(|u| {
            vec![
                u.id.to_string(),
                u.original_world_id.to_string(),
                u.folder_name.clone(),
                format!("{:.2}", u.folder_size_mb),
                u.unpacked_date.clone(),
            ]
        })
        .collect()
}

pub fn run_unpack_command(config: &Config, id: u32, user: Option<String>) -> Result<(), String> {
    let store = config.open_store()?;
    let record = store
        .unpack(id, &user_name(config, user))
        .map_err(|e| e.to_string())?;
    println!(
        "✅ Unpacked world {} into {} (unpacked id {})",
        id, record.folder_name, record.id
    );
    Ok(())
}

pub fn run_repack_command(config: &Config, id: u32, user: Option<String>) -> Result<(), String> {
    let store = config.open_store()?;
    let record = store
        .repack(id, &user_name(config, user))
        .map_err(|e| e.to_string())?;
    println!(
        "✅ Repacked unpacked world {} as {} (world {})",
        id, record.filename, record.id
    );
    Ok(())
}

pub fn run_delete_command(config: &Config, id: u32) -> Result<(), String> {
    let store = config.open_store()?;
    let record = store.delete(id).map_err(|e| e.to_string())?;
    let cleaned = store.clean_orphans().map_err(|e| e.to_string())?;
    if cleaned {
        info!("removed orphaned unpacked worlds");
    }
    println!("✅ Deleted world {} ({})", record.id, record.original_filename);
    Ok(())
}

pub fn run_export_command(config: &Config, id: u32, out: &Path) -> Result<(), String> {
    let store = config.open_store()?;
    let path = store.export(id, out).map_err(|e| e.to_string())?;
    println!("✅ Exported world {} to {}", id, path.display());
    Ok(())
}
