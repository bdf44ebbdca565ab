use std::path::Path;

use langlens::{export_resource_file, locate, read_resource_file};
use langlens_cli::config::Config;
use langlens_cli::table;
use serde_json::json;

/// Lists the `.lang` files of an unpacked world, in analysis priority order.
pub fn run_files_command(config: &Config, id: u32, json_output: bool) -> Result<(), String> {
    let store = config.open_store()?;
    let root = store.unpacked_root(id).map_err(|e| e.to_string())?;
    if !root.is_dir() {
        return Err("Unpacked world folder not found".to_string());
    }
    let files = locate(&root);

    if json_output {
        let entries: Vec<_> = files
            .iter()
            .map(|f| {
                json!({
                    "name": f.name,
                    "path": f.relative_path,
                    "size_kb": f.size_kb,
                    "locale": f.locale_label,
                    "is_primary_locale": f.is_primary_locale,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "files": entries }))
                .map_err(|e| e.to_string())?
        );
        return Ok(());
    }

    if files.is_empty() {
        println!("No localization files found.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = files
        .iter()
        .map(|f| {
            vec![
                f.relative_path.clone(),
                f.locale_label.clone(),
                format!("{:.2}", f.size_kb),
                if f.is_primary_locale { "*" } else { "" }.to_string(),
            ]
        })
        .collect();
    print!("{}", table::render(&["Path", "Locale", "KB", "Primary"], &rows));
    println!("{} file(s)", files.len());
    Ok(())
}

pub fn run_view_command(config: &Config, id: u32, path: &str) -> Result<(), String> {
    let store = config.open_store()?;
    let root = store.unpacked_root(id).map_err(|e| e.to_string())?;
    let view = read_resource_file(&root, path).map_err(|e| e.to_string())?;

    eprintln!("{} ({} bytes, {} lines)", view.path, view.size, view.lines);
    print!("{}", view.content);
    if !view.content.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub fn run_export_file_command(
    config: &Config,
    id: u32,
    path: &str,
    out: &Path,
) -> Result<(), String> {
    let store = config.open_store()?;
    let root = store.unpacked_root(id).map_err(|e| e.to_string())?;
    let exported = export_resource_file(&root, path, out).map_err(|e| e.to_string())?;
    println!("✅ Exported {} to {}", path, exported.display());
    Ok(())
}
