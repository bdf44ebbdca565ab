use langlens::{DocumentKind, build_prompt, perform_analysis_with};
use langlens_cli::config::Config;

/// Prints the prompt a text generator would receive for `kind`.
///
/// The world name is the original archive name without its extension.
pub fn run_prompt_command(config: &Config, kind: &str, id: u32) -> Result<(), String> {
    let kind: DocumentKind = kind.parse()?;
    let store = config.open_store()?;
    let unpacked = store.unpacked(id).map_err(|e| e.to_string())?;
    let root = store.unpacked_root(id).map_err(|e| e.to_string())?;

    let report =
        perform_analysis_with(&root, &config.analysis_options()).map_err(|e| e.to_string())?;
    let world_name = unpacked
        .original_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&unpacked.original_filename);

    print!("{}", build_prompt(kind, world_name, &report));
    Ok(())
}
