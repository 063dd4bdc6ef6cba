//! Config command handlers.
//!
//! Implements `config show`, `config path`, `config init` and
//! `config-schema`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::{
    discover_config_file, generate_example_config, generate_json_schema, load_or_default,
    CONFIG_DIR_NAME, CONFIG_FILE_NAMES,
};

/// Effective configuration as YAML, with a comment naming its source
pub fn show_config(explicit: Option<&Path>) -> Result<String> {
    let (config, loaded_from) = load_or_default(explicit);
    let header = loaded_from.map_or_else(
        || "# No config file found; showing defaults".to_string(),
        |path| format!("# Loaded from: {}", path.display()),
    );
    let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
    Ok(format!("{header}\n{yaml}"))
}

/// Search locations, recognized names and the active file
#[must_use]
pub fn describe_config_paths(explicit: Option<&Path>) -> String {
    let search_paths: [Option<String>; 3] = [
        std::env::current_dir()
            .ok()
            .map(|p| p.display().to_string()),
        ::dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME).display().to_string()),
        ::dirs::home_dir().map(|p| p.display().to_string()),
    ];

    let mut lines = vec!["Config file search paths (in order):".to_string()];
    lines.extend(search_paths.into_iter().flatten().map(|p| format!("  {p}")));
    lines.push(String::new());
    lines.push("Recognized file names:".to_string());
    lines.extend(CONFIG_FILE_NAMES.iter().map(|name| format!("  {name}")));
    lines.push(String::new());
    lines.push(match discover_config_file(explicit) {
        Some(path) => format!("Active config file: {}", path.display()),
        None => "No config file found.".to_string(),
    });
    lines.join("\n")
}

/// Write an example config, refusing to overwrite an existing file
pub fn init_config(target: &Path) -> Result<PathBuf> {
    if target.exists() {
        bail!(
            "{} already exists. Remove it first to re-initialize.",
            target.display()
        );
    }
    std::fs::write(target, generate_example_config())
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target.to_path_buf())
}

/// Write the config JSON Schema to a file, or return it for stdout
pub fn write_schema(output: Option<&Path>) -> Result<Option<String>> {
    let schema = generate_json_schema();
    match output {
        Some(path) => {
            std::fs::write(path, &schema)
                .with_context(|| format!("failed to write {}", path.display()))?;
            Ok(None)
        }
        None => Ok(Some(schema)),
    }
}
