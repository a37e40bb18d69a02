//! Map loading from serialized (RON) level files.
//!
//! A map file holds one `MapDef`; [`load_map`] deserializes and validates it
//! before the engine ever sees it. [`resolve_map`] lets callers name either
//! a built-in level or a file path.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use blokrun_data::{MapDef, builtin_map};
use log::info;

use crate::data_paths::data_path;

/// Load and validate a map definition from a RON file.
///
/// # Errors
/// Errors bubble up from file IO, deserialization, or cell validation.
pub fn load_map(path: &Path) -> Result<MapDef> {
    let text = fs::read_to_string(path).with_context(|| format!("while reading map file '{}'", path.display()))?;
    let def: MapDef = ron::from_str(&text).with_context(|| format!("while parsing map file '{}'", path.display()))?;
    let cells = def
        .decode()
        .with_context(|| format!("while validating map '{}'", def.name))?;
    info!("map '{}' loaded: {} cells, theme '{}'", def.name, cells.len(), def.theme);
    Ok(def)
}

/// Resolve a map by built-in name first, then as a file path, then as a
/// bundled level under `data/maps/`.
///
/// # Errors
/// - if the name matches no built-in, file path, or bundled level
pub fn resolve_map(spec: &str) -> Result<MapDef> {
    if let Some(def) = builtin_map(spec) {
        info!("using built-in map '{spec}'");
        return Ok(def);
    }
    let direct = Path::new(spec);
    if direct.is_file() {
        return load_map(direct);
    }
    let bundled = data_path(Path::new("maps").join(format!("{spec}.ron")));
    if bundled.is_file() {
        return load_map(&bundled);
    }
    load_map(direct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_map(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write map");
        file
    }

    #[test]
    fn loads_a_valid_map_file() {
        let file = write_map(r#"(name: "verger", theme: "foret", cells: ["e", "cle", "buisson", "W"])"#);
        let def = load_map(file.path()).expect("loads");
        assert_eq!(def.name, "verger");
        assert_eq!(def.cells.len(), 4);
    }

    #[test]
    fn rejects_malformed_ron() {
        let file = write_map("(name: \"broken\"");
        assert!(load_map(file.path()).is_err());
    }

    #[test]
    fn rejects_unknown_cell_symbols() {
        let file = write_map(r#"(name: "bad", theme: "foret", cells: ["e", "lava"])"#);
        let err = load_map(file.path()).unwrap_err();
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn missing_file_errors_with_path_context() {
        let err = load_map(Path::new("/nonexistent/map.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/map.ron"));
    }

    #[test]
    fn resolve_prefers_builtins() {
        let def = resolve_map("foret1").expect("builtin resolves");
        assert_eq!(def.name, "foret1");
        assert!(resolve_map("no-such-map.ron").is_err());
    }

    #[test]
    fn resolve_finds_bundled_levels() {
        let def = resolve_map("verger").expect("bundled level resolves");
        assert_eq!(def.name, "verger");
    }
}
