use serde::Deserialize;

/// Defaults loadable from `locdiff.toml`. Every field is optional; command
/// line flags always win over the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocdiffConfig {
    /// Reporting level for parsing: "default" | "silent" | "verbose".
    pub parse: Option<String>,
    /// Reporting level for missing declarations: same names.
    pub missing: Option<String>,
    /// Fetch machine translations for missing entries.
    pub translate: Option<bool>,
    /// Output format: "text" | "json".
    pub format: Option<String>,
}

/// Loading never fails: a missing or unparsable file simply contributes
/// nothing to the merge.
pub fn load_config() -> LocdiffConfig {
    // Search order: CWD/locdiff.toml, $HOME/.config/locdiff/locdiff.toml
    let mut merged = LocdiffConfig::default();
    if let Ok(p) = std::env::current_dir() {
        let path = p.join("locdiff.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<LocdiffConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    if let Some(base) = dirs::config_dir() {
        let path = base.join("locdiff").join("locdiff.toml");
        if let Ok(s) = std::fs::read_to_string(&path) {
            if let Ok(cfg) = toml::from_str::<LocdiffConfig>(&s) {
                merged = merge(merged, cfg);
            }
        }
    }
    merged
}

fn merge(mut a: LocdiffConfig, b: LocdiffConfig) -> LocdiffConfig {
    if a.parse.is_none() {
        a.parse = b.parse;
    }
    if a.missing.is_none() {
        a.missing = b.missing;
    }
    if a.translate.is_none() {
        a.translate = b.translate;
    }
    if a.format.is_none() {
        a.format = b.format;
    }
    a
}
