//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    ("BUMP_DATA_DIR", "", "Directory holding the record file (empty = ~/.bump-calculator)"),
    ("BUMP_DATA_FILE", "users.json", "Record file name inside the data directory"),
    ("BUMP_SUB_GOAL", "20", "Stream subscriber goal shown with the grand totals"),
    ("BUMP_OVERDRAW_POLICY", "reject", "Subtracting more than recorded: reject, clamp, or allow"),
    ("BUMP_NAME_DISPLAY_MAX", "15", "Usernames longer than this are shortened on the leaderboard"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Setting definitions in declaration order, for help output.
pub fn setting_defs() -> impl Iterator<Item = &'static SettingDef> {
    DEFS.iter().filter_map(|(key, _, _)| DEFAULT_SETTINGS.get(key))
}
