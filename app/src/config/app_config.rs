//! Runtime application configuration loaded from environment variables.

use std::path::{Path, PathBuf};

use bump_engine::{DEFAULT_SUB_GOAL, OverdrawPolicy};

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration, resolved once per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub data_file: String,
    pub sub_goal: u32,
    pub overdraw_policy: OverdrawPolicy,
    pub name_display_max: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: super::default_data_dir(),
            data_file: "users.json".into(),
            sub_goal: DEFAULT_SUB_GOAL,
            overdraw_policy: OverdrawPolicy::Reject,
            name_display_max: 15,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Invalid values are logged and replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> String {
            let default = get_default(key).unwrap_or_default();
            match lookup(key) {
                Some(v) if !v.trim().is_empty() => match validate_setting(key, v.trim()) {
                    Ok(()) => v.trim().to_string(),
                    Err(e) => {
                        tracing::warn!(key, value = %v, "Invalid setting ({e}), using default {default:?}");
                        default.to_string()
                    }
                },
                _ => default.to_string(),
            }
        };

        let data_dir = {
            let dir = g("BUMP_DATA_DIR");
            if dir.is_empty() {
                super::default_data_dir()
            } else {
                PathBuf::from(dir)
            }
        };

        Self {
            data_dir,
            data_file: g("BUMP_DATA_FILE"),
            sub_goal: parse_u32(&g("BUMP_SUB_GOAL"), DEFAULT_SUB_GOAL),
            overdraw_policy: g("BUMP_OVERDRAW_POLICY").parse().unwrap_or_default(),
            name_display_max: parse_usize(&g("BUMP_NAME_DISPLAY_MAX"), 15),
        }
    }

    /// Full path of the record file.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    /// Point the store at an explicit file, overriding dir and file name.
    pub fn set_data_path(&mut self, path: &Path) {
        if let Some(name) = path.file_name() {
            self.data_file = name.to_string_lossy().into_owned();
        }
        self.data_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
    }
}

fn parse_u32(s: &str, default: u32) -> u32 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_usize(s: &str, default: usize) -> usize {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.data_file, "users.json");
        assert_eq!(config.sub_goal, DEFAULT_SUB_GOAL);
        assert_eq!(config.overdraw_policy, OverdrawPolicy::Reject);
        assert_eq!(config.name_display_max, 15);
        assert_eq!(config.data_dir, crate::config::default_data_dir());
    }

    #[test]
    fn test_env_values_applied() {
        let config = config_from(&[
            ("BUMP_DATA_DIR", "/tmp/stream"),
            ("BUMP_DATA_FILE", "tonight.json"),
            ("BUMP_SUB_GOAL", " 50 "),
            ("BUMP_OVERDRAW_POLICY", "clamp"),
        ]);
        assert_eq!(config.data_path(), PathBuf::from("/tmp/stream/tonight.json"));
        assert_eq!(config.sub_goal, 50);
        assert_eq!(config.overdraw_policy, OverdrawPolicy::Clamp);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("BUMP_SUB_GOAL", "0"),
            ("BUMP_OVERDRAW_POLICY", "yolo"),
            ("BUMP_DATA_FILE", "notes.txt"),
            ("BUMP_NAME_DISPLAY_MAX", "2"),
        ]);
        assert_eq!(config.sub_goal, DEFAULT_SUB_GOAL);
        assert_eq!(config.overdraw_policy, OverdrawPolicy::Reject);
        assert_eq!(config.data_file, "users.json");
        assert_eq!(config.name_display_max, 15);
    }

    #[test]
    fn test_sub_goal_default_matches_table() {
        let table: u32 = get_default("BUMP_SUB_GOAL").unwrap().parse().unwrap();
        assert_eq!(table, DEFAULT_SUB_GOAL);
    }

    #[test]
    fn test_set_data_path() {
        let mut config = config_from(&[]);
        config.set_data_path(Path::new("/srv/bump/store.json"));
        assert_eq!(config.data_path(), PathBuf::from("/srv/bump/store.json"));

        config.set_data_path(Path::new("local.json"));
        assert_eq!(config.data_path(), PathBuf::from("./local.json"));
    }
}
