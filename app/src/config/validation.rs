//! Setting value validation.

use bump_engine::OverdrawPolicy;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "BUMP_DATA_DIR" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "BUMP_DATA_FILE" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
            if !value.ends_with(".json") {
                return Err("must end with .json".into());
            }
            if value.contains(['/', '\\']) {
                return Err("must be a file name, not a path".into());
            }
        }
        "BUMP_SUB_GOAL" => validate_int_range(value, 1, 100_000)?,
        "BUMP_OVERDRAW_POLICY" => {
            value.parse::<OverdrawPolicy>()?;
        }
        "BUMP_NAME_DISPLAY_MAX" => validate_int_range(value, 4, 100)?,
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.trim().parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sub_goal() {
        assert!(validate_setting("BUMP_SUB_GOAL", "20").is_ok());
        assert!(validate_setting("BUMP_SUB_GOAL", "1").is_ok());
        assert!(validate_setting("BUMP_SUB_GOAL", "0").is_err());
        assert!(validate_setting("BUMP_SUB_GOAL", "lots").is_err());
    }

    #[test]
    fn test_valid_data_dir() {
        assert!(validate_setting("BUMP_DATA_DIR", "/srv/bumps").is_ok());
        assert!(validate_setting("BUMP_DATA_DIR", "  ").is_err());
    }

    #[test]
    fn test_valid_overdraw_policy() {
        assert!(validate_setting("BUMP_OVERDRAW_POLICY", "reject").is_ok());
        assert!(validate_setting("BUMP_OVERDRAW_POLICY", "clamp").is_ok());
        assert!(validate_setting("BUMP_OVERDRAW_POLICY", "allow").is_ok());
        assert!(validate_setting("BUMP_OVERDRAW_POLICY", "floor").is_err());
    }

    #[test]
    fn test_valid_data_file() {
        assert!(validate_setting("BUMP_DATA_FILE", "users.json").is_ok());
        assert!(validate_setting("BUMP_DATA_FILE", "users.txt").is_err());
        assert!(validate_setting("BUMP_DATA_FILE", "../users.json").is_err());
        assert!(validate_setting("BUMP_DATA_FILE", "").is_err());
    }

    #[test]
    fn test_valid_name_display_max() {
        assert!(validate_setting("BUMP_NAME_DISPLAY_MAX", "15").is_ok());
        assert!(validate_setting("BUMP_NAME_DISPLAY_MAX", "3").is_err());
    }

    #[test]
    fn test_unknown_key_passes() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }
}
