use crate::error::UnderhallError;
use crate::profiles::schema::KeywordProfile;

const SV_UNDERHALL_JSON: &str = include_str!("../../../../profiles/sv-underhall.json");

/// Available predefined keyword profiles.
pub const PRESETS: &[&str] = &["sv"];

/// Load a predefined keyword profile by name.
pub fn load_preset(name: &str) -> Result<KeywordProfile, UnderhallError> {
    match name {
        "sv" => {
            let profile: KeywordProfile = serde_json::from_str(SV_UNDERHALL_JSON)?;
            Ok(profile)
        }
        _ => Err(UnderhallError::ProfileInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::validate_profile;

    #[test]
    fn test_load_sv_preset() {
        let p = load_preset("sv").unwrap();
        assert_eq!(p.default_category, "Uncategorized");
        assert!(p.header_keywords.contains(&"åtgärd".to_string()));
        assert!(validate_profile(&p).is_ok());
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("no").is_err());
    }

    #[test]
    fn test_every_preset_loads() {
        for name in PRESETS {
            let p = load_preset(name).unwrap();
            validate_profile(&p).unwrap();
        }
    }
}
