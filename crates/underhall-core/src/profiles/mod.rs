pub mod builtin;
pub mod schema;

use crate::error::UnderhallError;
use schema::KeywordProfile;
use std::path::Path;

/// Load a keyword profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<KeywordProfile, UnderhallError> {
    let content = std::fs::read_to_string(path).map_err(|e| UnderhallError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a keyword profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<KeywordProfile, UnderhallError> {
    let profile: KeywordProfile =
        serde_json::from_str(json).map_err(|e| UnderhallError::ProfileLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_profile(&profile)?;
    log::debug!("loaded keyword profile '{}' from {}", profile.name, source.display());
    Ok(profile)
}

/// Parse a keyword profile from a JSON string (no file path context).
pub fn parse_profile_str(json: &str) -> Result<KeywordProfile, UnderhallError> {
    let profile: KeywordProfile = serde_json::from_str(json).map_err(UnderhallError::Json)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is usable for classification.
pub fn validate_profile(profile: &KeywordProfile) -> Result<(), UnderhallError> {
    if profile.name.trim().is_empty() {
        return Err(UnderhallError::ProfileInvalid(
            "name must not be empty".into(),
        ));
    }

    if profile.default_category.trim().is_empty() {
        return Err(UnderhallError::ProfileInvalid(
            "default_category must not be empty".into(),
        ));
    }

    if profile.sample_rows == 0 {
        return Err(UnderhallError::ProfileInvalid(
            "sample_rows must be at least 1".into(),
        ));
    }

    check_keywords("header_keywords", &profile.header_keywords)?;
    check_keywords("maintenance_keywords", &profile.maintenance_keywords)?;
    check_keywords("cost_markers", &profile.cost_markers)?;
    for role in schema::RoleKeywords::ORDER {
        check_keywords(&format!("roles.{role}"), profile.roles.for_role(role))?;
    }

    Ok(())
}

fn check_keywords(field: &str, keywords: &[String]) -> Result<(), UnderhallError> {
    if keywords.is_empty() {
        return Err(UnderhallError::ProfileInvalid(format!(
            "{field} must not be empty"
        )));
    }

    for kw in keywords {
        if kw.trim().is_empty() {
            return Err(UnderhallError::ProfileInvalid(format!(
                "{field} contains an empty keyword"
            )));
        }
        if kw.to_lowercase() != *kw {
            return Err(UnderhallError::ProfileInvalid(format!(
                "{field} keyword '{kw}' must be lowercase"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const VALID: &str = r#"{
        "name": "Test",
        "version": "1.0",
        "header_keywords": ["year"],
        "maintenance_keywords": ["year", "cost"],
        "roles": {
            "year": ["year"],
            "category": ["category"],
            "action": ["action"],
            "cost": ["cost"]
        },
        "cost_markers": ["usd"],
        "default_category": "Other"
    }"#;

    #[test]
    fn test_parse_valid_profile() {
        let p = parse_profile_str(VALID).unwrap();
        assert_eq!(p.name, "Test");
        assert_eq!(p.sample_rows, 5);
        assert_eq!(p.roles.year, vec!["year"]);
    }

    #[test]
    fn test_empty_role_rejected() {
        let json = VALID.replace(r#""action": ["action"]"#, r#""action": []"#);
        let err = parse_profile_str(&json).unwrap_err();
        assert!(err.to_string().contains("roles.action"));
    }

    #[test]
    fn test_uppercase_keyword_rejected() {
        let json = VALID.replace(r#""cost_markers": ["usd"]"#, r#""cost_markers": ["USD"]"#);
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_zero_sample_rows_rejected() {
        let json = VALID.replace(
            r#""default_category": "Other""#,
            r#""default_category": "Other", "sample_rows": 0"#,
        );
        assert!(parse_profile_str(&json).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        assert!(parse_profile_str(r#"{ "name": "x" }"#).is_err());
    }

    #[test]
    fn test_load_profile_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();
        let p = load_profile(file.path()).unwrap();
        assert_eq!(p.default_category, "Other");
    }

    #[test]
    fn test_load_profile_missing_file() {
        let err = load_profile(Path::new("/nonexistent/profile.json")).unwrap_err();
        assert!(matches!(err, UnderhallError::ProfileLoad { .. }));
    }
}
