use std::collections::HashMap;
use std::path::Path;
use underhall_core::error::UnderhallError;
use underhall_core::profiles::builtin;
use underhall_core::profiles::schema::{KeywordProfile, RoleKeywords};

pub fn list() -> Result<(), UnderhallError> {
    println!("Available keyword profiles:\n");
    for name in builtin::PRESETS {
        let p = builtin::load_preset(name)?;
        println!("  {:<8} {} (v{})", name, p.name, p.version);
        if let Some(ref desc) = p.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), UnderhallError> {
    let p = builtin::load_preset(name)?;
    println!("{}", serde_json::to_string_pretty(&p)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), UnderhallError> {
    let p = underhall_core::profiles::load_profile(file)?;

    println!("Profile '{}' (v{}) is valid.", p.name, p.version);
    println!("  Header keywords: {}", p.header_keywords.join(", "));
    for role in RoleKeywords::ORDER {
        println!("  {:<9} {}", format!("{role}:"), p.roles.for_role(role).join(", "));
    }
    println!("  Default category: {}", p.default_category);

    let warnings = lint(&p);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

/// Usable but suspicious profile settings.
fn lint(p: &KeywordProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    // A keyword shared by two roles always goes to the earlier one.
    let mut owner: HashMap<&str, String> = HashMap::new();
    for role in RoleKeywords::ORDER {
        for kw in p.roles.for_role(role) {
            match owner.get(kw.as_str()) {
                Some(first) => warnings.push(format!(
                    "keyword '{}' is listed for both {} and {}; {} wins",
                    kw, first, role, first
                )),
                None => {
                    owner.insert(kw.as_str(), role.to_string());
                }
            }
        }
    }

    for kw in &p.header_keywords {
        if !owner.contains_key(kw.as_str()) {
            warnings.push(format!(
                "header keyword '{}' does not map to any column role",
                kw
            ));
        }
    }

    warnings
}
