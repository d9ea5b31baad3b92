use std::path::{Path, PathBuf};
use underhall_core::error::UnderhallError;
use underhall_core::extraction::textract::TextractJsonBackend;
use underhall_core::profiles::builtin;
use underhall_core::profiles::schema::KeywordProfile;

use crate::output;

pub fn run(
    inputs: &[PathBuf],
    preset: Option<&str>,
    profile_file: Option<&Path>,
    output_format: &str,
    out_dir: Option<&Path>,
) -> Result<(), UnderhallError> {
    let profile = resolve_profile(preset, profile_file)?;
    log::info!("using keyword profile '{}' (v{})", profile.name, profile.version);

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let backend = TextractJsonBackend::new();
    for (i, input) in inputs.iter().enumerate() {
        let bytes = std::fs::read(input).map_err(|e| UnderhallError::ResponseLoad {
            path: input.clone(),
            reason: e.to_string(),
        })?;
        let doc = underhall_core::process_document(&bytes, &backend, &profile)?;

        match output_format {
            "json" => output::json::print(&doc)?,
            _ => {
                if i > 0 {
                    println!();
                }
                output::table::print_document(input, &doc);
            }
        }

        if let Some(dir) = out_dir {
            let written = output::files::write_document(dir, &file_stem(input), &doc)?;
            eprintln!("Wrote {} file(s) for {} to {}", written, input.display(), dir.display());
        }
    }

    Ok(())
}

/// A custom profile file wins over a preset; with neither, the Swedish preset.
pub fn resolve_profile(
    preset: Option<&str>,
    profile_file: Option<&Path>,
) -> Result<KeywordProfile, UnderhallError> {
    match (profile_file, preset) {
        (Some(path), _) => underhall_core::profiles::load_profile(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => builtin::load_preset("sv"),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
