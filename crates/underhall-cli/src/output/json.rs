use underhall_core::error::UnderhallError;
use underhall_core::model::ProcessedDocument;

pub fn print(doc: &ProcessedDocument) -> Result<(), UnderhallError> {
    let json = serde_json::to_string_pretty(doc)?;
    println!("{json}");
    Ok(())
}
