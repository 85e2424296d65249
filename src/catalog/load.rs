use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::item::Catalog;
use super::parse::parse_document;

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read data document {}", path.display()))?;

    let catalog = parse_document(&raw)
        .with_context(|| format!("failed to parse data document {}", path.display()))?;

    log::info!(
        "loaded {} items from {} ({} skipped, {} declared themes, {} declared moods)",
        catalog.item_count(),
        path.display(),
        catalog.skipped,
        catalog.meta.themes.len(),
        catalog.meta.moods.len()
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_file_reports_the_path() {
        let path = PathBuf::from("definitely/not/here.json");
        let error = load_catalog(&path).unwrap_err();
        assert!(format!("{error:#}").contains("definitely/not/here.json"));
    }
}
