/// Catalog loading: item files and the built-in demo memes.
use memerank_core::Item;
use std::path::Path;

use crate::bail;

const DEMO_CATALOG: &str = include_str!("mock_memes.json");

/// Parse a catalog file.
///
/// Accepts a JSON array of item objects, a JSON array of strings, or plain
/// text with one title per line. Titles get their 1-based position as ID.
pub fn parse_catalog(content: &str) -> Result<Vec<Item>, String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        if let Ok(items) = serde_json::from_str::<Vec<Item>>(trimmed) {
            return Ok(items);
        }
        let titles: Vec<String> = serde_json::from_str(trimmed)
            .map_err(|e| format!("File looks like JSON but failed to parse: {e}"))?;
        Ok(from_titles(titles.iter().map(String::as_str)))
    } else {
        Ok(from_titles(trimmed.lines()))
    }
}

fn from_titles<'a>(titles: impl Iterator<Item = &'a str>) -> Vec<Item> {
    titles
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(i, title)| Item::new((i + 1).to_string(), title))
        .collect()
}

pub fn demo_catalog() -> Vec<Item> {
    parse_catalog(DEMO_CATALOG)
        .unwrap_or_else(|e| bail(format!("Failed to parse built-in catalog: {e}")))
}

/// Load items from `path`, or the demo catalog when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Vec<Item> {
    let items = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .unwrap_or_else(|e| bail(format!("Failed to read catalog {}: {e}", path.display())));
            parse_catalog(&content).unwrap_or_else(|e| bail(e))
        }
        None => demo_catalog(),
    };

    if items.len() < 2 {
        bail(format!("Need at least 2 memes to compare, got {}", items.len()));
    }
    items
}
