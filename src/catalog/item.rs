use std::collections::BTreeMap;

/// One image in the catalog. Everything here is immutable after load; layout
/// state lives in the force layout, keyed by `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub image: String,
    pub source: Option<String>,
    pub display_name: String,
    pub themes: Vec<String>,
    pub moods: Vec<String>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        image: impl Into<String>,
        name: Option<String>,
        themes: Vec<String>,
        moods: Vec<String>,
    ) -> Self {
        let id = id.into();
        let display_name = name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| derive_display_name(&id, &themes, &moods));

        Self {
            id,
            image: image.into(),
            source: None,
            display_name,
            themes,
            moods,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn has_theme(&self, tag: &str) -> bool {
        self.themes.iter().any(|theme| theme == tag)
    }

    pub fn shares_theme_with(&self, other: &Item) -> bool {
        intersects(&self.themes, &other.themes)
    }

    pub fn shares_mood_with(&self, other: &Item) -> bool {
        intersects(&self.moods, &other.moods)
    }
}

fn intersects(a: &[String], b: &[String]) -> bool {
    a.iter().any(|tag| b.contains(tag))
}

/// Falls back to the id when the item carries no tags at all, so a label is
/// never empty.
fn derive_display_name(id: &str, themes: &[String], moods: &[String]) -> String {
    let joined = themes
        .iter()
        .chain(moods)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        id.to_owned()
    } else {
        joined
    }
}

/// Reference lists declared by the document. Informational only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogMeta {
    pub themes: Vec<String>,
    pub moods: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub items: Vec<Item>,
    pub meta: CatalogMeta,
    pub skipped: usize,
}

impl Catalog {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Every theme carried by at least one item, with its item count, in
    /// lexicographic order. These are the selectable filter values.
    pub fn theme_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for item in &self.items {
            for theme in &item.themes {
                *counts.entry(theme.as_str()).or_default() += 1;
            }
        }

        counts
            .into_iter()
            .map(|(theme, count)| (theme.to_owned(), count))
            .collect()
    }
}
