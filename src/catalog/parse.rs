use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::item::{Catalog, CatalogMeta, Item};

#[derive(Debug, Deserialize)]
struct RawDocument {
    nodes: Vec<Value>,
    #[serde(default)]
    meta: Option<Value>,
}

pub(super) fn parse_document(raw: &str) -> Result<Catalog> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in data document")?;
    if !parsed.is_object() {
        return Err(anyhow!("data document must be a JSON object"));
    }

    let document =
        RawDocument::deserialize(parsed).context("data document has no `nodes` array")?;

    let mut items = Vec::with_capacity(document.nodes.len());
    let mut seen_ids = HashSet::with_capacity(document.nodes.len());
    let mut skipped = 0usize;

    for (position, value) in document.nodes.iter().enumerate() {
        let item = match parse_item(value) {
            Ok(item) => item,
            Err(reason) => {
                log::warn!("skipping node #{position}: {reason}");
                skipped += 1;
                continue;
            }
        };

        if !seen_ids.insert(item.id.clone()) {
            log::warn!("skipping node #{position}: duplicate id {:?}", item.id);
            skipped += 1;
            continue;
        }

        items.push(item);
    }

    let meta = document
        .meta
        .as_ref()
        .and_then(Value::as_object)
        .map(|object| CatalogMeta {
            themes: tag_list(object.get("themes")),
            moods: tag_list(object.get("moods")),
        })
        .unwrap_or_default();

    Ok(Catalog {
        items,
        meta,
        skipped,
    })
}

fn parse_item(value: &Value) -> Result<Item> {
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("entry is not an object"))?;

    let id = required_string(object, "id")?;
    let image = required_string(object, "image")?;
    let name = optional_string(object, "name");
    let themes = tag_list(object.get("themes"));
    let moods = tag_list(object.get("moods"));

    let mut item = Item::new(id, image, name, themes, moods);
    if let Some(source) = optional_string(object, "source") {
        item = item.with_source(source);
    }
    Ok(item)
}

fn required_string(object: &Map<String, Value>, key: &str) -> Result<String> {
    optional_string(object, key).ok_or_else(|| anyhow!("missing required field `{key}`"))
}

fn optional_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Anything that is not an array of strings degrades to an empty tag set.
fn tag_list(value: Option<&Value>) -> Vec<String> {
    let Some(values) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut tags: Vec<String> = Vec::with_capacity(values.len());
    for tag in values.iter().filter_map(Value::as_str).map(str::trim) {
        if !tag.is_empty() && !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_owned());
        }
    }
    tags
}
