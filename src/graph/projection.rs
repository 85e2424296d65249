use std::collections::HashSet;

use crate::catalog::Item;

use super::links::{Link, build_links};
use super::ordering::order_items;

/// The single active theme filter. A blank tag means "all"; any other tag is
/// matched exactly as given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagFilter(Option<String>);

impl TagFilter {
    pub fn new(tag: Option<&str>) -> Self {
        Self(
            tag.filter(|tag| !tag.trim().is_empty())
                .map(str::to_owned),
        )
    }

    pub fn all() -> Self {
        Self(None)
    }

    pub fn active(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.active().is_none_or(|tag| item.has_theme(tag))
    }

    pub fn label(&self) -> &str {
        self.active().unwrap_or("all")
    }
}

/// Filtered, ordered node set plus the links induced among it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Projection {
    pub nodes: Vec<Item>,
    pub links: Vec<Link>,
}

impl Projection {
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn node(&self, id: &str) -> Option<&Item> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Ids one link away from `id`.
    pub fn neighbors(&self, id: &str) -> HashSet<&str> {
        self.links
            .iter()
            .filter_map(|link| link.opposite(id))
            .collect()
    }
}

pub fn project(full_items: &[Item], active_tag: Option<&str>) -> Projection {
    let filter = TagFilter::new(active_tag);
    let selected = full_items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect::<Vec<_>>();

    let nodes = order_items(&selected, filter.active());
    let links = build_links(&nodes);

    Projection { nodes, links }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::fixtures::{abcd, item};

    fn ids(projection: &Projection) -> Vec<&str> {
        projection.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    #[test]
    fn no_filter_keeps_everything_in_name_order() {
        let projection = project(&abcd(), None);
        assert_eq!(ids(&projection), vec!["A", "B", "C", "D"]);
        assert_eq!(projection.links.len(), 2);
    }

    #[test]
    fn filtering_by_y_keeps_b_and_c() {
        let projection = project(&abcd(), Some("y"));
        assert_eq!(ids(&projection), vec!["B", "C"]);
        assert_eq!(projection.links.len(), 1);
        assert!(projection.links[0].connects("B", "C"));
    }

    #[test]
    fn empty_tag_means_no_filter() {
        assert_eq!(project(&abcd(), Some("")), project(&abcd(), None));
        assert_eq!(TagFilter::new(Some("  ")), TagFilter::all());
    }

    #[test]
    fn tag_is_matched_exactly() {
        let projection = project(&abcd(), Some(" x"));
        assert!(projection.nodes.is_empty());
        assert!(projection.links.is_empty());
        assert_eq!(TagFilter::new(Some(" x")).active(), Some(" x"));
    }

    #[test]
    fn filter_matches_themes_only() {
        let items = vec![
            item("m", &[], &["x"]),
            item("t", &["x"], &[]),
            item("u", &[], &[]),
        ];
        let projection = project(&items, Some("x"));
        assert_eq!(ids(&projection), vec!["t"]);
        assert!(projection.nodes.iter().all(|node| node.has_theme("x")));
    }

    #[test]
    fn untagged_item_never_matches_a_filter() {
        let items = vec![item("bare", &[], &[]), item("tagged", &["x"], &[])];
        for tag in ["x", "y", "bare"] {
            assert!(!project(&items, Some(tag)).contains("bare"));
        }
    }

    #[test]
    fn links_only_reference_projected_nodes() {
        let items = vec![
            item("a", &["x"], &["calm"]),
            item("b", &["y"], &["calm"]),
            item("c", &["x"], &[]),
        ];
        let projection = project(&items, Some("x"));
        assert_eq!(ids(&projection), vec!["a", "c"]);
        for link in &projection.links {
            assert!(projection.contains(&link.source));
            assert!(projection.contains(&link.target));
        }
    }

    #[test]
    fn each_selected_item_appears_once() {
        let projection = project(&abcd(), Some("x"));
        let unique = ids(&projection).into_iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), projection.nodes.len());
    }

    #[test]
    fn neighbors_are_one_hop() {
        let projection = project(&abcd(), None);
        let neighbors = projection.neighbors("B");
        assert_eq!(neighbors, HashSet::from(["A", "C"]));
        assert!(projection.neighbors("D").is_empty());
    }
}
