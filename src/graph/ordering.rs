use std::cmp::Ordering;

use crate::catalog::Item;

/// Returns a new sequence: items carrying `active_tag` as a theme first, then
/// the rest, each bucket sorted by display name (byte-wise, case-sensitive).
/// The id breaks ties so the result never depends on input order.
pub fn order_items(items: &[Item], active_tag: Option<&str>) -> Vec<Item> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| compare(a, b, active_tag));
    ordered
}

fn compare(a: &Item, b: &Item, active_tag: Option<&str>) -> Ordering {
    let bucket = |item: &Item| match active_tag {
        Some(tag) if item.has_theme(tag) => 0u8,
        Some(_) => 1,
        None => 0,
    };

    bucket(a)
        .cmp(&bucket(b))
        .then_with(|| a.display_name.cmp(&b.display_name))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::Item;
    use crate::graph::fixtures::item;

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    fn named(id: &str, name: &str, themes: &[&str]) -> Item {
        Item::new(
            id,
            "img.jpg",
            Some(name.to_owned()),
            themes.iter().map(|tag| tag.to_string()).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn without_tag_sorts_by_display_name() {
        let items = vec![
            named("1", "pier", &[]),
            named("2", "Harbor", &[]),
            named("3", "dune", &[]),
        ];
        let ordered = order_items(&items, None);

        let mut expected = items.iter().map(|item| item.display_name.clone()).collect::<Vec<_>>();
        expected.sort();
        let actual = ordered.iter().map(|item| item.display_name.clone()).collect::<Vec<_>>();
        assert_eq!(actual, expected);
        // Uppercase sorts before lowercase.
        assert_eq!(ids(&ordered), vec!["2", "3", "1"]);
    }

    #[test]
    fn active_tag_puts_matches_first() {
        let items = vec![
            named("1", "alpha", &["sea"]),
            named("2", "beta", &["city"]),
            named("3", "gamma", &["sea"]),
            named("4", "aardvark", &[]),
        ];
        let ordered = order_items(&items, Some("sea"));
        assert_eq!(ids(&ordered), vec!["1", "3", "4", "2"]);
    }

    #[test]
    fn moods_do_not_count_as_matches() {
        let items = vec![item("a", &[], &["sea"]), item("b", &["sea"], &[])];
        let ordered = order_items(&items, Some("sea"));
        assert_eq!(ids(&ordered), vec!["b", "a"]);
    }

    #[test]
    fn ordering_is_idempotent_and_leaves_input_untouched() {
        let items = vec![
            named("1", "same", &["x"]),
            named("0", "same", &[]),
            named("2", "other", &["x"]),
        ];
        let snapshot = items.clone();

        let once = order_items(&items, Some("x"));
        let twice = order_items(&once, Some("x"));
        assert_eq!(once, twice);
        assert_eq!(items, snapshot);

        let reversed = items.iter().rev().cloned().collect::<Vec<_>>();
        assert_eq!(order_items(&reversed, Some("x")), once);
    }
}
