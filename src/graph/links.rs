use std::collections::HashSet;

use crate::catalog::Item;

/// Undirected link between two items that share at least one theme or mood.
/// `source` is the item that came first in the input sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Link {
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    pub fn opposite(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(self.target.as_str())
        } else if self.target == id {
            Some(self.source.as_str())
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Links every unordered pair `(i, j)`, `i < j`, whose theme sets or mood sets
/// intersect. Quadratic in the item count, which is fine for the tens to low
/// hundreds of items a catalog holds.
pub fn build_links(items: &[Item]) -> Vec<Link> {
    let mut links = Vec::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for (index, first) in items.iter().enumerate() {
        for second in &items[index + 1..] {
            if first.id == second.id {
                continue;
            }
            if !first.shares_theme_with(second) && !first.shares_mood_with(second) {
                continue;
            }

            let key = if first.id < second.id {
                (first.id.as_str(), second.id.as_str())
            } else {
                (second.id.as_str(), first.id.as_str())
            };
            if !seen.insert(key) {
                continue;
            }

            links.push(Link {
                source: first.id.clone(),
                target: second.id.clone(),
            });
        }
    }

    links
}
