mod item;
mod load;
mod parse;

pub use item::{Catalog, CatalogMeta, Item};
pub use load::load_catalog;
