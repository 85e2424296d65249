//! Graph engine: link inference, ordering, filtering, force layout, hover
//! highlighting and viewport handling. Nothing in here touches egui widgets;
//! the `app` module feeds it events and draws what it produces.

pub mod interaction;
pub mod layout;
pub mod links;
pub mod ordering;
pub mod projection;
pub mod viewport;

pub use interaction::{HighlightStyle, HoverState, PointerEvent};
pub use layout::{DragEvent, ForceLayout, ForceParams, LayoutPhase, TickFrame, TickObserver};
pub use links::{Link, build_links};
pub use ordering::order_items;
pub use projection::{Projection, TagFilter, project};
pub use viewport::Viewport;
