// Layout primitives shared by every template skin: static font metrics,
// greedy word wrap, the positioned render tree, and the non-reflowing scale.
// Layout is synchronous and pure; callers on the async side keep it off the
// runtime only when it is part of a CPU-heavy export.

pub mod flow;
pub mod font_metrics;
pub mod scale;
pub mod tree;
pub mod wrap;

pub use flow::{Align, Flow, TextStyle};
pub use font_metrics::{FontFamily, FontWeight};
pub use scale::{ScaleCoordinator, ScaleError, ScaleTransform};
pub use tree::{Node, NodeKind, Paint, Rect, RenderedTree};
