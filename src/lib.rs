//! A multi-phase layered layout engine for hierarchical directed graphs,
//! modeled on the Eclipse Layout Kernel. The typical entry point is
//! [`LayoutDriver`], constructed once and reused across calls.

pub mod driver;
pub mod error;
pub mod graph;
pub mod options;
pub mod registry;
pub mod validate;

mod layered;
mod providers;

pub use driver::LayoutDriver;
pub use error::{LayoutError, Result};
pub use graph::{Container, Edge, Label, OptionMap, Point, Port, PortSide, Section};
pub use options::OptionKind;

/// Lay out `graph` (a raw wire-format JSON value) with the default
/// option set and no per-call overrides, logging, or timing. The
/// convenience path for callers that don't need a reusable driver.
pub fn layout(graph: serde_json::Value) -> Result<serde_json::Value> {
    LayoutDriver::new(options::defaults()).layout_json(Some(graph), None, false, false)
}
