//! Maps a fully-qualified algorithm id to a fresh [`LayoutProvider`].

use crate::error::Result;
use crate::graph::{Container, OptionMap};

/// Common contract every layout algorithm (the layered engine and every
/// auxiliary provider) implements. On success, every direct child of
/// `container` has `x`, `y`, `width`, `height` set, every edge in
/// `container.edges` has a non-empty `sections` list, and
/// `container.width`/`container.height` enclose all children plus
/// right/bottom padding.
pub trait LayoutProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()>;
}

/// Fully qualified algorithm ids this registry knows how to construct a
/// provider for, in registration order.
pub const KNOWN_ALGORITHMS: &[&str] = &[
    "org.eclipse.elk.layered",
    "org.eclipse.elk.stress",
    "org.eclipse.elk.force",
    "org.eclipse.elk.mrtree",
    "org.eclipse.elk.radial",
    "org.eclipse.elk.rectpacking",
    "org.eclipse.elk.sporeOverlap",
    "org.eclipse.elk.sporeCompaction",
    "org.eclipse.elk.fixed",
    "org.eclipse.elk.disco",
];

/// Construct a fresh provider for `algorithm_id`, or `None` if the id is
/// unregistered.
pub fn get_layout_provider(algorithm_id: &str) -> Option<Box<dyn LayoutProvider>> {
    match algorithm_id {
        "org.eclipse.elk.layered" => Some(Box::new(crate::layered::LayeredProvider)),
        "org.eclipse.elk.stress" => Some(Box::new(crate::providers::stress::StressProvider)),
        "org.eclipse.elk.force" => Some(Box::new(crate::providers::force::ForceProvider)),
        "org.eclipse.elk.mrtree" => Some(Box::new(crate::providers::mrtree::MrTreeProvider)),
        "org.eclipse.elk.radial" => Some(Box::new(crate::providers::radial::RadialProvider)),
        "org.eclipse.elk.rectpacking" => {
            Some(Box::new(crate::providers::rectpacking::RectpackingProvider))
        }
        "org.eclipse.elk.sporeOverlap" => {
            Some(Box::new(crate::providers::spore::SporeProvider))
        }
        "org.eclipse.elk.sporeCompaction" => {
            Some(Box::new(crate::providers::spore::SporeProvider))
        }
        "org.eclipse.elk.fixed" => Some(Box::new(crate::providers::fixed::FixedProvider)),
        "org.eclipse.elk.disco" => Some(Box::new(crate::providers::disco::DiscoProvider)),
        _ => None,
    }
}
