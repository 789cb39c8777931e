//! `disco` is registered (it resolves as a known algorithm id) but is
//! deliberately unimplemented: no real `disco` layouter is provided. Calling it always fails with
//! `UnsupportedConfiguration` rather than silently aliasing to another
//! provider.

use crate::error::{LayoutError, Result};
use crate::graph::{Container, OptionMap};
use crate::registry::LayoutProvider;

pub struct DiscoProvider;

impl LayoutProvider for DiscoProvider {
    fn layout(&self, _container: &mut Container, _global_options: &OptionMap) -> Result<()> {
        Err(LayoutError::UnsupportedConfiguration(
            "\"org.eclipse.elk.disco\" has no implementation".to_string(),
        ))
    }
}
