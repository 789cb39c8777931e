//! Auxiliary layout providers: plug-ins conforming to the
//! [`crate::registry::LayoutProvider`] contract, alongside the layered
//! engine.

pub mod common;
pub mod disco;
pub mod fixed;
pub mod force;
pub mod mrtree;
pub mod radial;
pub mod rectpacking;
pub mod spore;
pub mod stress;
