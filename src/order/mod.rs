//! Derived diagnostic orders and their propagation to the order station.

pub mod client;
pub mod composer;

pub use client::{PropagationClient, PropagationResult, PropagationStatus};
pub use composer::{AbsoluteReference, ComposedOrder, OrderComposer, OrderPriority};

use crate::error::Result;

/// Serializes a composed order to the interchange format the order station
/// accepts. The record server owns the wire parser; this crate only carries
/// the seam.
pub trait OrderEncoder: Send + Sync {
    fn encode(&self, order: &ComposedOrder) -> Result<String>;
}
