//! Persistence for the stock exchange simulator
//!
//! Loads the instrument universe from a descriptor file into a matching
//! engine and saves the engine's state back out. Malformed data is rejected
//! before it reaches the engine; uniqueness is enforced by the registry.

pub mod descriptor;
pub mod store;

pub use descriptor::{Descriptor, DescriptorError, InstrumentRecord, OrderRecord};
pub use store::{load, read, save, DescriptorConfig};
