//! Spores: create, transfer and melt.

pub mod engine;
pub mod types;

pub use engine::{create_spores, melt_spores, transfer_spores};
pub use types::{SporeSpec, SporeTransfer};
