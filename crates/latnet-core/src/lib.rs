#![deny(missing_docs)]
#![doc = "Shared error surface, output formats, provenance descriptors and deterministic seeding for the digital net crates."]

pub mod errors;
pub mod provenance;
pub mod rng;
mod types;

pub use errors::{ErrorInfo, NetError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
pub use types::{pow2, Compress, OutputFormat, PointSetType, Real};
