#![deny(missing_docs)]
#![doc = "Digital nets in base 2: generating matrices over GF(2), construction methods (Sobol, polynomial lattice, explicit) and the net abstraction supporting dimension and size extension."]

/// Construction methods and the strategy trait they implement.
pub mod construction;
/// Polynomials over GF(2).
pub mod gf2;
/// Canonical hashing of nets.
pub mod hash;
/// Bit matrices over GF(2).
pub mod matrix;
/// The digital net abstraction and its generic implementation.
pub mod net;
/// Point coordinates generated by a net.
pub mod points;
/// Serialization routines for JSON and binary round-trips.
pub mod serde;

pub use construction::{
    Explicit, ExplicitShape, NetConstruction, PolynomialLattice, Sobol, SobolGenValue,
    MAX_DIGITS, MAX_SOBOL_COORDINATE,
};
pub use gf2::Polynomial;
pub use hash::canonical_net_hash;
pub use matrix::GeneratingMatrix;
pub use net::{DigitalNet, DigitalNetConstruction};
pub use points::{coordinate_value, coordinate_values, points, MAX_POINT_COLUMNS};
pub use serde::{from_bytes, from_json, to_bytes, to_json};

/// Sobol net.
pub type SobolNet = DigitalNetConstruction<Sobol>;
/// Polynomial lattice rule viewed as a digital net.
pub type PolynomialNet = DigitalNetConstruction<PolynomialLattice>;
/// Net given by explicit generating matrices.
pub type ExplicitNet = DigitalNetConstruction<Explicit>;
