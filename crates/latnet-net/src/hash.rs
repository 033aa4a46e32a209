use sha2::{Digest, Sha256};

use crate::construction::NetConstruction;
use crate::matrix::GeneratingMatrix;
use crate::net::{DigitalNet, DigitalNetConstruction};

fn update_matrix(hasher: &mut Sha256, matrix: &GeneratingMatrix) {
    hasher.update((matrix.num_rows() as u64).to_le_bytes());
    hasher.update((matrix.num_cols() as u64).to_le_bytes());
    for word in matrix.words() {
        hasher.update(word.to_le_bytes());
    }
}

/// Computes the canonical structural hash of a net.
///
/// Two nets hash equal when they come from the same construction method and
/// have identical generating matrices, whatever generating values produced them.
pub fn canonical_net_hash<C: NetConstruction>(net: &DigitalNetConstruction<C>) -> String {
    let mut hasher = Sha256::new();
    hasher.update((C::NAME.len() as u64).to_le_bytes());
    hasher.update(C::NAME.as_bytes());
    hasher.update((net.dimension() as u64).to_le_bytes());
    hasher.update((net.num_rows() as u64).to_le_bytes());
    hasher.update((net.num_columns() as u64).to_le_bytes());

    for matrix in net.stored_matrices() {
        update_matrix(&mut hasher, matrix);
    }

    let digest = hasher.finalize();
    digest
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}
