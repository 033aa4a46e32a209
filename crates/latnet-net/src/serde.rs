use latnet_core::{ErrorInfo, NetError, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::construction::NetConstruction;
use crate::hash;
use crate::net::{DigitalNet, DigitalNetConstruction};

/// Schema version written by [`to_json`].
pub const NET_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0, 0);

#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "G: Serialize, P: Serialize",
    deserialize = "G: Deserialize<'de>, P: Deserialize<'de>"
))]
struct SerializableNet<G, P> {
    schema_version: SchemaVersion,
    provenance: RunProvenance,
    design_parameter: P,
    n_rows: usize,
    n_cols: usize,
    gen_values: Vec<G>,
}

/// Serializes a net to a JSON string.
///
/// Empty `construction` and `net_hash` fields of `provenance` are filled in.
pub fn to_json<C: NetConstruction>(
    net: &DigitalNetConstruction<C>,
    provenance: &RunProvenance,
) -> Result<String, NetError> {
    let mut provenance = provenance.clone();
    if provenance.construction.is_empty() {
        provenance.construction = C::NAME.to_string();
    }
    if provenance.net_hash.is_empty() {
        provenance.net_hash = hash::canonical_net_hash(net);
    }
    let payload = SerializableNet {
        schema_version: NET_SCHEMA_VERSION,
        provenance,
        design_parameter: net.design_parameter().clone(),
        n_rows: net.num_rows(),
        n_cols: net.num_columns(),
        gen_values: net.gen_values().cloned().collect(),
    };
    serde_json::to_string_pretty(&payload)
        .map_err(|err| NetError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a net from a JSON string, recomputing every generating matrix.
pub fn from_json<C: NetConstruction>(
    data: &str,
) -> Result<(DigitalNetConstruction<C>, RunProvenance), NetError> {
    let payload: SerializableNet<C::GenValue, C::DesignParameter> = serde_json::from_str(data)
        .map_err(|err| NetError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))?;

    if payload.schema_version.major != NET_SCHEMA_VERSION.major {
        let info = ErrorInfo::new("schema-mismatch", "unsupported net schema version")
            .with_context("found", format!("{:?}", payload.schema_version))
            .with_context("expected", format!("{:?}", NET_SCHEMA_VERSION));
        return Err(NetError::Serde(info));
    }
    if payload.provenance.construction != C::NAME {
        let info = ErrorInfo::new("construction-mismatch", "payload was built by another construction")
            .with_context("found", payload.provenance.construction.clone())
            .with_context("expected", C::NAME);
        return Err(NetError::Serde(info));
    }

    let dimension = payload.gen_values.len();
    let mut net =
        DigitalNetConstruction::<C>::with_gen_values(dimension, payload.design_parameter, payload.gen_values)?;
    if (net.num_rows(), net.num_columns()) != (payload.n_rows, payload.n_cols) {
        net.extend_size(payload.n_rows, payload.n_cols)?;
    }

    let recomputed = hash::canonical_net_hash(&net);
    if recomputed != payload.provenance.net_hash {
        let info = ErrorInfo::new("net-hash-mismatch", "restored matrices do not match the stored hash")
            .with_context("stored", payload.provenance.net_hash.clone())
            .with_context("recomputed", recomputed);
        return Err(NetError::Serde(info));
    }
    Ok((net, payload.provenance))
}

/// Serializes a net into a binary blob.
pub fn to_bytes<C: NetConstruction>(
    net: &DigitalNetConstruction<C>,
    provenance: &RunProvenance,
) -> Result<Vec<u8>, NetError> {
    let json = to_json(net, provenance)?;
    bincode::serialize(&json)
        .map_err(|err| NetError::Serde(ErrorInfo::new("bincode-serialize", err.to_string())))
}

/// Rehydrates a net from a binary blob.
pub fn from_bytes<C: NetConstruction>(
    bytes: &[u8],
) -> Result<(DigitalNetConstruction<C>, RunProvenance), NetError> {
    let json: String = bincode::deserialize(bytes)
        .map_err(|err| NetError::Serde(ErrorInfo::new("bincode-deserialize", err.to_string())))?;
    from_json(&json)
}
