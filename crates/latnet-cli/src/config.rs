use std::fs;
use std::path::{Path, PathBuf};

use latnet_core::{ErrorInfo, NetError, OutputFormat, PointSetType};
use serde::{Deserialize, Deserializer, Serialize};

/// Construction method selected by a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConstructionKind {
    /// Sobol sequence truncated to `m` digits.
    #[default]
    Sobol,
    /// Polynomial lattice rule.
    Polynomial,
    /// Explicit generating matrices.
    Explicit,
}

/// Design parameter fields; each construction reads the ones it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignConfig {
    /// Number of digits of a Sobol net.
    #[serde(default)]
    pub m: Option<usize>,
    /// Modulus of a polynomial lattice rule, coefficients from the constant term up.
    #[serde(default)]
    pub modulus: Option<String>,
    /// Rows of explicit generating matrices.
    #[serde(default)]
    pub rows: Option<usize>,
    /// Columns of explicit generating matrices.
    #[serde(default)]
    pub cols: Option<usize>,
}

/// Generating value of one coordinate as written in YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenValueConfig {
    /// Sobol direction numbers.
    Numbers(Vec<u64>),
    /// Generating polynomial, e.g. `"1 0 1"`.
    Polynomial(String),
    /// Rows of an explicit matrix, e.g. `["10", "01"]`.
    Rows(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGenValue {
    Numbers(Vec<u64>),
    Text(String),
    Rows(Vec<String>),
    Integer(u64),
    Other(serde_yaml::Value),
}

impl<'de> Deserialize<'de> for GenValueConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawGenValue::deserialize(deserializer)? {
            RawGenValue::Numbers(numbers) => Ok(Self::Numbers(numbers)),
            RawGenValue::Text(text) => Ok(Self::Polynomial(text)),
            RawGenValue::Rows(rows) => Ok(Self::Rows(rows)),
            // Leading zeros are low-order coefficients, so `011` read as an
            // integer would lose them.
            RawGenValue::Integer(value) => Err(serde::de::Error::custom(format!(
                "generating value {value} must be quoted: polynomials are strings such as \"1 1\""
            ))),
            RawGenValue::Other(value) => Err(serde::de::Error::custom(format!(
                "generating value {value:?} is not a list of direction numbers, a quoted \
                 polynomial or a list of matrix rows"
            ))),
        }
    }
}

/// YAML-configurable description of a net to build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetConfig {
    /// Construction method.
    #[serde(default)]
    pub construction: ConstructionKind,
    /// Number of coordinates.
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Design parameter.
    #[serde(default)]
    pub design: DesignConfig,
    /// Explicit generating values; the construction's defaults when empty.
    #[serde(default)]
    pub gen_values: Vec<GenValueConfig>,
    /// Master seed for random generating values, used when `gen_values` is empty.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Textual output verbosity.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Square size the net is extended to after construction.
    #[serde(default)]
    pub extend_size: Option<usize>,
    /// Combiner string; when set, per-coordinate merits are reported.
    #[serde(default)]
    pub combiner: Option<String>,
    /// Whether merits are combined over embedded levels.
    #[serde(default)]
    pub point_set_type: PointSetType,
    /// Interlacing factor of the B-IDN functor.
    #[serde(default = "default_interlacing")]
    pub interlacing: u32,
    /// Print the points after the net description.
    #[serde(default)]
    pub points: bool,
    /// Path the serialized net is written to.
    #[serde(default)]
    pub save: Option<PathBuf>,
}

fn default_dimension() -> usize {
    1
}

fn default_interlacing() -> u32 {
    2
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            construction: ConstructionKind::default(),
            dimension: default_dimension(),
            design: DesignConfig::default(),
            gen_values: Vec::new(),
            seed: None,
            output_format: OutputFormat::default(),
            extend_size: None,
            combiner: None,
            point_set_type: PointSetType::default(),
            interlacing: default_interlacing(),
            points: false,
            save: None,
        }
    }
}

impl NetConfig {
    /// Parses a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, NetError> {
        serde_yaml::from_str(contents).map_err(|err| {
            NetError::Config(ErrorInfo::new("yaml-deserialize", err.to_string()))
        })
    }

    /// Reads and parses a YAML file.
    pub fn load(path: &Path) -> Result<Self, NetError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            NetError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml(&contents)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, NetError> {
        serde_yaml::to_string(self)
            .map_err(|err| NetError::Config(ErrorInfo::new("yaml-serialize", err.to_string())))
    }
}
