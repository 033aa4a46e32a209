use std::fmt;
use std::sync::Arc;

use latnet_core::{ErrorInfo, NetError, OutputFormat};
use log::{debug, warn};

use crate::construction::{not_sequence_viewable, NetConstruction};
use crate::matrix::GeneratingMatrix;

/// Digital net in base 2, uniquely defined by one generating matrix per coordinate.
///
/// Coordinates are 1-indexed. Implementations guarantee that every matrix
/// has the logical extent `num_rows() x num_columns()`.
pub trait DigitalNet: fmt::Debug + Send + Sync {
    /// Number of coordinates.
    fn dimension(&self) -> usize;

    /// Number of rows of the generating matrices.
    fn num_rows(&self) -> usize;

    /// Number of columns of the generating matrices.
    fn num_columns(&self) -> usize;

    /// Number of points, `2^num_columns()`.
    fn num_points(&self) -> u64 {
        1u64 << self.num_columns()
    }

    /// Alias of [`DigitalNet::num_points`].
    fn size(&self) -> u64 {
        self.num_points()
    }

    /// Returns a copy of the generating matrix of coordinate `coord`.
    fn generating_matrix(&self, coord: usize) -> Result<GeneratingMatrix, NetError>;

    /// Borrows the generating matrix of coordinate `coord`.
    fn pointer_to_generating_matrix(&self, coord: usize) -> Result<&GeneratingMatrix, NetError>;

    /// Renders the net; the verbosity depends on `output_format`.
    fn format(&self, output_format: OutputFormat) -> String;

    /// Whether the net can be viewed as a prefix of a digital sequence.
    fn is_sequence_viewable(&self) -> bool;

    /// Grows every generating matrix to `n_rows x n_cols` in place.
    ///
    /// Fails with [`NetError::Unsupported`] when the net is not sequence viewable.
    fn extend_size(&mut self, n_rows: usize, n_cols: usize) -> Result<(), NetError>;
}

/// Digital net built by the construction method `C`.
///
/// Matrices, generating values and computation data are stored in parallel
/// vectors behind `Arc`, so nets derived through
/// [`DigitalNetConstruction::extend_dimension`] share their prefix with the
/// net they were derived from.
pub struct DigitalNetConstruction<C: NetConstruction> {
    design_parameter: C::DesignParameter,
    n_rows: usize,
    n_cols: usize,
    matrices: Vec<Arc<GeneratingMatrix>>,
    gen_values: Vec<Arc<C::GenValue>>,
    computation_data: Vec<Arc<C::ComputationData>>,
}

impl<C: NetConstruction> DigitalNetConstruction<C> {
    /// Builds a net of `dimension` coordinates from the default generating values.
    pub fn new(dimension: usize, design_parameter: C::DesignParameter) -> Result<Self, NetError> {
        C::check_design_parameter(&design_parameter)?;
        let gen_values = C::default_gen_values(dimension, &design_parameter)?;
        Self::with_gen_values(dimension, design_parameter, gen_values)
    }

    /// Builds a net of dimension zero with the default design parameter.
    pub fn empty() -> Result<Self, NetError> {
        Self::new(0, C::default_design_parameter())
    }

    /// Builds a net from explicit generating values, one per coordinate.
    pub fn with_gen_values(
        dimension: usize,
        design_parameter: C::DesignParameter,
        gen_values: Vec<C::GenValue>,
    ) -> Result<Self, NetError> {
        if gen_values.len() != dimension {
            let info = ErrorInfo::new(
                "gen-values-length-mismatch",
                "one generating value is required per coordinate",
            )
            .with_context("dimension", dimension.to_string())
            .with_context("gen_values", gen_values.len().to_string());
            return Err(NetError::InvalidArgument(info));
        }
        C::check_design_parameter(&design_parameter)?;

        let mut matrices = Vec::with_capacity(dimension);
        let mut values = Vec::with_capacity(dimension);
        let mut computation_data = Vec::with_capacity(dimension);
        for (idx, gen) in gen_values.into_iter().enumerate() {
            C::check_gen_value(&gen, &design_parameter).map_err(|err| with_coordinate(err, idx + 1))?;
            let (matrix, data) = C::create_generating_matrix(&gen, &design_parameter)?;
            matrices.push(Arc::new(matrix));
            values.push(Arc::new(gen));
            computation_data.push(Arc::new(data));
        }
        debug!(
            "built {} net of dimension {} ({}x{})",
            C::NAME,
            dimension,
            C::n_rows(&design_parameter),
            C::n_cols(&design_parameter)
        );

        Ok(Self {
            n_rows: C::n_rows(&design_parameter),
            n_cols: C::n_cols(&design_parameter),
            design_parameter,
            matrices,
            gen_values: values,
            computation_data,
        })
    }

    /// Returns a net with one more coordinate generated by `new_gen_value`.
    ///
    /// The matrices of the first `dimension()` coordinates are shared with
    /// `self`, not copied; only the new coordinate is computed.
    pub fn extend_dimension(&self, new_gen_value: C::GenValue) -> Result<Self, NetError> {
        let coord = self.dimension() + 1;
        C::check_gen_value(&new_gen_value, &self.design_parameter)
            .map_err(|err| with_coordinate(err, coord))?;
        let (mut matrix, mut data) =
            C::create_generating_matrix(&new_gen_value, &self.design_parameter)?;
        if (matrix.num_rows(), matrix.num_cols()) != (self.n_rows, self.n_cols) {
            // `self` was size-extended; bring the new coordinate to the same shape.
            C::extend_generating_matrices(
                self.n_rows,
                self.n_cols,
                std::slice::from_mut(&mut matrix),
                std::slice::from_mut(&mut data),
            )?;
        }

        let mut matrices = self.matrices.clone();
        matrices.push(Arc::new(matrix));
        let mut gen_values = self.gen_values.clone();
        gen_values.push(Arc::new(new_gen_value));
        let mut computation_data = self.computation_data.clone();
        computation_data.push(Arc::new(data));
        debug!("extended {} net to dimension {}", C::NAME, coord);

        Ok(Self {
            design_parameter: self.design_parameter.clone(),
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            matrices,
            gen_values,
            computation_data,
        })
    }

    /// Returns the design parameter.
    pub fn design_parameter(&self) -> &C::DesignParameter {
        &self.design_parameter
    }

    /// Returns the generating value of coordinate `coord`.
    pub fn gen_value(&self, coord: usize) -> Result<&C::GenValue, NetError> {
        let idx = self.index(coord)?;
        Ok(&self.gen_values[idx])
    }

    /// Returns all generating values in coordinate order.
    pub fn gen_values(&self) -> impl ExactSizeIterator<Item = &C::GenValue> + '_ {
        self.gen_values.iter().map(|gen| gen.as_ref())
    }

    /// Returns the computation data of coordinate `coord`.
    pub fn computation_data(&self, coord: usize) -> Result<&C::ComputationData, NetError> {
        let idx = self.index(coord)?;
        Ok(&self.computation_data[idx])
    }

    /// Returns the shared handle to the matrix of coordinate `coord`.
    pub fn shared_generating_matrix(&self, coord: usize) -> Result<Arc<GeneratingMatrix>, NetError> {
        let idx = self.index(coord)?;
        Ok(Arc::clone(&self.matrices[idx]))
    }

    pub(crate) fn stored_matrices(&self) -> impl ExactSizeIterator<Item = &GeneratingMatrix> + '_ {
        self.matrices.iter().map(|m| m.as_ref())
    }

    /// Returns a copy whose matrices are not shared with any other net.
    pub fn detached(&self) -> Self {
        Self {
            design_parameter: self.design_parameter.clone(),
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            matrices: self
                .matrices
                .iter()
                .map(|m| Arc::new(GeneratingMatrix::clone(m)))
                .collect(),
            gen_values: self.gen_values.clone(),
            computation_data: self
                .computation_data
                .iter()
                .map(|d| Arc::new(C::ComputationData::clone(d)))
                .collect(),
        }
    }

    fn index(&self, coord: usize) -> Result<usize, NetError> {
        if coord == 0 || coord > self.matrices.len() {
            let info = ErrorInfo::new(
                "coordinate-out-of-range",
                "coordinate must lie in [1, dimension]",
            )
            .with_context("coord", coord.to_string())
            .with_context("dimension", self.matrices.len().to_string())
            .with_hint("coordinates are 1-indexed");
            return Err(NetError::OutOfRange(info));
        }
        Ok(coord - 1)
    }
}

fn with_coordinate(err: NetError, coord: usize) -> NetError {
    match err {
        NetError::InvalidArgument(info) => {
            NetError::InvalidArgument(info.with_context("coord", coord.to_string()))
        }
        other => other,
    }
}

impl<C: NetConstruction> DigitalNet for DigitalNetConstruction<C> {
    fn dimension(&self) -> usize {
        self.matrices.len()
    }

    fn num_rows(&self) -> usize {
        self.n_rows
    }

    fn num_columns(&self) -> usize {
        self.n_cols
    }

    fn generating_matrix(&self, coord: usize) -> Result<GeneratingMatrix, NetError> {
        let idx = self.index(coord)?;
        self.matrices[idx].sub_matrix(self.n_rows, self.n_cols)
    }

    fn pointer_to_generating_matrix(&self, coord: usize) -> Result<&GeneratingMatrix, NetError> {
        let idx = self.index(coord)?;
        Ok(&self.matrices[idx])
    }

    fn format(&self, output_format: OutputFormat) -> String {
        let mut res = C::format(&self.gen_values, &self.design_parameter, output_format);
        if output_format == OutputFormat::Gui {
            res.push_str("\n\n");
            for (idx, matrix) in self.matrices.iter().enumerate() {
                res.push_str(&format!("//dim = {}\n{matrix}\n", idx + 1));
            }
        }
        res
    }

    fn is_sequence_viewable(&self) -> bool {
        C::IS_SEQUENCE_VIEWABLE
    }

    fn extend_size(&mut self, n_rows: usize, n_cols: usize) -> Result<(), NetError> {
        if !C::IS_SEQUENCE_VIEWABLE {
            warn!("rejected size extension of a {} net", C::NAME);
            return Err(not_sequence_viewable(C::NAME, n_rows, n_cols));
        }

        // Work on private copies so a failure leaves `self` untouched and
        // nets sharing these matrices never observe the growth.
        let mut matrices: Vec<GeneratingMatrix> =
            self.matrices.iter().map(|m| GeneratingMatrix::clone(m)).collect();
        let mut data: Vec<C::ComputationData> = self
            .computation_data
            .iter()
            .map(|d| C::ComputationData::clone(d))
            .collect();
        C::extend_generating_matrices(n_rows, n_cols, &mut matrices, &mut data)?;

        if let Some(bad) = matrices
            .iter()
            .position(|m| m.num_rows() != n_rows || m.num_cols() != n_cols)
        {
            let info = ErrorInfo::new(
                "extension-shape-mismatch",
                "extended matrix does not have the requested shape",
            )
            .with_context("construction", C::NAME)
            .with_context("coord", (bad + 1).to_string())
            .with_context("requested", format!("{n_rows}x{n_cols}"));
            return Err(NetError::Logic(info));
        }

        self.matrices = matrices.into_iter().map(Arc::new).collect();
        self.computation_data = data.into_iter().map(Arc::new).collect();
        self.n_rows = n_rows;
        self.n_cols = n_cols;
        debug!("extended {} net to {}x{}", C::NAME, n_rows, n_cols);
        Ok(())
    }
}

impl<C: NetConstruction> Clone for DigitalNetConstruction<C> {
    /// Shallow clone: the new net shares every matrix with `self`.
    fn clone(&self) -> Self {
        Self {
            design_parameter: self.design_parameter.clone(),
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            matrices: self.matrices.clone(),
            gen_values: self.gen_values.clone(),
            computation_data: self.computation_data.clone(),
        }
    }
}

impl<C: NetConstruction> fmt::Debug for DigitalNetConstruction<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalNetConstruction")
            .field("construction", &C::NAME)
            .field("design_parameter", &self.design_parameter)
            .field("n_rows", &self.n_rows)
            .field("n_cols", &self.n_cols)
            .field("dimension", &self.matrices.len())
            .finish_non_exhaustive()
    }
}
