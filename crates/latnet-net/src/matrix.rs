use std::fmt;

use latnet_core::{ErrorInfo, NetError};
use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// Dense bit matrix over GF(2).
///
/// Row `r` holds the coefficients that, combined with the binary digits of a
/// point index (column `c` <-> digit `c`, least significant first), give the
/// `r`-th binary digit of the point's coordinate.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix", into = "RawMatrix")]
pub struct GeneratingMatrix {
    n_rows: usize,
    n_cols: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl GeneratingMatrix {
    /// Creates an all-zero matrix.
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        let words_per_row = n_cols.div_ceil(WORD_BITS);
        Self {
            n_rows,
            n_cols,
            words_per_row,
            bits: vec![0; n_rows * words_per_row],
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::new(n, n);
        for i in 0..n {
            matrix.set(i, i, true);
        }
        matrix
    }

    /// Parses rows written as strings of `0`/`1` characters; spaces are ignored.
    pub fn from_row_strings<S: AsRef<str>>(rows: &[S]) -> Result<Self, NetError> {
        let parsed: Vec<Vec<bool>> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                row.as_ref()
                    .chars()
                    .filter(|ch| !ch.is_whitespace())
                    .map(|ch| match ch {
                        '0' => Ok(false),
                        '1' => Ok(true),
                        other => Err(NetError::InvalidArgument(
                            ErrorInfo::new("invalid-matrix-digit", "matrix rows may only hold 0 and 1")
                                .with_context("row", idx.to_string())
                                .with_context("digit", other.to_string()),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<_, _>>()?;

        let n_cols = parsed.first().map(Vec::len).unwrap_or(0);
        if let Some(idx) = parsed.iter().position(|row| row.len() != n_cols) {
            let info = ErrorInfo::new("ragged-matrix", "all matrix rows must have the same length")
                .with_context("row", idx.to_string())
                .with_context("expected_cols", n_cols.to_string());
            return Err(NetError::InvalidArgument(info));
        }

        let mut matrix = Self::new(parsed.len(), n_cols);
        for (r, row) in parsed.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                matrix.set(r, c, bit);
            }
        }
        Ok(matrix)
    }

    /// Returns the number of rows.
    pub fn num_rows(&self) -> usize {
        self.n_rows
    }

    /// Returns the number of columns.
    pub fn num_cols(&self) -> usize {
        self.n_cols
    }

    /// Returns the bit at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics when the position lies outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.n_rows && col < self.n_cols, "bit position out of bounds");
        let word = self.bits[row * self.words_per_row + col / WORD_BITS];
        (word >> (col % WORD_BITS)) & 1 == 1
    }

    /// Sets the bit at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics when the position lies outside the matrix.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.n_rows && col < self.n_cols, "bit position out of bounds");
        let word = &mut self.bits[row * self.words_per_row + col / WORD_BITS];
        let mask = 1u64 << (col % WORD_BITS);
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }

    /// Returns the first 64 columns of `row` packed into a word (column `c` at bit `c`).
    pub fn row_word(&self, row: usize) -> u64 {
        if self.words_per_row == 0 {
            return 0;
        }
        self.bits[row * self.words_per_row]
    }

    /// Returns the parity of `row` restricted to the columns set in `digits`.
    pub fn row_parity(&self, row: usize, digits: u64) -> bool {
        (self.row_word(row) & digits).count_ones() % 2 == 1
    }

    /// Returns the upper-left `n_rows x n_cols` sub-matrix.
    pub fn sub_matrix(&self, n_rows: usize, n_cols: usize) -> Result<Self, NetError> {
        if n_rows > self.n_rows || n_cols > self.n_cols {
            let info = ErrorInfo::new("sub-matrix-too-large", "sub-matrix exceeds the matrix extent")
                .with_context("requested", format!("{n_rows}x{n_cols}"))
                .with_context("available", format!("{}x{}", self.n_rows, self.n_cols));
            return Err(NetError::OutOfRange(info));
        }
        let mut sub = Self::new(n_rows, n_cols);
        for r in 0..n_rows {
            for w in 0..sub.words_per_row {
                sub.bits[r * sub.words_per_row + w] = self.bits[r * self.words_per_row + w];
            }
            if n_cols % WORD_BITS != 0 {
                let last = r * sub.words_per_row + sub.words_per_row - 1;
                sub.bits[last] &= (1u64 << (n_cols % WORD_BITS)) - 1;
            }
        }
        Ok(sub)
    }

    /// Grows the matrix to `n_rows x n_cols`; existing bits keep their position
    /// and new entries are zero.
    pub fn grow(&mut self, n_rows: usize, n_cols: usize) -> Result<(), NetError> {
        if n_rows < self.n_rows || n_cols < self.n_cols {
            let info = ErrorInfo::new("matrix-shrink", "matrices can only grow")
                .with_context("requested", format!("{n_rows}x{n_cols}"))
                .with_context("current", format!("{}x{}", self.n_rows, self.n_cols));
            return Err(NetError::InvalidArgument(info));
        }
        let mut grown = Self::new(n_rows, n_cols);
        for r in 0..self.n_rows {
            for w in 0..self.words_per_row {
                grown.bits[r * grown.words_per_row + w] = self.bits[r * self.words_per_row + w];
            }
        }
        *self = grown;
        Ok(())
    }

    /// Computes the rank over GF(2) by Gauss-Jordan elimination.
    pub fn rank(&self) -> usize {
        let mut rows: Vec<Vec<u64>> = (0..self.n_rows)
            .map(|r| self.bits[r * self.words_per_row..(r + 1) * self.words_per_row].to_vec())
            .collect();
        let mut rank = 0;
        for col in 0..self.n_cols {
            let bucket = col / WORD_BITS;
            let offset = col % WORD_BITS;
            let Some(pivot) = (rank..rows.len()).find(|&i| (rows[i][bucket] >> offset) & 1 == 1)
            else {
                continue;
            };
            rows.swap(rank, pivot);
            for j in 0..rows.len() {
                if j != rank && (rows[j][bucket] >> offset) & 1 == 1 {
                    for k in 0..self.words_per_row {
                        rows[j][k] ^= rows[rank][k];
                    }
                }
            }
            rank += 1;
            if rank == rows.len() {
                break;
            }
        }
        rank
    }

    /// Iterates over the raw storage words, row by row.
    pub(crate) fn words(&self) -> &[u64] {
        &self.bits
    }
}

impl fmt::Display for GeneratingMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.n_rows {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.n_cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", u8::from(self.get(r, c)))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for GeneratingMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratingMatrix")
            .field("n_rows", &self.n_rows)
            .field("n_cols", &self.n_cols)
            .field("rows", &RawMatrix::from(self.clone()).rows)
            .finish()
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawMatrix {
    n_cols: usize,
    rows: Vec<String>,
}

impl From<GeneratingMatrix> for RawMatrix {
    fn from(matrix: GeneratingMatrix) -> Self {
        let rows = (0..matrix.n_rows)
            .map(|r| {
                (0..matrix.n_cols)
                    .map(|c| if matrix.get(r, c) { '1' } else { '0' })
                    .collect()
            })
            .collect();
        Self {
            n_cols: matrix.n_cols,
            rows,
        }
    }
}

impl TryFrom<RawMatrix> for GeneratingMatrix {
    type Error = NetError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        if raw.rows.is_empty() {
            return Ok(GeneratingMatrix::new(0, raw.n_cols));
        }
        let matrix = GeneratingMatrix::from_row_strings(&raw.rows)?;
        if matrix.n_cols != raw.n_cols {
            let info = ErrorInfo::new("matrix-width-mismatch", "row width disagrees with n_cols")
                .with_context("n_cols", raw.n_cols.to_string())
                .with_context("row_width", matrix.n_cols.to_string());
            return Err(NetError::Serde(info));
        }
        Ok(matrix)
    }
}
