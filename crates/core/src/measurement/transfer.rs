//! Log-linear transfer matrices
//!
//! Expressing a quantity through defining units is multiplicative:
//!
//! ```text
//! U = value × u_1^n_1 × u_2^n_2 × … × u_N^n_N
//! ```
//!
//! Taking logarithms makes it linear, so every quantity becomes the augmented
//! row vector `[ln|value|, n_1, …, n_N]` and every measurement system becomes an
//! (N+1)×(N+1) matrix acting on it from the right:
//!
//! ```text
//! row 0:  [1,            0,          …, 0         ]
//! row i:  [ln(u_i.value), u_i.dim[0], …, u_i.dim[N-1]]
//! ```
//!
//! `v · M` maps a measurement-system vector into the underlying physical system,
//! `v · M⁻¹` maps back. Row 0 is a unit basis vector, so the determinant of `M`
//! equals the determinant of the exponent block: it depends only on the
//! dimensions of the defining units, never on their magnitudes.

use nalgebra::{DMatrix, RowDVector};
use tracing::{debug, warn};

use crate::core_types::{Dimension, PhysicalQuantity};
use crate::error::{Result, UnitsError};

/// Normalized determinants at or below this magnitude are treated as singular.
///
/// The determinant is divided by the product of the exponent rows' Euclidean norms
/// (Hadamard's bound), giving a ratio in `[0, 1]` that does not change when a
/// defining unit's exponents are uniformly rescaled.
pub const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// Normalized determinants below this magnitude are accepted but logged as
/// ill-conditioned
pub const CONDITIONING_WARNING: f64 = 1e-6;

/// Transfer matrix of a measurement system with its cached inverse
#[derive(Debug, Clone, PartialEq)]
pub struct TransferMatrix {
    matrix: DMatrix<f64>,
    inverse: DMatrix<f64>,
    determinant: f64,
}

impl TransferMatrix {
    /// Build the matrix from strictly positive defining quantities.
    ///
    /// # Arguments
    /// * `system` - Name of the measurement system, used in errors and logs
    /// * `definitions` - N defining quantities over an N-quantity physical system
    ///
    /// # Errors
    /// [`UnitsError::SingularBasis`] if the defining dimensions are dependent.
    pub(crate) fn from_definitions(
        system: &str,
        definitions: &[&PhysicalQuantity],
    ) -> Result<Self> {
        let n = definitions.len();
        let mut matrix = DMatrix::<f64>::zeros(n + 1, n + 1);
        matrix[(0, 0)] = 1.0;
        for (i, q) in definitions.iter().enumerate() {
            matrix[(i + 1, 0)] = q.value().ln();
            for (j, exponent) in q.dimension().exponents().iter().enumerate() {
                matrix[(i + 1, j + 1)] = *exponent;
            }
        }

        let determinant = matrix.determinant();
        let singular = || UnitsError::SingularBasis {
            system: system.to_string(),
            determinant,
        };
        let conditioning = normalized_determinant(&matrix, determinant);
        if !conditioning.is_finite() || conditioning <= SINGULARITY_TOLERANCE {
            return Err(singular());
        }
        if conditioning < CONDITIONING_WARNING {
            warn!(
                "Transfer matrix of '{}' is poorly conditioned (determinant {:e}, normalized {:e})",
                system, determinant, conditioning
            );
        }

        let inverse = matrix.clone().try_inverse().ok_or_else(singular)?;
        debug!(
            "Built {}x{} transfer matrix for '{}' (determinant {})",
            n + 1,
            n + 1,
            system,
            determinant
        );

        Ok(TransferMatrix {
            matrix,
            inverse,
            determinant,
        })
    }

    /// Matrix mapping this system's vectors into the underlying system
    #[inline]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Inverse matrix mapping underlying vectors into this system
    #[inline]
    pub fn inverse(&self) -> &DMatrix<f64> {
        &self.inverse
    }

    /// Determinant of [`Self::matrix`]
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    /// Number of base quantities N (the matrix is N+1 square)
    #[inline]
    pub fn base_count(&self) -> usize {
        self.matrix.nrows() - 1
    }
}

/// `|det|` divided by the product of the exponent-block row norms.
///
/// Row 0 is `[1, 0, …]`, so `det` equals the exponent block's determinant and
/// the log column plays no part. A zero row yields 0.
fn normalized_determinant(matrix: &DMatrix<f64>, determinant: f64) -> f64 {
    let n = matrix.nrows();
    let mut bound = 1.0;
    for i in 1..n {
        let norm = matrix.view((i, 1), (1, n - 1)).norm();
        if norm == 0.0 {
            return 0.0;
        }
        bound *= norm;
    }
    determinant.abs() / bound
}

/// Push `(value, dimension)` through a chain of transfer matrices.
///
/// The sign of `value` is carried outside the logarithm and a zero value stays
/// zero; only the dimension is transformed for it.
///
/// # Errors
/// [`UnitsError::InvalidValue`] if the resulting magnitude overflows.
pub(crate) fn transform(
    value: f64,
    dimension: &Dimension,
    chain: &[&DMatrix<f64>],
) -> Result<(f64, Dimension)> {
    let log_value = if value == 0.0 { 0.0 } else { value.abs().ln() };
    let mut v = RowDVector::<f64>::from_iterator(
        dimension.len() + 1,
        std::iter::once(log_value).chain(dimension.exponents().iter().copied()),
    );
    for m in chain {
        v = &v * *m;
    }

    let magnitude = if value == 0.0 {
        0.0
    } else {
        value.signum() * v[0].exp()
    };
    let magnitude = UnitsError::check_finite(magnitude, "transfer")?;
    let dimension = Dimension::new(v.iter().skip(1).copied().collect::<Vec<_>>());
    Ok((magnitude, dimension))
}
