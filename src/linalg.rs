//! linalg — dense helpers shared by the estimation and inference layers.
//!
//! Public matrices in this crate are `ndarray` arrays. Factorizations
//! (inverse, Cholesky) are delegated to `nalgebra` by copying into a
//! `DMatrix`, and failures are mapped into [`SvarError`] so callers can
//! propagate them with `?`.
//!
//! Flattening convention: every `vec(·)` in the crate is column-major, so
//! entry `(i, j)` of an `r × c` matrix lands at position `j·r + i`. The
//! Kronecker identities used by the Wald covariance and the gradient
//! matrices (`vec(A X B) = (Bᵀ ⊗ A) vec(X)`) rely on this.
use crate::errors::{SvarError, SvarResult};
use nalgebra::{DMatrix, linalg::Cholesky};
use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Copy an `ndarray` matrix into a `nalgebra::DMatrix`.
pub(crate) fn to_dmatrix<S: Data<Elem = f64>>(a: &ArrayBase<S, Ix2>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Copy a `nalgebra::DMatrix` back into an `ndarray` matrix.
pub(crate) fn from_dmatrix(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Invert a square matrix.
///
/// Errors
/// ------
/// - `ShapeMismatch` if `a` is not square.
/// - `SingularMatrix { context }` if LU inversion fails or produces
///   non-finite entries.
pub(crate) fn inverse<S: Data<Elem = f64>>(
    a: &ArrayBase<S, Ix2>, context: &'static str,
) -> SvarResult<Array2<f64>> {
    if a.nrows() != a.ncols() {
        return Err(SvarError::ShapeMismatch {
            what: "square matrix for inversion",
            expected: a.nrows(),
            found: a.ncols(),
        });
    }
    let inv = to_dmatrix(a).try_inverse().ok_or(SvarError::SingularMatrix { context })?;
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(SvarError::SingularMatrix { context });
    }
    Ok(from_dmatrix(&inv))
}

/// Lower Cholesky factor `L` with `a = L Lᵀ`.
///
/// Errors
/// ------
/// - `ShapeMismatch` if `a` is not square.
/// - `NotPositiveDefinite { context }` if the factorization fails.
pub(crate) fn cholesky_lower<S: Data<Elem = f64>>(
    a: &ArrayBase<S, Ix2>, context: &'static str,
) -> SvarResult<Array2<f64>> {
    if a.nrows() != a.ncols() {
        return Err(SvarError::ShapeMismatch {
            what: "square matrix for Cholesky",
            expected: a.nrows(),
            found: a.ncols(),
        });
    }
    let chol = Cholesky::new(to_dmatrix(a)).ok_or(SvarError::NotPositiveDefinite { context })?;
    Ok(from_dmatrix(&chol.l()))
}

/// Column-major vectorization `vec(a)`; reference layout for the tests.
#[cfg(test)]
pub(crate) fn vec_col_major<S: Data<Elem = f64>>(
    a: &ArrayBase<S, Ix2>,
) -> ndarray::Array1<f64> {
    a.t().iter().copied().collect()
}
