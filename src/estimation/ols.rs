//! estimation::ols — multivariate ordinary least squares.
//!
//! Purpose
//! -------
//! Fit `Y = X B + U` equation by equation with a shared design, returning
//! the coefficient matrix `B̂ = (XᵀX)⁻¹XᵀY`, fitted values and residuals.
//! This is the reduced-form estimator of the VAR and the source of the
//! residual matrix consumed by the Wald test.
//!
//! Invariants & assumptions
//! ------------------------
//! - `X` is `T × m` with full column rank; rank deficiency surfaces as
//!   `SvarError::SingularMatrix` from the inversion of `XᵀX`.
//! - `Y` is `T × n` with the same row alignment as `X`.
//! - The fitted result is immutable; residuals are never modified after
//!   construction.
use crate::{
    errors::{SvarError, SvarResult},
    linalg::inverse,
};
use ndarray::Array2;

/// OlsFit — coefficients, fitted values and residuals of an OLS fit.
///
/// Fields
/// ------
/// - `betas`: `m × n` coefficient matrix (one column per equation).
/// - `fitted`: `T × n` fitted values `X B̂`.
/// - `residuals`: `T × n` residuals `Y − X B̂`.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    betas: Array2<f64>,
    fitted: Array2<f64>,
    residuals: Array2<f64>,
}

impl OlsFit {
    /// Fit `Y` on `X` by least squares.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `&Array2<f64>`
    ///   `T × n` endogenous matrix.
    /// - `x`: `&Array2<f64>`
    ///   `T × m` regressor matrix, full column rank, `T ≥ m`.
    ///
    /// Returns
    /// -------
    /// `SvarResult<OlsFit>`
    ///
    /// Errors
    /// ------
    /// - `ShapeMismatch` if `y` and `x` have different row counts.
    /// - `InsufficientData` if `T < m` or `m == 0`.
    /// - `SingularMatrix` if `XᵀX` cannot be inverted.
    pub fn fit(y: &Array2<f64>, x: &Array2<f64>) -> SvarResult<Self> {
        if y.nrows() != x.nrows() {
            return Err(SvarError::ShapeMismatch {
                what: "OLS rows (Y vs X)",
                expected: x.nrows(),
                found: y.nrows(),
            });
        }
        let needed = x.ncols().max(1);
        if x.ncols() == 0 || x.nrows() < needed {
            return Err(SvarError::InsufficientData { rows: x.nrows(), needed });
        }

        let xtx_inv = inverse(&x.t().dot(x), "OLS normal equations (XᵀX)")?;
        let betas = xtx_inv.dot(&x.t().dot(y));
        let fitted = x.dot(&betas);
        let residuals = y - &fitted;

        Ok(OlsFit { betas, fitted, residuals })
    }

    /// `m × n` coefficient matrix `B̂`.
    pub fn betas(&self) -> &Array2<f64> {
        &self.betas
    }

    /// `T × n` fitted values.
    pub fn fitted(&self) -> &Array2<f64> {
        &self.fitted
    }

    /// `T × n` residuals.
    pub fn residuals(&self) -> &Array2<f64> {
        &self.residuals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover exact recovery on noiseless data, orthogonality of
    // residuals to regressors, and the error paths for bad shapes and
    // singular designs.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Recover known coefficients when `Y = X B` holds exactly.
    //
    // Given
    // -----
    // - A 5×2 design with an intercept column and a 2-equation response.
    //
    // Expect
    // ------
    // - `betas` equals `B`, residuals are zero.
    fn fit_recovers_exact_coefficients() {
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0], [1.0, 4.0]];
        let b = array![[1.0, -2.0], [0.5, 3.0]];
        let y = x.dot(&b);

        let fit = OlsFit::fit(&y, &x).expect("full-rank design");

        for (est, truth) in fit.betas().iter().zip(b.iter()) {
            assert_relative_eq!(*est, *truth, epsilon = 1e-10);
        }
        assert!(fit.residuals().iter().all(|r| r.abs() < 1e-10));
    }

    #[test]
    // Purpose
    // -------
    // Residuals are orthogonal to every regressor: `Xᵀ U ≈ 0`.
    //
    // Given
    // -----
    // - A noisy response that is not an exact linear function of `X`.
    //
    // Expect
    // ------
    // - All entries of `Xᵀ U` vanish up to floating-point tolerance.
    fn residuals_are_orthogonal_to_regressors() {
        let x = array![
            [1.0, 0.3, -1.0],
            [1.0, 1.2, 0.4],
            [1.0, -0.7, 2.2],
            [1.0, 2.5, 0.1],
            [1.0, 0.0, -0.6],
            [1.0, 1.1, 1.9]
        ];
        let y = array![[0.2, 1.0], [1.4, -0.3], [-0.5, 2.0], [3.1, 0.7], [0.0, -1.1], [1.7, 0.9]];

        let fit = OlsFit::fit(&y, &x).expect("full-rank design");
        let xtu = x.t().dot(fit.residuals());

        assert!(xtu.iter().all(|v| v.abs() < 1e-10), "XᵀU = {xtu:?}");
        let recomposed = fit.fitted() + fit.residuals();
        for (a, b) in recomposed.iter().zip(y.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Surface bad inputs as errors instead of panicking.
    //
    // Expect
    // ------
    // - Row mismatch → `ShapeMismatch`; collinear columns → `SingularMatrix`.
    fn fit_rejects_bad_inputs() {
        let x = array![[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]];
        let y = array![[1.0], [2.0], [3.0]];
        assert!(matches!(OlsFit::fit(&y, &x), Err(SvarError::SingularMatrix { .. })));

        let short_y = array![[1.0], [2.0]];
        assert!(matches!(OlsFit::fit(&short_y, &x), Err(SvarError::ShapeMismatch { .. })));
    }
}
