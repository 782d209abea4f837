//! estimation::var — lag design and coefficient layout for reduced-form VARs.
//!
//! Purpose
//! -------
//! Turn a `T × n` observation matrix into the regression problem
//! `Y_t = c + A_1 Y_{t−1} + … + A_p Y_{t−p} + η_t` and translate between
//! the OLS coefficient layout and the `n × (n·p)` lag-coefficient matrix
//! (`betas`, called `A` in the literature) consumed by the IRF code.
//!
//! Conventions
//! -----------
//! - Regressor columns are ordered `[deterministic (m columns), Y_{t−1},
//!   …, Y_{t−p}]`; within each lag block the variables keep their original
//!   order. The Wald test relies on the lag block being the trailing
//!   `n·p` columns.
//! - `betas[:, (l−1)·n .. l·n]` is the lag-`l` coefficient matrix `A_l`.
use crate::errors::{SvarError, SvarResult};
use ndarray::{Array2, ArrayView2, s};

/// VarDesign — stacked lag regressors and aligned left-hand side.
///
/// Fields
/// ------
/// - `x`: `(T−p) × (m + n·p)` regressors, `m = 1` with a constant, else 0.
/// - `y`: `(T−p) × n` left-hand side (observations `p..T`).
/// - `p`: lag order.
/// - `constant`: whether a leading column of ones was included.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDesign {
    x: Array2<f64>,
    y: Array2<f64>,
    p: usize,
    constant: bool,
}

impl VarDesign {
    /// Build the lag design from a `T × n` observation matrix.
    ///
    /// Errors
    /// ------
    /// - `InvalidLagOrder(0)` if `p == 0`.
    /// - `InsufficientData` if fewer than `p + (m + n·p)` rows are available,
    ///   so that the effective sample could not identify the regression.
    pub fn new(data: &Array2<f64>, p: usize, constant: bool) -> SvarResult<Self> {
        if p == 0 {
            return Err(SvarError::InvalidLagOrder(p));
        }
        let (t_total, n) = data.dim();
        let m = usize::from(constant);
        let k = m + n * p;
        if t_total < p + k {
            return Err(SvarError::InsufficientData { rows: t_total, needed: p + k });
        }

        let t_eff = t_total - p;
        let mut x = Array2::<f64>::zeros((t_eff, k));
        if constant {
            x.column_mut(0).fill(1.0);
        }
        for lag in 1..=p {
            let block = data.slice(s![p - lag..t_total - lag, ..]);
            x.slice_mut(s![.., m + (lag - 1) * n..m + lag * n]).assign(&block);
        }
        let y = data.slice(s![p.., ..]).to_owned();

        Ok(VarDesign { x, y, p, constant })
    }

    /// Regressor matrix `X`.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Left-hand side `Y` (observations `p..T`).
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// Lag order `p`.
    pub fn lags(&self) -> usize {
        self.p
    }

    /// Number of deterministic columns preceding the lag block.
    pub fn n_deterministic(&self) -> usize {
        usize::from(self.constant)
    }

    /// Extract `betas` (`n × n·p`) from an OLS coefficient matrix
    /// (`(m + n·p) × n`) fitted on this design.
    pub fn lag_coefficients(&self, ols_betas: &Array2<f64>) -> SvarResult<Array2<f64>> {
        let m = self.n_deterministic();
        if ols_betas.nrows() != self.x.ncols() {
            return Err(SvarError::ShapeMismatch {
                what: "OLS coefficient rows",
                expected: self.x.ncols(),
                found: ols_betas.nrows(),
            });
        }
        Ok(ols_betas.slice(s![m.., ..]).t().to_owned())
    }
}

/// Check `betas` is `n × (n·p)` and return `n`.
pub(crate) fn check_betas(betas: &Array2<f64>, p: usize) -> SvarResult<usize> {
    if p == 0 {
        return Err(SvarError::InvalidLagOrder(p));
    }
    let n = betas.nrows();
    if betas.ncols() != n * p {
        return Err(SvarError::ShapeMismatch {
            what: "betas columns (n·p)",
            expected: n * p,
            found: betas.ncols(),
        });
    }
    Ok(n)
}

/// Infer the lag order from an `n × (n·p)` coefficient matrix.
pub fn lag_order(betas: &Array2<f64>) -> SvarResult<usize> {
    let n = betas.nrows();
    if n == 0 || betas.ncols() == 0 || betas.ncols() % n != 0 {
        return Err(SvarError::ShapeMismatch {
            what: "betas columns (multiple of n)",
            expected: n,
            found: betas.ncols(),
        });
    }
    Ok(betas.ncols() / n)
}

/// Views of the lag matrices `A_1, …, A_p`.
pub fn split_lags(betas: &Array2<f64>, p: usize) -> SvarResult<Vec<ArrayView2<'_, f64>>> {
    let n = check_betas(betas, p)?;
    Ok((0..p).map(|l| betas.slice(s![.., l * n..(l + 1) * n])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Check row alignment of the lag design: row `r` of `X` holds the
    // constant followed by `Y_{p+r−1}, …, Y_{r}`.
    //
    // Given
    // -----
    // - A 7×2 series `[t+1, 10(t+1)]` and `p = 2` with a constant, the
    //   smallest sample that identifies the five regressors.
    //
    // Expect
    // ------
    // - `X` is 5×5, `Y` is rows 2..7 of the data.
    fn new_stacks_lags_after_constant() {
        let data = Array2::from_shape_fn((7, 2), |(t, j)| (t + 1) as f64 * [1.0, 10.0][j]);
        let design = VarDesign::new(&data, 2, true).expect("enough rows");

        assert_eq!(design.x().dim(), (5, 5));
        assert_eq!(design.x().row(0).to_vec(), vec![1.0, 2.0, 20.0, 1.0, 10.0]);
        assert_eq!(design.x().row(4).to_vec(), vec![1.0, 6.0, 60.0, 5.0, 50.0]);
        assert_eq!(design.y().dim(), (5, 2));
        assert_eq!(design.y().row(0).to_vec(), vec![3.0, 30.0]);
        assert_eq!(design.lags(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Pin the sample-size boundary `T ≥ p + m + n·p`.
    //
    // Given
    // -----
    // - `n = 2`, `p = 2`, constant: seven rows are required.
    //
    // Expect
    // ------
    // - Six rows are rejected with the exact counts; seven are accepted.
    fn sample_size_boundary_is_exact() {
        let short = Array2::from_shape_fn((6, 2), |(t, j)| (t + j) as f64);
        assert_eq!(
            VarDesign::new(&short, 2, true),
            Err(SvarError::InsufficientData { rows: 6, needed: 7 })
        );
        let enough = Array2::from_shape_fn((7, 2), |(t, j)| (t + j) as f64);
        assert!(VarDesign::new(&enough, 2, true).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Shape guards: lag order zero, short samples and malformed `betas`.
    fn guards_reject_invalid_shapes() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(VarDesign::new(&data, 0, true), Err(SvarError::InvalidLagOrder(0)));
        assert!(matches!(
            VarDesign::new(&data, 1, true),
            Err(SvarError::InsufficientData { .. })
        ));

        let betas = Array2::<f64>::zeros((2, 3));
        assert!(matches!(split_lags(&betas, 1), Err(SvarError::ShapeMismatch { .. })));
        assert!(lag_order(&betas).is_err());
    }

    #[test]
    // Purpose
    // -------
    // `split_lags` and `lag_coefficients` agree on the block layout.
    fn lag_blocks_round_trip_through_ols_layout() {
        let data = Array2::from_shape_fn((8, 2), |(t, j)| (t * 3 + j) as f64);
        let design = VarDesign::new(&data, 2, true).expect("enough rows");
        let ols_betas = Array2::from_shape_fn((5, 2), |(i, j)| (10 * i + j) as f64);

        let betas = design.lag_coefficients(&ols_betas).expect("matching rows");
        assert_eq!(betas.dim(), (2, 4));
        assert_eq!(lag_order(&betas), Ok(2));

        let lags = split_lags(&betas, 2).expect("valid betas");
        // A_2[0, 1] is the coefficient of Y_{t−2, 1} in equation 0.
        assert_eq!(lags[1][[0, 1]], ols_betas[[4, 0]]);
        assert_eq!(lags[0][[1, 0]], ols_betas[[1, 1]]);
    }
}
