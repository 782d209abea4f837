//! irf::ma — moving-average (Wold) representation of a reduced-form VAR.
//!
//! Purpose
//! -------
//! Expand the lag coefficients `A_1, …, A_p` of
//! `Y_t = c + A_1 Y_{t−1} + … + A_p Y_{t−p} + η_t` into the MA coefficients
//! `C_0, C_1, …` of `Y_t = μ + Σ_k C_k η_{t−k}`.
//!
//! Key behaviors
//! -------------
//! - [`ma_representation`] runs the recursion
//!   `C_0 = I`, `C_k = Σ_{m=1}^{min(k,p)} A_m C_{k−m}` for `k = 1..H−1`.
//! - [`cumulative_ma`] returns the running sums `Σ_{i≤h} C_i`, the
//!   coefficients of accumulated responses.
//!
//! Invariants & assumptions
//! ------------------------
//! - `betas` is `n × (n·p)` with lag blocks side by side (see
//!   [`crate::estimation::var`]).
//! - `C_k` depends only on `C_0..C_{k−1}`; no coefficient beyond lag `p`
//!   contributes.
use crate::{
    errors::{SvarError, SvarResult},
    estimation::var::split_lags,
};
use ndarray::Array2;

/// MA coefficients `C_0, …, C_{H−1}` of a VAR(p).
///
/// Parameters
/// ----------
/// - `betas`: `&Array2<f64>`
///   `n × (n·p)` lag-coefficient matrix.
/// - `p`: `usize`
///   Lag order.
/// - `horizon`: `usize`
///   Number of coefficients `H` to return (`H ≥ 1`).
///
/// Returns
/// -------
/// `SvarResult<Vec<Array2<f64>>>`
///   `H` matrices of size `n × n`, `C_0 = I_n`.
///
/// Errors
/// ------
/// - `InvalidLagOrder(0)` if `p == 0`.
/// - `ShapeMismatch` if `betas.ncols() != n · p`.
/// - `InvalidHorizon(0)` if `horizon == 0`.
pub fn ma_representation(
    betas: &Array2<f64>, p: usize, horizon: usize,
) -> SvarResult<Vec<Array2<f64>>> {
    let lags = split_lags(betas, p)?;
    if horizon == 0 {
        return Err(SvarError::InvalidHorizon(horizon));
    }
    let n = betas.nrows();

    let mut c: Vec<Array2<f64>> = Vec::with_capacity(horizon);
    c.push(Array2::eye(n));
    for k in 1..horizon {
        let mut ck = Array2::<f64>::zeros((n, n));
        for (m, a_m) in lags.iter().enumerate().take(k.min(p)) {
            ck += &a_m.dot(&c[k - 1 - m]);
        }
        c.push(ck);
    }
    Ok(c)
}

/// Running sums `Σ_{i=0}^{h} C_i` of an MA coefficient sequence.
pub fn cumulative_ma(c: &[Array2<f64>]) -> Vec<Array2<f64>> {
    c.iter()
        .scan(None::<Array2<f64>>, |acc, ch| {
            let next = match acc.take() {
                Some(sum) => sum + ch,
                None => ch.clone(),
            };
            *acc = Some(next.clone());
            Some(next)
        })
        .collect()
}
