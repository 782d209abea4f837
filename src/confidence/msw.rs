//! confidence::msw — weak-instrument robust (MSW) confidence sets.
//!
//! Purpose
//! -------
//! For each (variable `j`, horizon `h`) cell, invert the Wald-type
//! inequality
//!
//! ```text
//! T (s·r_jh − λ Γ̂_nv)² ≤ κ · Var(s·r_jh − λ Γ̂_nv)
//! ```
//!
//! in the unknown normalized response `λ`. Expanding gives the quadratic
//! `a λ² + b λ + c ≤ 0` with
//!
//! ```text
//! a = T Γ̂_nv² − κ W2[nv, nv]
//! b = −2 T s r Γ̂_nv + 2κ s g W12[:, nv] + 2κ s c_row W2[:, nv]
//! c = T s² r² − κ s² g W1 gᵀ − 2κ s² g W12 c_rowᵀ − κ s² c_row W2 c_rowᵀ
//! Δ = b² − 4ac
//! ```
//!
//! where `r`, `g`, `c_row` are the per-cell terms of
//! [`BandContext::terms`] and `κ` the squared critical value.
//!
//! Key behaviors
//! -------------
//! - The set is classified by the signs of `a` and `Δ` ([`MswCase`]):
//!   a bounded interval, the complement of an interval, the empty set, or
//!   the whole real line. Empty and unbounded sets are valid outcomes and
//!   are reported through NaN / ±∞ bounds, never as errors.
//! - The normalization cell `(nvar, h = 0)` is fixed at `scale` on both
//!   bounds.
//!
//! Invariants & assumptions
//! ------------------------
//! - Exactly one case applies per cell. Any sign pattern outside the first
//!   three cases, including `a = 0`, `Δ = 0` and NaN inputs, is Unbounded.
use crate::{
    confidence::bands::{BandContext, BandInputs, BandOptions},
    errors::SvarResult,
};
use ndarray::Array2;

/// MswCase — shape of a single MSW confidence set.
///
/// - `Bounded` (1): `a > 0`, `Δ > 0`; the set is `[lower, upper]`.
/// - `Disjoint` (2): `a < 0`, `Δ > 0`; the set is
///   `(−∞, lower] ∪ [upper, ∞)`.
/// - `Empty` (3): `a > 0`, `Δ < 0`; both bounds are NaN.
/// - `Unbounded` (4): every other sign pattern; bounds are `−∞` / `+∞`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MswCase {
    Bounded,
    Disjoint,
    Empty,
    Unbounded,
}

impl MswCase {
    /// Classify from the leading coefficient and the discriminant.
    pub fn classify(a: f64, delta: f64) -> MswCase {
        if a > 0.0 && delta > 0.0 {
            MswCase::Bounded
        } else if a < 0.0 && delta > 0.0 {
            MswCase::Disjoint
        } else if a > 0.0 && delta < 0.0 {
            MswCase::Empty
        } else {
            MswCase::Unbounded
        }
    }

    /// Conventional numeric label `1..=4`.
    pub fn code(self) -> u8 {
        match self {
            MswCase::Bounded => 1,
            MswCase::Disjoint => 2,
            MswCase::Empty => 3,
            MswCase::Unbounded => 4,
        }
    }
}

/// MswCell — quadratic coefficients, bounds and case for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MswCell {
    pub lower: f64,
    pub upper: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub delta: f64,
    pub case: MswCase,
}

impl MswCell {
    /// Solve `a λ² + b λ + c` and classify the resulting set.
    ///
    /// For `Disjoint` the roots are swapped relative to `Bounded`, so
    /// `lower < upper` still holds when `a < 0`.
    pub fn from_quadratic(a: f64, b: f64, c: f64) -> MswCell {
        let delta = b * b - 4.0 * a * c;
        let case = MswCase::classify(a, delta);
        let (lower, upper) = match case {
            MswCase::Bounded => ((-b - delta.sqrt()) / (2.0 * a), (-b + delta.sqrt()) / (2.0 * a)),
            MswCase::Disjoint => ((-b + delta.sqrt()) / (2.0 * a), (-b - delta.sqrt()) / (2.0 * a)),
            MswCase::Empty => (f64::NAN, f64::NAN),
            MswCase::Unbounded => (f64::NEG_INFINITY, f64::INFINITY),
        };
        MswCell { lower, upper, a, b, c, delta, case }
    }
}

/// MswBands — `n × H` arrays of MSW bounds, coefficients and cases.
#[derive(Debug, Clone, PartialEq)]
pub struct MswBands {
    /// Lower bounds (NaN for empty sets, `−∞` for unbounded sets).
    pub lower: Array2<f64>,
    /// Upper bounds (NaN for empty sets, `+∞` for unbounded sets).
    pub upper: Array2<f64>,
    pub ahat: Array2<f64>,
    pub bhat: Array2<f64>,
    pub chat: Array2<f64>,
    pub deltahat: Array2<f64>,
    pub cases: Array2<MswCase>,
}

impl MswBands {
    /// Cases as numeric labels `1..=4`.
    pub fn case_codes(&self) -> Array2<u8> {
        self.cases.mapv(MswCase::code)
    }
}

impl BandContext<'_> {
    /// MSW set for cell `(j, h)`.
    ///
    /// Pure function of `Γ̂`, `WHat`, `C_h`, `G_h`, `T`, `κ`, `scale` and
    /// `nvar`; the `(nvar, 0)` override is applied by [`ci_msw`], not here.
    ///
    /// Panics
    /// ------
    /// - If `j >= n` or `h >= H` (see [`BandContext::terms`]).
    pub fn msw_cell(&self, j: usize, h: usize) -> MswCell {
        let terms = self.terms(j, h);
        let (t, kappa, scale, nv) = (self.t, self.kappa, self.scale, self.nv);
        let (w1, w12, w2) = (&self.blocks.w1, &self.blocks.w12, &self.blocks.w2);
        let gamma_nv = self.gamma_nv();
        let r = terms.response;
        let g = &terms.g;
        let c_row = &terms.c_row;

        let a = t * gamma_nv.powi(2) - kappa * w2[[nv, nv]];
        let b = -2.0 * t * scale * r * gamma_nv
            + 2.0 * kappa * scale * g.dot(&w12.column(nv))
            + 2.0 * kappa * scale * c_row.dot(&w2.column(nv));
        let c = (t.sqrt() * scale * r).powi(2)
            - kappa * scale.powi(2) * g.dot(&w1.dot(g))
            - 2.0 * kappa * scale.powi(2) * g.dot(&w12.dot(c_row))
            - kappa * scale.powi(2) * c_row.dot(&w2.dot(c_row));

        MswCell::from_quadratic(a, b, c)
    }
}

/// MSW confidence sets for every (variable, horizon) cell.
///
/// Parameters
/// ----------
/// - `inputs`: `&BandInputs`
///   `Γ̂`, `WHat`, `C` and the matching `G` (use cumulative `C` with
///   `Gcum` for cumulative responses), and `T`.
/// - `opts`: `&BandOptions`
///   Confidence level, `scale` and `nvar`.
///
/// Returns
/// -------
/// `SvarResult<MswBands>`
///   `n × H` arrays; cell `(nvar − 1, 0)` has both bounds equal to `scale`.
///
/// Errors
/// ------
/// - Propagates validation errors from [`BandContext::new`].
pub fn ci_msw(inputs: &BandInputs<'_>, opts: &BandOptions) -> SvarResult<MswBands> {
    let ctx = BandContext::new(inputs, opts)?;
    let cells = ctx.grid(|j, h| ctx.msw_cell(j, h));

    let mut lower = cells.map(|cell| cell.lower);
    let mut upper = cells.map(|cell| cell.upper);
    lower[[ctx.nv, 0]] = ctx.scale;
    upper[[ctx.nv, 0]] = ctx.scale;

    let cases = cells.map(|cell| cell.case);
    let unbounded = cases.iter().filter(|&&case| case == MswCase::Unbounded).count();
    if unbounded > 0 {
        log::debug!("MSW bands: {unbounded} of {} cells are unbounded", cases.len());
    }

    Ok(MswBands {
        lower,
        upper,
        ahat: cells.map(|cell| cell.a),
        bhat: cells.map(|cell| cell.b),
        chat: cells.map(|cell| cell.c),
        deltahat: cells.map(|cell| cell.delta),
        cases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        confidence::critval::norm_critval,
        irf::{g_matrices, ma_representation},
    };
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array3, Axis, array, linalg::kron, s};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - exhaustive, mutually exclusive case classification over sign grids,
    // - NaN bounds for empty sets and ±∞ bounds for unbounded sets,
    // - root ordering for bounded and disjoint sets,
    // - agreement of `msw_cell` with an explicit Kronecker evaluation, and
    // - the normalization-cell override in `ci_msw`.
    // -------------------------------------------------------------------------

    struct Fixture {
        gamma: Array1<f64>,
        what: Array2<f64>,
        c: Vec<Array2<f64>>,
        g: Array3<f64>,
    }

    fn fixture(gamma: Array1<f64>, what_scale: f64) -> Fixture {
        let betas = array![[0.5, 0.2], [0.1, 0.3]];
        let c = ma_representation(&betas, 1, 4).expect("valid");
        let g = g_matrices(&betas, 1, 4).expect("valid").g;
        let base = Array2::from_shape_fn((6, 6), |(i, j)| {
            if i == j { 1.0 } else { 0.1 / (1.0 + (i as f64 - j as f64).abs()) }
        });
        Fixture { gamma, what: base * what_scale, c, g }
    }

    #[test]
    // Purpose
    // -------
    // Every `(a, Δ)` sign combination maps to exactly one case, with the
    // documented bound representation.
    //
    // Given
    // -----
    // - A grid of `a`, `b`, `c` values including zeros and NaN.
    //
    // Expect
    // ------
    // - Cases agree with the sign table; Empty ⇒ NaN bounds;
    //   Unbounded ⇒ (−∞, +∞); finite ordered bounds otherwise.
    fn classification_is_exhaustive_and_exclusive() {
        let values = [-2.0, -0.5, 0.0, 0.5, 2.0, f64::NAN];
        for &a in &values {
            for &b in &values {
                for &c in &values {
                    let cell = MswCell::from_quadratic(a, b, c);
                    let d = cell.delta;
                    let matches = [
                        a > 0.0 && d > 0.0,
                        a < 0.0 && d > 0.0,
                        a > 0.0 && d < 0.0,
                        !(a > 0.0 && d > 0.0 || a < 0.0 && d > 0.0 || a > 0.0 && d < 0.0),
                    ];
                    assert_eq!(matches.iter().filter(|&&m| m).count(), 1);
                    let expected = [
                        MswCase::Bounded,
                        MswCase::Disjoint,
                        MswCase::Empty,
                        MswCase::Unbounded,
                    ][matches.iter().position(|&m| m).unwrap_or(3)];
                    assert_eq!(cell.case, expected, "a = {a}, b = {b}, c = {c}");

                    match cell.case {
                        MswCase::Empty => assert!(cell.lower.is_nan() && cell.upper.is_nan()),
                        MswCase::Unbounded => {
                            assert_eq!(cell.lower, f64::NEG_INFINITY);
                            assert_eq!(cell.upper, f64::INFINITY);
                        }
                        _ => assert!(cell.lower.is_finite() && cell.lower < cell.upper),
                    }
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Bounded and disjoint sets carry the roots of the quadratic.
    //
    // Given
    // -----
    // - `λ² − 3λ + 2` (roots 1, 2) and `−λ² + 3λ − 2`.
    //
    // Expect
    // ------
    // - `[1, 2]` in both cases; labels 1 and 2.
    fn roots_are_ordered() {
        let up = MswCell::from_quadratic(1.0, -3.0, 2.0);
        assert_eq!(up.case, MswCase::Bounded);
        assert_relative_eq!(up.lower, 1.0, epsilon = 1e-15);
        assert_relative_eq!(up.upper, 2.0, epsilon = 1e-15);

        let down = MswCell::from_quadratic(-1.0, 3.0, -2.0);
        assert_eq!(down.case, MswCase::Disjoint);
        assert_relative_eq!(down.lower, 1.0, epsilon = 1e-15);
        assert_relative_eq!(down.upper, 2.0, epsilon = 1e-15);
        assert_eq!((up.case.code(), down.case.code()), (1, 2));
    }

    #[test]
    // Purpose
    // -------
    // `msw_cell` reproduces the closed-form coefficients evaluated with
    // explicit Kronecker products and full matrix algebra.
    fn cell_coefficients_match_explicit_formula() {
        let fx = fixture(array![0.9, -0.3], 1.0);
        let t = 200usize;
        let opts = BandOptions { nvar: 2, scale: 1.5, ..BandOptions::default() };
        let inputs = BandInputs { gamma_hat: &fx.gamma, what: &fx.what, c: &fx.c, g: &fx.g, t };
        let ctx = BandContext::new(&inputs, &opts).expect("valid inputs");

        let kappa = norm_critval(0.95, true).expect("valid level");
        let (tf, scale, nv) = (t as f64, 1.5, 1);
        let w1 = fx.what.slice(s![..4, ..4]);
        let w12 = fx.what.slice(s![..4, 4..]);
        let w2 = fx.what.slice(s![4.., 4..]);
        let gamma_row = fx.gamma.clone().insert_axis(Axis(0));
        for j in 0..2 {
            let e_j = Array2::<f64>::eye(2).row(j).to_owned();
            let selector = kron(&gamma_row, &e_j.clone().insert_axis(Axis(0)));
            for h in 0..4 {
                let g = selector.dot(&fx.g.index_axis(Axis(2), h)).row(0).to_owned();
                let c_row = e_j.dot(&fx.c[h]);
                let r = c_row.dot(&fx.gamma);

                let a = tf * fx.gamma[nv].powi(2) - kappa * w2[[nv, nv]];
                let s2 = scale * scale;
                let b = -2.0 * tf * scale * r * fx.gamma[nv]
                    + 2.0 * kappa * scale * g.dot(&w12.column(nv))
                    + 2.0 * kappa * scale * c_row.dot(&w2.column(nv));
                let c = tf * s2 * r * r
                    - kappa * s2 * g.dot(&w1).dot(&g)
                    - 2.0 * kappa * s2 * g.dot(&w12).dot(&fx.c[h].t()).dot(&e_j)
                    - kappa * s2 * c_row.dot(&w2).dot(&c_row);

                let cell = ctx.msw_cell(j, h);
                assert_relative_eq!(cell.a, a, max_relative = 1e-12);
                assert_relative_eq!(cell.b, b, epsilon = 1e-9, max_relative = 1e-10);
                assert_relative_eq!(cell.c, c, epsilon = 1e-9, max_relative = 1e-10);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // End-to-end bands: normalization override, array shapes, and the
    // strong- vs weak-instrument regimes.
    //
    // Given
    // -----
    // - A strong `Γ̂_nv` with small `WHat` (large `a`), and a weak `Γ̂_nv`
    //   with large `WHat` (`a < 0`).
    //
    // Expect
    // ------
    // - Strong: every cell is Bounded apart from the overridden impact cell,
    //   whose discriminant vanishes analytically.
    // - Weak: no cell is Bounded or Empty, since `a < 0` everywhere.
    fn bands_follow_instrument_strength() {
        let strong = fixture(array![1.0, 0.5], 1e-3);
        let inputs = BandInputs {
            gamma_hat: &strong.gamma,
            what: &strong.what,
            c: &strong.c,
            g: &strong.g,
            t: 500,
        };
        let bands = ci_msw(&inputs, &BandOptions::default()).expect("valid inputs");
        assert_eq!(bands.lower.dim(), (2, 4));
        assert_eq!(bands.lower[[0, 0]], 1.0);
        assert_eq!(bands.upper[[0, 0]], 1.0);
        assert!(bands.ahat.iter().all(|&a| a > 0.0));
        let codes = bands.case_codes();
        for ((j, h), case) in bands.cases.indexed_iter() {
            if (j, h) != (0, 0) {
                assert_eq!(*case, MswCase::Bounded, "cell ({j}, {h})");
                assert_eq!(codes[[j, h]], 1);
                assert!(bands.lower[[j, h]] < bands.upper[[j, h]]);
            }
        }

        let weak = fixture(array![0.01, 0.5], 10.0);
        let inputs =
            BandInputs { gamma_hat: &weak.gamma, what: &weak.what, c: &weak.c, g: &weak.g, t: 50 };
        let bands = ci_msw(&inputs, &BandOptions::default()).expect("valid inputs");
        assert!(bands.ahat.iter().all(|&a| a < 0.0));
        assert!(
            bands
                .cases
                .iter()
                .all(|&case| matches!(case, MswCase::Disjoint | MswCase::Unbounded))
        );
        assert_eq!(bands.lower[[0, 0]], 1.0);
    }
}
