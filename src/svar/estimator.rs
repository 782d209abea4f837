//! SVAR-IV estimator — reduced form, instrument test, IRFs and bands in one
//! pass.
//!
//! Purpose
//! -------
//! Chain the building blocks of the crate into the standard SVAR-IV
//! workflow:
//!
//! 1. lag design with a constant; the first `p` rows of the data and the
//!    instrument are consumed as pre-sample,
//! 2. OLS reduced form and `betas = B̂[1.., ..]ᵀ`,
//! 3. instrument Wald test → `Γ̂`, `WHat`,
//! 4. MA coefficients and gradient matrices for the configured horizon,
//! 5. plug-in IRF, Cholesky benchmark IRF, MSW and standard Delta-method
//!    bands, in level or cumulative form.
//!
//! Key behaviors
//! -------------
//! - Every intermediate is returned as a named field of [`SvarIvOutcome`].
//! - A first-stage Wald statistic below 10 is logged as a weak-instrument
//!   warning; the MSW sets stay valid in that regime, the standard bands do
//!   not.
//!
//! Invariants & assumptions
//! ------------------------
//! - `data` is `T × n`, `instrument` is `T × 1` and row-aligned with it.
//! - The reduced form is taken as correctly specified; lag order is chosen
//!   by the caller.
use crate::{
    confidence::{BandInputs, DeltaBands, MswBands, ci_delta_standard, ci_msw},
    errors::{SvarError, SvarResult, nvar_index},
    estimation::{OlsFit, VarDesign},
    inference::WaldOutcome,
    irf::{GMatrices, cumulative_ma, g_matrices, irf_cholesky, irf_gamma, ma_representation},
    svar::options::SvarIvOptions,
};
use ndarray::{Array2, s};

/// First-stage Wald statistic below which the instrument is flagged as weak.
pub const WEAK_INSTRUMENT_THRESHOLD: f64 = 10.0;

/// SvarIv — an SVAR identified with one external instrument.
///
/// Fields
/// ------
/// - `p`: lag order of the reduced-form VAR.
/// - `opts`: validated [`SvarIvOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvarIv {
    p: usize,
    opts: SvarIvOptions,
}

/// SvarIvOutcome — every product of an SVAR-IV run.
#[derive(Debug, Clone, PartialEq)]
pub struct SvarIvOutcome {
    /// Effective sample size `T − p`.
    pub t_eff: usize,
    /// Reduced-form OLS fit on `[1, Y_{t−1}, …, Y_{t−p}]`.
    pub reduced_form: OlsFit,
    /// `n × (n·p)` lag coefficients.
    pub betas: Array2<f64>,
    /// Residual covariance `η̂ᵀη̂ / (T − p)`.
    pub sigma: Array2<f64>,
    /// `Γ̂`, `WHat` and the first-stage Wald statistic.
    pub wald: WaldOutcome,
    /// Level MA coefficients `C_0..C_{H−1}`.
    pub ma: Vec<Array2<f64>>,
    /// Level and cumulative gradient matrices.
    pub gradients: GMatrices,
    /// `H × n` instrument-identified IRF scaled by `shock_coefficient`;
    /// `None` when `Γ̂_nvar == 0`.
    pub plugin_irf: Option<Array2<f64>>,
    /// `H × n` recursively identified IRF for comparison.
    pub cholesky_irf: Array2<f64>,
    /// Weak-instrument robust confidence sets (`n × H`).
    pub msw: MswBands,
    /// Standard Delta-method bands (`n × H`); `None` when `Γ̂_nvar == 0`.
    pub delta: Option<DeltaBands>,
}

impl SvarIvOutcome {
    /// Whether the first-stage statistic falls below
    /// [`WEAK_INSTRUMENT_THRESHOLD`] (or is undefined).
    pub fn weak_instrument(&self) -> bool {
        is_weak(self.wald.wald())
    }
}

fn is_weak(wald: f64) -> bool {
    wald.is_nan() || wald < WEAK_INSTRUMENT_THRESHOLD
}

/// Map a zero normalizing entry to `None`; other errors propagate.
fn unless_zero_normalization<T>(result: SvarResult<T>) -> SvarResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(SvarError::ZeroNormalization { nvar }) => {
            log::warn!("Γ̂ is zero at nvar = {nvar}; plug-in IRF and Delta bands are undefined");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

impl SvarIv {
    /// Configure an estimator with lag order `p`.
    ///
    /// Errors
    /// ------
    /// - `InvalidLagOrder(0)` if `p == 0`.
    /// - Any error of [`SvarIvOptions::validate`].
    pub fn new(p: usize, opts: SvarIvOptions) -> SvarResult<Self> {
        if p == 0 {
            return Err(SvarError::InvalidLagOrder(p));
        }
        opts.validate()?;
        Ok(SvarIv { p, opts })
    }

    /// One-shot convenience: configure and fit.
    pub fn estimate(
        data: &Array2<f64>, instrument: &Array2<f64>, p: usize, opts: &SvarIvOptions,
    ) -> SvarResult<SvarIvOutcome> {
        SvarIv::new(p, opts.clone())?.fit(data, instrument)
    }

    /// Lag order.
    pub fn lags(&self) -> usize {
        self.p
    }

    /// Run options.
    pub fn options(&self) -> &SvarIvOptions {
        &self.opts
    }

    /// Fit the model to `data` with external instrument `instrument`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&Array2<f64>`
    ///   `T × n` observations of the endogenous variables.
    /// - `instrument`: `&Array2<f64>`
    ///   `T × 1` external instrument, row-aligned with `data`.
    ///
    /// Returns
    /// -------
    /// `SvarResult<SvarIvOutcome>`
    ///
    /// Errors
    /// ------
    /// - `ShapeMismatch` if the instrument is misaligned or not one column.
    /// - `InvalidNvar` if `nvar > n`.
    /// - `InsufficientData` if `T` cannot identify the reduced form.
    /// - `SingularMatrix`, `NotPositiveDefinite` propagated from the
    ///   numerical layers.
    /// - `ZeroNormalization` only from the Cholesky benchmark (zero
    ///   residual variance of the first variable). A zero `Γ̂_nvar` is not
    ///   an error: the MSW sets are still returned, while `plugin_irf` and
    ///   `delta` are `None`.
    pub fn fit(&self, data: &Array2<f64>, instrument: &Array2<f64>) -> SvarResult<SvarIvOutcome> {
        let (p, opts) = (self.p, &self.opts);
        let n = data.ncols();
        if instrument.nrows() != data.nrows() {
            return Err(SvarError::ShapeMismatch {
                what: "instrument rows",
                expected: data.nrows(),
                found: instrument.nrows(),
            });
        }
        nvar_index(opts.nvar, n)?;

        let design = VarDesign::new(data, p, true)?;
        let reduced_form = OlsFit::fit(design.y(), design.x())?;
        let betas = design.lag_coefficients(reduced_form.betas())?;
        let eta = reduced_form.residuals();
        let t_eff = eta.nrows();
        let sigma = eta.t().dot(eta) / t_eff as f64;

        let z = instrument.slice(s![p.., ..]).to_owned();
        let wald = WaldOutcome::gamma_wald(design.x(), &z, eta, p, n, opts.nvar)?;
        if is_weak(wald.wald()) {
            log::warn!(
                "weak instrument: first-stage Wald statistic {:.3} < {WEAK_INSTRUMENT_THRESHOLD}; \
                 standard Delta-method bands are unreliable",
                wald.wald()
            );
        }

        let ma = ma_representation(&betas, p, opts.horizon)?;
        let gradients = g_matrices(&betas, p, opts.horizon)?;

        let irf_opts = opts.irf_options();
        let plugin_irf =
            unless_zero_normalization(irf_gamma(&betas, wald.gamma_hat(), &irf_opts))?;
        let cholesky_irf = irf_cholesky(&betas, &sigma, &irf_opts)?;

        let cumulative = opts.cumulative.then(|| cumulative_ma(&ma));
        let (c_used, g_used) = match &cumulative {
            Some(cum) => (cum.as_slice(), &gradients.gcum),
            None => (ma.as_slice(), &gradients.g),
        };
        let inputs = BandInputs {
            gamma_hat: wald.gamma_hat(),
            what: wald.what(),
            c: c_used,
            g: g_used,
            t: t_eff,
        };
        let band_opts = opts.band_options();
        let msw = ci_msw(&inputs, &band_opts)?;
        let delta = unless_zero_normalization(ci_delta_standard(&inputs, &band_opts))?;

        log::info!(
            "SVAR-IV fitted: T = {t_eff}, n = {n}, p = {p}, H = {}, wald = {:.3} (p = {:.4})",
            opts.horizon,
            wald.wald(),
            wald.p_value()
        );

        Ok(SvarIvOutcome {
            t_eff,
            reduced_form,
            betas,
            sigma,
            wald,
            ma,
            gradients,
            plugin_irf,
            cholesky_irf,
            msw,
            delta,
        })
    }
}
