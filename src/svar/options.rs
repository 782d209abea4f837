//! SVAR-IV options — configuration for the end-to-end estimator.
//!
//! Purpose
//! -------
//! Collect every knob of an SVAR-IV run (confidence level, horizon,
//! normalization, cumulation, normalization variable and scale) in one
//! validated struct, so no routine depends on global settings.
//!
//! Key behaviors
//! -------------
//! - [`SvarIvOptions`] carries the run-level configuration with the usual
//!   defaults (95%, 21 horizons, shock coefficient 0.1, cumulative, first
//!   variable, unit scale).
//! - [`SvarIvOptions::irf_options`] and [`SvarIvOptions::band_options`]
//!   project it onto the IRF and confidence-band layers.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < confidence < 1`, `horizon ≥ 1`, `nvar ≥ 1`, finite
//!   `shock_coefficient` and `scale`. The upper bound `nvar ≤ n` depends on
//!   the data and is checked when the model is fitted.
//!
//! Testing notes
//! -------------
//! - Unit tests check the defaults, the projections, and each validation
//!   error.
use crate::{
    confidence::BandOptions,
    errors::{SvarError, SvarResult},
    irf::IrfOptions,
};

/// SvarIvOptions — run-level configuration of an SVAR-IV estimation.
///
/// Fields
/// ------
/// - `confidence`: `f64`
///   Two-sided confidence level for both band methods (default 0.95).
/// - `horizon`: `usize`
///   Number of IRF horizons `H`; every horizon-indexed output has exactly
///   `H` entries (default 21).
/// - `normalize`: `bool`
///   Normalize the Cholesky benchmark IRF so its first impact equals
///   `shock_coefficient` (default `true`).
/// - `shock_coefficient`: `f64`
///   Impact size of the plug-in and Cholesky IRFs (default 0.1).
/// - `cumulative`: `bool`
///   Report running sums over horizons for IRFs and bands (default `true`).
/// - `nvar`: `usize`
///   1-based normalization variable (default 1).
/// - `scale`: `f64`
///   Value of the normalized impact in the confidence bands (default 1.0).
///
/// Examples
/// --------
/// ```rust
/// use svar_iv::svar::SvarIvOptions;
///
/// let opts = SvarIvOptions { horizon: 12, cumulative: false, ..SvarIvOptions::default() };
/// assert!(opts.validate().is_ok());
/// assert_eq!(opts.irf_options().horizon, 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SvarIvOptions {
    pub confidence: f64,
    pub horizon: usize,
    pub normalize: bool,
    pub shock_coefficient: f64,
    pub cumulative: bool,
    pub nvar: usize,
    pub scale: f64,
}

impl SvarIvOptions {
    /// Construct and validate options.
    ///
    /// Errors
    /// ------
    /// - See [`SvarIvOptions::validate`].
    pub fn new(
        confidence: f64, horizon: usize, normalize: bool, shock_coefficient: f64, cumulative: bool,
        nvar: usize, scale: f64,
    ) -> SvarResult<Self> {
        let opts = SvarIvOptions {
            confidence,
            horizon,
            normalize,
            shock_coefficient,
            cumulative,
            nvar,
            scale,
        };
        opts.validate()?;
        Ok(opts)
    }

    /// Check the data-independent invariants.
    ///
    /// Errors
    /// ------
    /// - `InvalidConfidence` unless `0 < confidence < 1`.
    /// - `InvalidHorizon(0)` if `horizon == 0`.
    /// - `InvalidNvar` if `nvar == 0`.
    /// - `NonFiniteParameter` for a NaN / infinite `shock_coefficient` or
    ///   `scale`.
    pub fn validate(&self) -> SvarResult<()> {
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(SvarError::InvalidConfidence(self.confidence));
        }
        if !self.scale.is_finite() {
            return Err(SvarError::NonFiniteParameter { name: "scale", value: self.scale });
        }
        self.irf_options().validate()
    }

    /// IRF configuration implied by these options.
    pub fn irf_options(&self) -> IrfOptions {
        IrfOptions {
            horizon: self.horizon,
            normalize: self.normalize,
            shock_coefficient: self.shock_coefficient,
            cumulative: self.cumulative,
            nvar: self.nvar,
        }
    }

    /// Confidence-band configuration implied by these options.
    pub fn band_options(&self) -> BandOptions {
        BandOptions { confidence: self.confidence, scale: self.scale, nvar: self.nvar }
    }
}

impl Default for SvarIvOptions {
    fn default() -> Self {
        SvarIvOptions {
            confidence: 0.95,
            horizon: 21,
            normalize: true,
            shock_coefficient: 0.1,
            cumulative: true,
            nvar: 1,
            scale: 1.0,
        }
    }
}
