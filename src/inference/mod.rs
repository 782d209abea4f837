//! inference — long-run covariance and instrument-relevance testing.
//!
//! Purpose
//! -------
//! Quantify the sampling uncertainty of the reduced-form VAR coefficients
//! and the instrument-based impact estimate `Γ̂`. Everything downstream
//! (Delta-method and MSW bands) consumes the joint covariance `WHat`
//! produced here.
//!
//! Key behaviors
//! -------------
//! - Configure long-run covariance estimation via [`HACOptions`] and the
//!   lag-window family [`KernelType`].
//! - Estimate the long-run covariance of a stacked moment series with
//!   [`hac_covariance`] (Newey–West, fixed truncation) or
//!   [`calculate_hac_cov`] (general options).
//! - Estimate `Γ̂`, `WHat` and the first-stage Wald statistic with
//!   [`WaldOutcome::gamma_wald`]; partition `WHat` with [`WHatBlocks`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Moment series are `T × d` with rows indexed by time.
//! - A single external instrument is used; wider instrument matrices are
//!   rejected as shape errors.
//! - All routines return [`crate::errors::SvarError`] on failure rather
//!   than panicking.
//!
//! Conventions
//! -----------
//! - Vectorization is column-major throughout, so `vec(Â)` in `WHat`
//!   matches the column ordering of the gradient matrices in
//!   [`crate::irf::gradient`].
//! - Truncation lags are in observation units.
//!
//! Testing notes
//! -------------
//! - Unit tests cover kernel weights, the zero-lag reduction of the HAC
//!   estimator, the selector and flattening conventions of the Wald map,
//!   and agreement of `WHat` with a direct influence-function computation.
//! - `tests/svar_iv_pipeline.rs` checks the null distribution of the Wald
//!   statistic by simulation.

pub mod hac;
pub mod kernel;
pub mod wald;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::hac::{HACOptions, calculate_hac_cov, hac_covariance};
pub use self::kernel::KernelType;
pub use self::wald::{WHatBlocks, WaldOutcome};
