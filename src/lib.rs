//! svar_iv — SVAR-IV estimation with weak-instrument robust inference.
//!
//! Purpose
//! -------
//! Estimate a structural VAR identified with one external instrument and
//! compute confidence bands for its impulse responses with two asymptotic
//! methods: the MSW quadratic-inversion sets, which remain valid under weak
//! instruments, and the standard Delta method.
//!
//! Key behaviors
//! -------------
//! - [`estimation`]: lag design and OLS for the reduced-form VAR.
//! - [`inference`]: HAC long-run covariance, the joint covariance `WHat` of
//!   `(vec(Â), Γ̂)` and the first-stage Wald statistic.
//! - [`irf`]: MA representation, gradient matrices `G` / `Gcum`, and
//!   Cholesky / instrument-identified impulse responses.
//! - [`confidence`]: critical values, MSW sets and standard Delta-method
//!   bands.
//! - [`svar`]: the end-to-end estimator chaining all of the above.
//!
//! Invariants & assumptions
//! ------------------------
//! - All matrices are dense `ndarray` arrays of `f64`; vectorization is
//!   column-major everywhere.
//! - Every routine is a pure function of borrowed inputs returning freshly
//!   allocated results; failures are reported as [`errors::SvarError`].
//! - The reduced-form VAR is assumed correctly specified; lag selection and
//!   data cleaning happen upstream.
//!
//! Conventions
//! -----------
//! - `n` endogenous variables, `p` lags, `T` observations, `H` horizons.
//! - `betas` is the `n × (n·p)` matrix `[A_1 … A_p]`.
//! - `nvar` is 1-based in every public signature.
//! - Logging goes through the `log` facade; the library installs no logger.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/svar_iv_pipeline.rs`
//!   exercises the full workflow on simulated data.

pub mod confidence;
pub mod errors;
pub mod estimation;
pub mod inference;
pub mod irf;
pub mod svar;

mod linalg;

pub use crate::errors::{SvarError, SvarResult};
pub use crate::svar::{SvarIv, SvarIvOptions, SvarIvOutcome};
