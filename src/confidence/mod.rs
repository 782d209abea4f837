//! confidence — Delta-method and MSW confidence bands for SVAR-IV IRFs.
//!
//! Purpose
//! -------
//! Propagate the joint sampling uncertainty of `(vec(Â), Γ̂)` (the `WHat`
//! matrix from [`crate::inference::wald`]) into confidence bands for the
//! normalized impulse responses `λ_jh = s · e_jᵀ C_h Γ / Γ_nvar`.
//!
//! Key behaviors
//! -------------
//! - [`norm_critval`]: two-sided normal critical values (optionally squared).
//! - [`ci_msw`]: weak-instrument robust sets from inverting a quadratic in
//!   `λ`; cells may be bounded, disjoint, empty or unbounded ([`MswCase`]).
//! - [`ci_delta_standard`]: symmetric first-order Delta-method intervals.
//! - [`BandContext`] exposes the per-cell computations
//!   ([`BandContext::msw_cell`], [`BandContext::delta_cell`]) as pure
//!   functions of `(j, h)` for inspection and testing.
//!
//! Conventions
//! -----------
//! - All band arrays are `n × H`, indexed `[variable, horizon]`.
//! - For cumulative responses pass the cumulative MA coefficients together
//!   with `Gcum`.
//! - Degenerate MSW sets are valid outputs (NaN / ±∞ bounds), not errors.

pub mod bands;
pub mod critval;
pub mod delta;
pub mod msw;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::bands::{BandContext, BandInputs, BandOptions, CellTerms};
pub use self::critval::norm_critval;
pub use self::delta::{DeltaBands, DeltaCell, ci_delta_standard};
pub use self::msw::{MswBands, MswCase, MswCell, ci_msw};
