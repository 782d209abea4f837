//! irf — MA representation, its gradients, and impulse responses.
//!
//! Purpose
//! -------
//! Turn reduced-form lag coefficients into impulse responses and the
//! derivatives needed to propagate their sampling uncertainty.
//!
//! Key behaviors
//! -------------
//! - [`ma_representation`] / [`cumulative_ma`]: MA coefficients `C_h`.
//! - [`g_matrices`]: per-horizon Jacobians `∂vec(C_h)/∂vec(A)ᵀ` in level
//!   and cumulative form ([`GMatrices`]).
//! - [`irf_cholesky`] / [`irf_gamma`]: response paths to a recursively or
//!   instrument-identified shock, configured by [`IrfOptions`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `betas` is `n × (n·p)`; malformed shapes fail with `ShapeMismatch`.
//! - Every horizon-indexed output has exactly `H` entries, `H ≥ 1`.

pub mod gradient;
pub mod ma;
pub mod shocks;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::gradient::{GMatrices, g_matrices};
pub use self::ma::{cumulative_ma, ma_representation};
pub use self::shocks::{IrfOptions, irf_cholesky, irf_gamma};
