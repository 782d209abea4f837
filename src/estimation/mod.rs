//! estimation — reduced-form VAR estimation.
//!
//! Purpose
//! -------
//! Build the lag design of a VAR and estimate it by OLS, producing the
//! coefficient matrix and the residuals consumed by the instrument Wald
//! test and the IRF machinery.
//!
//! Key behaviors
//! -------------
//! - [`VarDesign`] stacks `[constant, Y_{t−1}, …, Y_{t−p}]` and aligns the
//!   left-hand side.
//! - [`OlsFit`] computes `(XᵀX)⁻¹XᵀY`, fitted values and residuals.
//! - [`split_lags`] / [`lag_order`] translate the `n × (n·p)` `betas`
//!   layout into per-lag matrices.
//!
//! Invariants & assumptions
//! ------------------------
//! - Lag order and model specification are chosen by the caller; no
//!   selection or data cleaning happens here.

pub mod ols;
pub mod var;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::ols::OlsFit;
pub use self::var::{VarDesign, lag_order, split_lags};
