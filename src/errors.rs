//! errors — unified error type for SVAR-IV estimation and inference.
//!
//! Purpose
//! -------
//! Provide a single error enum, [`SvarError`], and the result alias
//! [`SvarResult`] used by every numerical routine in the crate: OLS, HAC,
//! the instrument Wald test, MA / gradient construction, IRFs and both
//! confidence-interval methods.
//!
//! Key behaviors
//! -------------
//! - Shape violations (e.g. `betas.ncols() != n * p`) fail fast with
//!   [`SvarError::ShapeMismatch`] instead of producing silently wrong output.
//! - Factorization failures from the linear-algebra backend are surfaced as
//!   [`SvarError::SingularMatrix`] / [`SvarError::NotPositiveDefinite`] and
//!   are never retried.
//! - Degenerate MSW confidence sets (empty / unbounded) are *not* errors;
//!   they are reported through `confidence::msw::MswCase`.
//!
//! Conventions
//! -----------
//! - Messages describe the violated constraint in domain terms and embed
//!   the offending values so logs are useful without extra context.
//! - `nvar` values in messages are 1-based, matching the public API.

/// Crate-wide result alias.
pub type SvarResult<T> = Result<T, SvarError>;

/// Error conditions for SVAR-IV estimation and inference.
///
/// Variants
/// --------
/// - `ShapeMismatch { what, expected, found }`
///   A matrix dimension is inconsistent with the data-model invariants.
/// - `InsufficientData { rows, needed }`
///   Too few observations for the requested computation.
/// - `SingularMatrix { context }`
///   An inverse was requested for a (numerically) singular matrix.
/// - `NotPositiveDefinite { context }`
///   A Cholesky factorization failed.
/// - `InvalidConfidence(level)`
///   Confidence level outside the open interval (0, 1).
/// - `InvalidHorizon(h)`
///   Horizon must be at least 1.
/// - `InvalidNvar { nvar, n }`
///   Normalization variable outside `1..=n`.
/// - `InvalidLagOrder(p)`
///   Lag order must be at least 1.
/// - `NonFiniteParameter { name, value }`
///   A scalar configuration value is NaN or ±∞.
/// - `ZeroNormalization { nvar }`
///   The impact entry used as the normalization denominator is zero.
#[derive(Debug, Clone, PartialEq)]
pub enum SvarError {
    // ---- Shapes and data ----
    ShapeMismatch { what: &'static str, expected: usize, found: usize },
    InsufficientData { rows: usize, needed: usize },

    // ---- Linear algebra ----
    SingularMatrix { context: &'static str },
    NotPositiveDefinite { context: &'static str },

    // ---- Configuration ----
    InvalidConfidence(f64),
    InvalidHorizon(usize),
    InvalidNvar { nvar: usize, n: usize },
    InvalidLagOrder(usize),
    NonFiniteParameter { name: &'static str, value: f64 },

    // ---- Identification ----
    ZeroNormalization { nvar: usize },
}

impl std::error::Error for SvarError {}

impl std::fmt::Display for SvarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shapes and data ----
            SvarError::ShapeMismatch { what, expected, found } => {
                write!(
                    f,
                    "SVAR Error: shape mismatch in {what} (expected {expected}, found {found})"
                )
            }
            SvarError::InsufficientData { rows, needed } => {
                write!(f, "SVAR Error: insufficient data ({rows} rows, need at least {needed})")
            }

            // ---- Linear algebra ----
            SvarError::SingularMatrix { context } => {
                write!(f, "SVAR Error: singular matrix in {context}")
            }
            SvarError::NotPositiveDefinite { context } => {
                write!(f, "SVAR Error: matrix is not positive definite in {context}")
            }

            // ---- Configuration ----
            SvarError::InvalidConfidence(level) => {
                write!(f, "SVAR Error: invalid confidence level {level}. Must lie in (0, 1).")
            }
            SvarError::InvalidHorizon(h) => {
                write!(f, "SVAR Error: invalid horizon {h}. Must be at least 1.")
            }
            SvarError::InvalidNvar { nvar, n } => {
                write!(f, "SVAR Error: invalid nvar {nvar}. Must satisfy 1 ≤ nvar ≤ {n}.")
            }
            SvarError::InvalidLagOrder(p) => {
                write!(f, "SVAR Error: invalid lag order {p}. Must be at least 1.")
            }
            SvarError::NonFiniteParameter { name, value } => {
                write!(f, "SVAR Error: parameter {name} = {value} must be finite")
            }

            // ---- Identification ----
            SvarError::ZeroNormalization { nvar } => {
                write!(f, "SVAR Error: impact of normalization variable {nvar} is zero")
            }
        }
    }
}

/// Check that `1 ≤ nvar ≤ n` and return the 0-based index.
pub(crate) fn nvar_index(nvar: usize, n: usize) -> SvarResult<usize> {
    if nvar == 0 || nvar > n {
        return Err(SvarError::InvalidNvar { nvar, n });
    }
    Ok(nvar - 1)
}
