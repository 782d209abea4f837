//! svar — end-to-end SVAR-IV estimation.
//!
//! Purpose
//! -------
//! Provide the user-facing workflow: from raw observations and an external
//! instrument to impulse responses with MSW and standard Delta-method
//! confidence bands.
//!
//! Key behaviors
//! -------------
//! - [`SvarIvOptions`]: validated run configuration.
//! - [`SvarIv`]: estimator configured with a lag order; [`SvarIv::fit`] and
//!   the one-shot [`SvarIv::estimate`] return an [`SvarIvOutcome`] holding
//!   every intermediate result as a named field.
//!
//! Downstream usage
//! ----------------
//! - Callers needing only part of the pipeline (e.g. bands for externally
//!   estimated `betas`) use the lower-level modules directly:
//!   [`crate::inference`], [`crate::irf`] and [`crate::confidence`].

pub mod estimator;
pub mod options;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::estimator::{SvarIv, SvarIvOutcome, WEAK_INSTRUMENT_THRESHOLD};
pub use self::options::SvarIvOptions;
