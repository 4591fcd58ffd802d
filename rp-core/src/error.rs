//! Error types, re-exported from `rp-error` so callers only need `rp_core`.

pub use rp_error::{RampageError, Result};
