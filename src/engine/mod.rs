//! Deterministic assessment logic.
//!
//! Everything in this module is pure and total: no I/O, no failure modes,
//! no shared mutable state. The HTTP layer calls into it directly and the
//! orchestrator falls back to it whenever the generative AI path fails.

pub mod fallback;
pub mod profiles;
pub mod range;
pub mod weather_impact;
