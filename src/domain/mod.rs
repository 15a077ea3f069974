//! Domain rules for the design submission lifecycle.
//!
//! Everything in here is pure: no database handles, no I/O. Services call into
//! these functions so the rules can be unit tested in isolation.

pub mod access;
pub mod review;
pub mod sku;

pub use access::Principal;
pub use review::{ReviewDecision, ReviewOutcome};
pub use sku::{SKU_PREFIX, generate_sku};
