//! Candidate ranking and selection cycling.
//!
//! [`rank`] moves the persisted preferred address (if still discovered) to
//! the front of the candidate list; [`Cycler`] then gives the operator
//! wrap-around next/previous navigation over the ranked list and a way to
//! persist the current selection as preferred.

mod cycler;
mod rank;

pub use cycler::Cycler;
pub use rank::rank;
