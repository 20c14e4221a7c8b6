//! Projections from the pill tracking state: when a refill is due, where in its effect window
//! the last dose is, and the transitions that keep both up to date.

pub mod dose;
pub mod pills;
pub mod refill;
