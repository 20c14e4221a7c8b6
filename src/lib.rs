//! Small self-care tracker for the terminal. Focus sessions, mood, water, Vyvanse pills, hemp
//! and other substances are logged into a single JSON file that is easy to read and back up.
//!

pub mod analysis;
pub mod cli;
pub mod notify;
pub mod projection;
pub mod storage;
pub mod utils;
