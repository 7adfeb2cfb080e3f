//! Domain core for the liftlog workout tracker.
//!
//! Everything in this crate is pure: no I/O, no database handles. The db
//! and api crates build on the types and mappings defined here.

pub mod day;
pub mod document;
pub mod error;
pub mod types;
pub mod workout;
