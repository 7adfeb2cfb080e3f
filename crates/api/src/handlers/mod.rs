//! HTTP request handlers, grouped by resource.

pub mod exercises;
pub mod workouts;
