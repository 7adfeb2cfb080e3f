//! Row models and write DTOs.
//!
//! Each submodule contains `FromRow` structs matching database rows plus
//! the input DTOs consumed by the repositories. The nested aggregate shape
//! returned to callers lives in `liftlog_core::workout`.

pub mod exercise;
pub mod workout;
