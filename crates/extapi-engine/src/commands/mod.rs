//! Engine entry points.
//!
//! `install` loads documents into a registry; `engine_query` answers
//! read-only queries against whatever snapshot is current.

pub mod engine_query;
pub mod install;
pub mod results;
