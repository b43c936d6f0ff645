//! Core types shared across extapi facilities
//!
//! This crate provides foundational types used by the model, the error
//! facility and the logging facility:
//!
//! - **Entity kinds**: the namespaces entities are indexed under
//! - **Schema constants**: Canonical field keys and event names

pub mod kind;
pub mod schema;

pub use kind::EntityKind;
