//! Serialization of traces for consumers outside the process.

pub mod json;
