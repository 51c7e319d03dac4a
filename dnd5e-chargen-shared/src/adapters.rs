//! Conversions between the canonical model and the record formats of the
//! systems around it. Every entry point takes and returns `Option`s: an absent
//! record converts to an absent choice, never to an error.

pub mod external_api;
pub mod rules_engine;
pub mod wire;
