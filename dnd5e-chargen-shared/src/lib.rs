//! Normalization of D&D 5e character-creation choices.
//!
//! Choices arrive as flat text from the content API, as records from the rules
//! engine, and as selection messages from clients. This crate turns all of
//! them into one canonical [`Choice`] tree and back.

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

#[macro_use]
mod macros;

pub mod ability;
pub mod adapters;
pub mod assemble;
pub mod category;
pub mod choice_type;
pub mod choices;
pub mod options;
pub mod parsers;

pub use ability::Ability;
pub use assemble::{Assembler, AssemblerConfig, ChoiceRecord};
pub use category::{classify, CategoryId};
pub use choice_type::{normalize, ChoiceType, NormalizedChoiceType};
pub use choices::*;
pub use options::{parse_option, slug, OptionParser};
