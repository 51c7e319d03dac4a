//! Parsing of single equipment options as they appear in rule text.
//!
//! An option is one entry of a starting-equipment choice, e.g. `"20 arrows"`,
//! `"(a) a mace or (b) a warhammer"` or `"an explorer's pack"`. Parsing never
//! fails: text that matches nothing more specific becomes a plain
//! [`ChoiceOption::Item`].

use smallvec::SmallVec;
use smartstring::alias::String;

use crate::{
    category,
    choice_type::ChoiceType,
    choices::{Choice, ChoiceOption, OptionSet},
    parsers,
};

pub const DEFAULT_NESTED_CHOICE_ID: &str = "nested_choice";

const DISJUNCTION: &str = " or ";

/// Lower-cases `text` and joins its words with hyphens.
///
/// Applying it to its own output returns the same string.
pub fn slug(text: &str) -> String {
    text.trim().to_lowercase().replace(' ', "-").into()
}

/// Parses option text into a [`ChoiceOption`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionParser {
    nested_choice_id: String,
}

impl Default for OptionParser {
    fn default() -> Self {
        Self::new(DEFAULT_NESTED_CHOICE_ID)
    }
}

impl OptionParser {
    /// `nested_choice_id` becomes the id of any nested choice produced for an
    /// "or" option, since the text itself carries no ids.
    pub fn new(nested_choice_id: impl Into<String>) -> Self {
        Self {
            nested_choice_id: nested_choice_id.into(),
        }
    }

    pub fn nested_choice_id(&self) -> &str {
        &self.nested_choice_id
    }

    pub fn parse(&self, text: &str) -> ChoiceOption {
        if let Ok((quantity, name)) = parsers::quantity_prefix(text) {
            trace!("Option {:?} is {} of {:?}", text, quantity, name);
            return ChoiceOption::counted(slug(name), name, quantity);
        }

        if text.contains(DISJUNCTION) {
            if let Some(option) = self.parse_disjunction(text) {
                return option;
            }
            debug!(
                "Option {:?} looks like a disjunction but has fewer than two clauses",
                text
            );
        }

        let trimmed = text.trim();
        let stripped = parsers::strip_choice_marker(trimmed);
        trace!("Option {:?} is a single item", text);
        ChoiceOption::item(slug(stripped), trimmed)
    }

    fn parse_disjunction(&self, text: &str) -> Option<ChoiceOption> {
        let clauses: SmallVec<[&str; 3]> = text
            .split(DISJUNCTION)
            .map(parsers::strip_choice_marker)
            .filter(|clause| !clause.is_empty())
            .collect();
        if clauses.len() < 2 {
            return None;
        }

        let items = clauses.iter().map(|clause| match category::classify(clause) {
            Some(category_id) => ChoiceOption::item(category_id.as_str(), *clause),
            None => ChoiceOption::item(slug(clause), *clause),
        });
        let choice = Choice::new(
            self.nested_choice_id.clone(),
            text,
            1,
            ChoiceType::Equipment,
            OptionSet::explicit(items),
        );
        trace!(
            "Option {:?} is a choice between {} clauses",
            text,
            clauses.len()
        );
        Some(ChoiceOption::nested(choice))
    }
}

/// Parses `text` with the default nested choice id.
pub fn parse_option(text: &str) -> ChoiceOption {
    OptionParser::default().parse(text)
}
