//! Flat choices as returned by the third-party content API: a description,
//! how many to pick, and the options as display strings.

use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::{
    assemble::{Assembler, ChoiceRecord},
    choices::{Choice, ChoiceOption, OptionSet},
};

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct ExternalChoice {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub choose_count: i64,
    /// Most records don't carry a type; those are equipment choices.
    #[serde(default, rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_type: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Converts an API record into a canonical choice identified by `id`.
pub fn to_choice(assembler: &Assembler, record: Option<&ExternalChoice>, id: &str) -> Option<Choice> {
    let record = record?;
    Some(assembler.assemble(&ChoiceRecord {
        source_id: id,
        description: record.description.as_deref(),
        choose_count: record.choose_count,
        choice_type: record.choice_type.as_deref(),
        options: &record.options,
        category: None,
        exclude_ids: &[],
    }))
}

/// Counted items always carry their count, so a count of one still parses
/// back as a counted item.
fn option_text(option: &ChoiceOption) -> String {
    match option {
        ChoiceOption::CountedItem(counted) => format!("{} {}", counted.quantity, counted.name).into(),
        other => other.to_string().into(),
    }
}

/// Renders a canonical choice back into the API's flat shape.
///
/// A category reference has no options to list, so only its description
/// survives. An option list without a description gets none: text generated
/// from the options could name a category and read back as one.
pub fn from_choice(choice: Option<&Choice>) -> Option<ExternalChoice> {
    let choice = choice?;
    let (options, description) = match &choice.option_set {
        OptionSet::ExplicitOptions { options } => (
            options.iter().map(option_text).collect(),
            Some(choice.description.clone()).filter(|d| !d.is_empty()),
        ),
        OptionSet::CategoryReference { .. } => (Vec::new(), Some(String::from(choice.to_string()))),
    };
    Some(ExternalChoice {
        description,
        choose_count: i64::from(choice.choose_count),
        choice_type: Some(String::from(choice.choice_type.to_string())),
        options,
    })
}
