//! Choice records produced by the rules engine. These name an open category
//! in `from`, or list the options, or both.

use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::{
    assemble::{Assembler, ChoiceRecord},
    choices::{Choice, ChoiceOption, OptionSet},
};

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct RulesEngineChoice {
    pub id: String,
    #[serde(default, rename = "type")]
    pub choice_type: String,
    #[serde(default)]
    pub choose: i64,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

pub fn to_choice(assembler: &Assembler, record: Option<&RulesEngineChoice>) -> Option<Choice> {
    let record = record?;
    let options: &[String] = record.options.as_deref().unwrap_or_default();
    // The category text doubles as the description when it is all there is.
    let description = match &record.from {
        Some(from) if options.is_empty() => Some(from.as_str()),
        _ => None,
    };
    Some(assembler.assemble(&ChoiceRecord {
        source_id: &record.id,
        description,
        choose_count: record.choose,
        choice_type: Some(record.choice_type.as_str()),
        options,
        category: record.from.as_deref(),
        exclude_ids: &record.exclude,
    }))
}

pub fn from_choice(choice: Option<&Choice>) -> Option<RulesEngineChoice> {
    let choice = choice?;
    let (from, options, exclude) = match &choice.option_set {
        OptionSet::CategoryReference {
            category_id,
            exclude_ids,
        } => (
            Some(String::from(category_id.as_str())),
            None,
            exclude_ids.iter().cloned().collect(),
        ),
        OptionSet::ExplicitOptions { options } => (
            None,
            Some(options.iter().map(ChoiceOption::key).collect()),
            Vec::new(),
        ),
    };
    Some(RulesEngineChoice {
        id: choice.id.clone(),
        choice_type: String::from(choice.choice_type.to_string()),
        choose: i64::from(choice.choose_count),
        from,
        options,
        exclude,
    })
}
