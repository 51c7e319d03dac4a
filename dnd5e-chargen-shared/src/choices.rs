//! The canonical choice model.
//!
//! Every upstream representation (content API text, rules engine records) is
//! converted into these types, and every downstream consumer reads them. They
//! are plain value trees: built once, compared structurally, never mutated.

use serde::{Deserialize, Serialize};
use smartstring::alias::String;
use std::{collections::BTreeSet, fmt};

use crate::{category::CategoryId, choice_type::ChoiceType};

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Choice {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub choose_count: u32,
    #[serde(default)]
    pub choice_type: ChoiceType,
    pub option_set: OptionSet,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionSet {
    ExplicitOptions {
        options: Vec<ChoiceOption>,
    },
    CategoryReference {
        category_id: CategoryId,
        #[serde(default)]
        #[serde(skip_serializing_if = "BTreeSet::is_empty")]
        exclude_ids: BTreeSet<String>,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Item {
    pub item_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct CountedItem {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Bundle {
    pub items: Vec<BundleItem>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct NestedChoice {
    pub choice: Box<Choice>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChoiceOption {
    Item(Item),
    CountedItem(CountedItem),
    Bundle(Bundle),
    NestedChoice(NestedChoice),
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BundleItem {
    ConcreteItem(CountedItem),
    ChoiceItem(NestedChoice),
}

impl Choice {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        choose_count: u32,
        choice_type: ChoiceType,
        option_set: OptionSet,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            choose_count,
            choice_type,
            option_set,
        }
    }

    /// The explicit options, or `None` for a category reference.
    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match &self.option_set {
            OptionSet::ExplicitOptions { options } => Some(options.as_slice()),
            OptionSet::CategoryReference { .. } => None,
        }
    }

    pub fn category(&self) -> Option<CategoryId> {
        match &self.option_set {
            OptionSet::ExplicitOptions { .. } => None,
            OptionSet::CategoryReference { category_id, .. } => Some(*category_id),
        }
    }

    /// How deep nested choices go below this one. A flat choice has depth 0.
    pub fn nesting_depth(&self) -> usize {
        self.options()
            .into_iter()
            .flatten()
            .map(ChoiceOption::nesting_depth)
            .max()
            .unwrap_or(0)
    }
}

impl OptionSet {
    pub fn explicit(options: impl IntoIterator<Item = ChoiceOption>) -> Self {
        Self::ExplicitOptions {
            options: options.into_iter().collect(),
        }
    }

    pub fn category(category_id: CategoryId) -> Self {
        Self::CategoryReference {
            category_id,
            exclude_ids: BTreeSet::new(),
        }
    }
}

impl ChoiceOption {
    pub fn item(item_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Item(Item {
            item_id: item_id.into(),
            name: name.into(),
        })
    }

    pub fn counted(item_id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self::CountedItem(CountedItem {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
        })
    }

    pub fn nested(choice: Choice) -> Self {
        Self::NestedChoice(NestedChoice {
            choice: Box::new(choice),
        })
    }

    /// The key a player's selection of this option is recorded under.
    pub fn key(&self) -> String {
        match self {
            Self::Item(item) => item.item_id.clone(),
            Self::CountedItem(item) => item.item_id.clone(),
            Self::Bundle(bundle) => bundle.key(),
            Self::NestedChoice(nested) => nested.choice.id.clone(),
        }
    }

    fn nesting_depth(&self) -> usize {
        match self {
            Self::Item(_) | Self::CountedItem(_) => 0,
            Self::NestedChoice(nested) => 1 + nested.choice.nesting_depth(),
            Self::Bundle(bundle) => bundle
                .items
                .iter()
                .map(|item| match item {
                    BundleItem::ConcreteItem(_) => 0,
                    BundleItem::ChoiceItem(nested) => 1 + nested.choice.nesting_depth(),
                })
                .max()
                .unwrap_or(0),
        }
    }
}

impl Bundle {
    pub fn key(&self) -> String {
        let mut key = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                key.push('+');
            }
            match item {
                BundleItem::ConcreteItem(counted) => key.push_str(&counted.item_id),
                BundleItem::ChoiceItem(nested) => key.push_str(&nested.choice.id),
            }
        }
        key
    }
}

/// Rule text drops a count of one ("a light crossbow"), so re-parsing the
/// output yields a plain item. Adapters that need the count back write it out
/// themselves.
impl fmt::Display for CountedItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.quantity == 1 {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.quantity, self.name)
        }
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " and ")?;
            }
            match item {
                BundleItem::ConcreteItem(counted) => write!(f, "{}", counted)?,
                BundleItem::ChoiceItem(nested) => write!(f, "{}", nested.choice)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for ChoiceOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Item(item) => write!(f, "{}", item.name),
            Self::CountedItem(counted) => write!(f, "{}", counted),
            Self::Bundle(bundle) => write!(f, "{}", bundle),
            Self::NestedChoice(nested) => write!(f, "{}", nested.choice),
        }
    }
}

/// Renders the choice as rule text: the description when there is one,
/// otherwise the options joined with "or".
impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.description.is_empty() {
            return write!(f, "{}", self.description);
        }
        match &self.option_set {
            OptionSet::CategoryReference { category_id, .. } => write!(f, "any {}", category_id),
            OptionSet::ExplicitOptions { options } => {
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{}", option)?;
                }
                Ok(())
            }
        }
    }
}
