//! Selection messages exchanged with clients.
//!
//! A wire choice records what the player picked for a choice defined
//! elsewhere; it never carries the options themselves. Enum values use the
//! protobuf JSON naming of the service schema, including the `UNSPECIFIED`
//! members that the canonical model never produces.

use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::{
    ability::Ability,
    choice_type::{ChoiceType, NormalizedChoiceType},
    choices::Choice,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum WireChoiceType {
    #[serde(rename = "CHOICE_TYPE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "CHOICE_TYPE_SKILL")]
    Skill,
    #[serde(rename = "CHOICE_TYPE_TOOL")]
    Tool,
    #[serde(rename = "CHOICE_TYPE_LANGUAGE")]
    Language,
    #[serde(rename = "CHOICE_TYPE_WEAPON_PROFICIENCY")]
    WeaponProficiency,
    #[serde(rename = "CHOICE_TYPE_ARMOR_PROFICIENCY")]
    ArmorProficiency,
    #[serde(rename = "CHOICE_TYPE_SPELL")]
    Spell,
    #[serde(rename = "CHOICE_TYPE_FEAT")]
    Feat,
    #[serde(rename = "CHOICE_TYPE_EQUIPMENT")]
    Equipment,
}

impl Default for WireChoiceType {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl From<ChoiceType> for WireChoiceType {
    fn from(t: ChoiceType) -> Self {
        match t {
            ChoiceType::Skill => Self::Skill,
            ChoiceType::Tool => Self::Tool,
            ChoiceType::Language => Self::Language,
            ChoiceType::WeaponProficiency => Self::WeaponProficiency,
            ChoiceType::ArmorProficiency => Self::ArmorProficiency,
            ChoiceType::Spell => Self::Spell,
            ChoiceType::Feat => Self::Feat,
            ChoiceType::Equipment => Self::Equipment,
        }
    }
}

impl From<&NormalizedChoiceType> for WireChoiceType {
    fn from(t: &NormalizedChoiceType) -> Self {
        match t {
            NormalizedChoiceType::Known(t) => Self::from(*t),
            NormalizedChoiceType::Unrecognized(raw) => {
                debug!("Sending unrecognized choice type {:?} as equipment", raw);
                Self::Equipment
            }
        }
    }
}

impl WireChoiceType {
    pub fn canonical(self) -> ChoiceType {
        match self {
            Self::Skill => ChoiceType::Skill,
            Self::Tool => ChoiceType::Tool,
            Self::Language => ChoiceType::Language,
            Self::WeaponProficiency => ChoiceType::WeaponProficiency,
            Self::ArmorProficiency => ChoiceType::ArmorProficiency,
            Self::Spell => ChoiceType::Spell,
            Self::Feat => ChoiceType::Feat,
            Self::Unspecified | Self::Equipment => ChoiceType::Equipment,
        }
    }
}

/// Where in character creation the choice was offered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ChoiceSource {
    #[serde(rename = "CHOICE_SOURCE_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "CHOICE_SOURCE_RACE")]
    Race,
    #[serde(rename = "CHOICE_SOURCE_SUBRACE")]
    Subrace,
    #[serde(rename = "CHOICE_SOURCE_CLASS")]
    Class,
    #[serde(rename = "CHOICE_SOURCE_SUBCLASS")]
    Subclass,
    #[serde(rename = "CHOICE_SOURCE_BACKGROUND")]
    Background,
    #[serde(rename = "CHOICE_SOURCE_FEAT")]
    Feat,
}

impl Default for ChoiceSource {
    fn default() -> Self {
        Self::Unspecified
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct AbilityScoreChoice {
    pub ability: Ability,
    pub bonus: i32,
}

/// What the player picked: option keys, plus ability bonuses for choices
/// that grant them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection {
    pub selected_keys: Vec<String>,
    pub ability_score_choices: Vec<AbilityScoreChoice>,
}

impl Selection {
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_keys: keys.into_iter().map(Into::into).collect(),
            ability_score_choices: Vec::new(),
        }
    }

    pub fn with_ability_score(mut self, ability: Ability, bonus: i32) -> Self {
        self.ability_score_choices
            .push(AbilityScoreChoice { ability, bonus });
        self
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct WireChoice {
    pub choice_id: String,
    #[serde(default)]
    pub choice_type: WireChoiceType,
    #[serde(default)]
    pub source: ChoiceSource,
    #[serde(default)]
    pub selected_keys: Vec<String>,
    #[serde(default)]
    pub ability_score_choices: Vec<AbilityScoreChoice>,
}

impl WireChoice {
    pub fn canonical_type(&self) -> ChoiceType {
        self.choice_type.canonical()
    }

    pub fn into_selection(self) -> Selection {
        Selection {
            selected_keys: self.selected_keys,
            ability_score_choices: self.ability_score_choices,
        }
    }
}

/// Builds the wire record for a player's selection of `choice`.
///
/// Keys are passed through as given; checking them against the choice's
/// options is left to the rules engine.
pub fn to_wire(choice: Option<&Choice>, source: ChoiceSource, selection: &Selection) -> Option<WireChoice> {
    let choice = choice?;
    Some(WireChoice {
        choice_id: choice.id.clone(),
        choice_type: choice.choice_type.into(),
        source,
        selected_keys: selection.selected_keys.clone(),
        ability_score_choices: selection.ability_score_choices.clone(),
    })
}

pub fn decode(bytes: &[u8]) -> Result<WireChoice, serde_json::Error> {
    serde_json::from_slice(bytes)
}

pub fn encode(choice: &WireChoice) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(choice)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        category::CategoryId,
        choice_type::normalize,
        choices::{ChoiceOption, OptionSet},
    };

    #[test]
    fn protocol_mapping_falls_back_to_equipment() {
        assert_eq!(WireChoiceType::from(&normalize("unknown_xyz")), WireChoiceType::Equipment);
        assert_eq!(WireChoiceType::from(&normalize("")), WireChoiceType::Equipment);
        assert_eq!(WireChoiceType::from(&normalize("Skill-Proficiency")), WireChoiceType::Skill);
        assert_eq!(WireChoiceType::Unspecified.canonical(), ChoiceType::Equipment);
    }

    #[test]
    fn selection_to_wire() {
        let choice = Choice::new(
            "half-elf-skills",
            "",
            2,
            ChoiceType::Skill,
            OptionSet::explicit(vec![
                ChoiceOption::item("insight", "Insight"),
                ChoiceOption::item("persuasion", "Persuasion"),
            ]),
        );
        let selection = Selection::keys(vec!["insight", "persuasion"]);
        let wire = to_wire(Some(&choice), ChoiceSource::Race, &selection).unwrap();
        assert_eq!(wire.choice_id.as_str(), "half-elf-skills");
        assert_eq!(wire.choice_type, WireChoiceType::Skill);
        assert_eq!(wire.canonical_type(), ChoiceType::Skill);
        assert_eq!(wire.into_selection(), selection);
    }

    #[test]
    fn json_shape() {
        let choice = Choice::new("half-elf-abilities", "", 2, ChoiceType::Equipment, OptionSet::category(CategoryId::Equipment));
        let selection = Selection::default()
            .with_ability_score(Ability::DEX, 1)
            .with_ability_score(Ability::WIS, 1);
        let wire = to_wire(Some(&choice), ChoiceSource::Subrace, &selection).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&encode(&wire).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "choice_id": "half-elf-abilities",
                "choice_type": "CHOICE_TYPE_EQUIPMENT",
                "source": "CHOICE_SOURCE_SUBRACE",
                "selected_keys": [],
                "ability_score_choices": [
                    { "ability": "DEX", "bonus": 1 },
                    { "ability": "WIS", "bonus": 1 },
                ],
            })
        );
    }

    #[test]
    fn decode_accepts_long_ability_names_and_missing_fields() {
        let raw = br#"{
            "choice_id": "variant-human-abilities",
            "ability_score_choices": [{ "ability": "Strength", "bonus": 1 }, { "ability": "cha", "bonus": 1 }]
        }"#;
        let wire = decode(raw).unwrap();
        assert_eq!(wire.choice_type, WireChoiceType::Unspecified);
        assert_eq!(wire.canonical_type(), ChoiceType::Equipment);
        assert_eq!(wire.source, ChoiceSource::Unspecified);
        assert_eq!(
            wire.ability_score_choices,
            vec![
                AbilityScoreChoice { ability: Ability::STR, bonus: 1 },
                AbilityScoreChoice { ability: Ability::CHA, bonus: 1 },
            ]
        );
    }

    #[test]
    fn decode_rejects_unknown_abilities() {
        let raw = br#"{"choice_id": "x", "ability_score_choices": [{ "ability": "LUCK", "bonus": 1 }]}"#;
        assert!(decode(raw).is_err());
    }

    #[test]
    fn absent_choice_is_absent_wire() {
        assert_eq!(to_wire(None, ChoiceSource::Class, &Selection::default()), None);
    }

    proptest! {
        #[test]
        fn canonical_types_survive_the_wire(t in any::<ChoiceType>()) {
            prop_assert_eq!(WireChoiceType::from(t).canonical(), t);
        }
    }
}
