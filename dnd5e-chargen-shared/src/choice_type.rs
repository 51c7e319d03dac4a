use lazy_static::lazy_static;
#[cfg(test)]
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};
use smartstring::alias::String;
use std::{collections::HashMap, fmt, str::FromStr};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Deserialize, Serialize)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum ChoiceType {
    Skill,
    Tool,
    Language,
    WeaponProficiency,
    ArmorProficiency,
    Spell,
    Feat,
    Equipment,
}

impl Default for ChoiceType {
    fn default() -> Self {
        Self::Equipment
    }
}

impl fmt::Display for ChoiceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &'static str = match self {
            Self::Skill => "skill",
            Self::Tool => "tool",
            Self::Language => "language",
            Self::WeaponProficiency => "weapon_proficiency",
            Self::ArmorProficiency => "armor_proficiency",
            Self::Spell => "spell",
            Self::Feat => "feat",
            Self::Equipment => "equipment",
        };
        f.write_str(name)
    }
}

lazy_static! {
    static ref ALIASES: HashMap<std::string::String, ChoiceType> = {
        let base: &[(ChoiceType, &[&str])] = &[
            (
                ChoiceType::Skill,
                &["skill", "skills", "skill_proficiency", "skill_proficiencies"],
            ),
            (
                ChoiceType::Tool,
                &["tool", "tools", "tool_proficiency", "tool_proficiencies"],
            ),
            (ChoiceType::Language, &["language", "languages"]),
            (
                ChoiceType::WeaponProficiency,
                &[
                    "weapon",
                    "weapons",
                    "weapon_proficiency",
                    "weapon_proficiencies",
                ],
            ),
            (
                ChoiceType::ArmorProficiency,
                &[
                    "armor",
                    "armour",
                    "armor_proficiency",
                    "armor_proficiencies",
                    "armour_proficiency",
                ],
            ),
            (ChoiceType::Spell, &["spell", "spells", "cantrip", "cantrips"]),
            (ChoiceType::Feat, &["feat", "feats"]),
            (
                ChoiceType::Equipment,
                &[
                    "equipment",
                    "gear",
                    "item",
                    "items",
                    "starting_equipment",
                    "equipment_choice",
                ],
            ),
        ];

        let mut map = HashMap::new();
        for (choice_type, aliases) in base {
            for alias in aliases.iter() {
                map.insert(alias.to_string(), *choice_type);
                map.insert(alias.replace('_', "-"), *choice_type);
                map.insert(alias.replace('_', " "), *choice_type);
            }
        }
        map
    };
}

/// The result of normalizing a free-text choice type label.
///
/// Labels that aren't recognized are kept as-is; converting them into a
/// [`ChoiceType`] (or a wire enum) treats them as equipment.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum NormalizedChoiceType {
    Known(ChoiceType),
    Unrecognized(String),
}

impl NormalizedChoiceType {
    pub fn choice_type(&self) -> ChoiceType {
        match self {
            Self::Known(t) => *t,
            Self::Unrecognized(raw) => {
                debug!("Unrecognized choice type {:?}, using equipment", raw);
                ChoiceType::Equipment
            }
        }
    }
}

impl From<NormalizedChoiceType> for ChoiceType {
    fn from(normalized: NormalizedChoiceType) -> Self {
        normalized.choice_type()
    }
}

pub fn normalize(raw: &str) -> NormalizedChoiceType {
    let key = raw.trim().to_lowercase();
    if key.is_empty() {
        return NormalizedChoiceType::Known(ChoiceType::Equipment);
    }
    match ALIASES.get(&key) {
        Some(t) => NormalizedChoiceType::Known(*t),
        None => NormalizedChoiceType::Unrecognized(raw.into()),
    }
}

try_from_str!(ChoiceType);

#[derive(Clone, Debug, Error)]
pub enum ChoiceTypeFromStrError {
    #[error("Unknown choice type {0:?}")]
    Unknown(String),
}

/// Strict parsing: only recognized labels succeed. Use [`normalize`] for
/// best-effort conversion of upstream data.
impl FromStr for ChoiceType {
    type Err = ChoiceTypeFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s) {
            NormalizedChoiceType::Known(t) if !s.trim().is_empty() => Ok(t),
            _ => Err(ChoiceTypeFromStrError::Unknown(s.into())),
        }
    }
}
