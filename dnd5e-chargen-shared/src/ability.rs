//! The six ability scores, as named in ability score increase selections.

#[cfg(test)]
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};
use smartstring::alias::String;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Deserialize, Serialize)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(try_from = "smartstring::alias::String")]
pub enum Ability {
    STR,
    DEX,
    CON,
    INT,
    WIS,
    CHA,
}

impl Ability {
    pub const ALL: [Ability; 6] = [Self::STR, Self::DEX, Self::CON, Self::INT, Self::WIS, Self::CHA];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::STR => "STR",
            Self::DEX => "DEX",
            Self::CON => "CON",
            Self::INT => "INT",
            Self::WIS => "WIS",
            Self::CHA => "CHA",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::STR => "Strength",
            Self::DEX => "Dexterity",
            Self::CON => "Constitution",
            Self::INT => "Intelligence",
            Self::WIS => "Wisdom",
            Self::CHA => "Charisma",
        }
    }
}

/// Prints the abbreviation; the alternate form (`{:#}`) prints the full name.
impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.write_str(self.name())
        } else {
            f.write_str(self.abbreviation())
        }
    }
}

try_from_str!(Ability);

#[derive(Clone, Debug, Error)]
pub enum AbilityFromStrError {
    #[error("{0:?} is neither an ability name nor an abbreviation")]
    Unrecognized(String),
}

impl FromStr for Ability {
    type Err = AbilityFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parsers::ability(s.trim()).map_err(|e| {
            debug!("Rejected ability {:?}: {}", s, e);
            AbilityFromStrError::Unrecognized(s.into())
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn names_and_abbreviations() {
        assert_eq!(Ability::WIS.to_string(), "WIS");
        assert_eq!(format!("{:#}", Ability::WIS), "Wisdom");
        assert_eq!(" dex ".parse::<Ability>().ok(), Some(Ability::DEX));
        assert!("Luck".parse::<Ability>().is_err());
    }

    #[test]
    fn serde_uses_abbreviations() {
        assert_eq!(serde_json::to_string(&Ability::CON).unwrap(), "\"CON\"");
        let parsed: Ability = serde_json::from_str("\"Intelligence\"").unwrap();
        assert_eq!(parsed, Ability::INT);
    }

    proptest! {
        #[test]
        fn both_display_forms_parse_back(a in any::<Ability>()) {
            prop_assert_eq!(a.to_string().parse::<Ability>().ok(), Some(a));
            prop_assert_eq!(format!("{:#}", a).parse::<Ability>().ok(), Some(a));
            prop_assert!(Ability::ALL.contains(&a));
        }
    }
}
