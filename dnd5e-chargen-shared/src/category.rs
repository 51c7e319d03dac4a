//! Equipment categories and the text classifier that recognizes them.
//!
//! Categories stand in for open-ended selections ("any simple weapon") that a
//! catalog resolves later. The classifier is a first-match walk over
//! [`PATTERNS`], so the order of that table is part of its behavior: longer,
//! more specific patterns must come before any looser pattern they contain.

#[cfg(test)]
use proptest_derive::Arbitrary;
use serde::Deserialize;
use smartstring::alias::String;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Deserialize)]
#[cfg_attr(test, derive(Arbitrary))]
#[serde(try_from = "smartstring::alias::String")]
pub enum CategoryId {
    SimpleWeapons,
    MartialWeapons,
    LightArmor,
    MediumArmor,
    HeavyArmor,
    Shields,
    ArtisanTools,
    GamingSets,
    MusicalInstruments,
    AdventuringGear,
    Tools,
    Equipment,
    Vehicles,
}

impl CategoryId {
    pub const ALL: [CategoryId; 13] = [
        Self::SimpleWeapons,
        Self::MartialWeapons,
        Self::LightArmor,
        Self::MediumArmor,
        Self::HeavyArmor,
        Self::Shields,
        Self::ArtisanTools,
        Self::GamingSets,
        Self::MusicalInstruments,
        Self::AdventuringGear,
        Self::Tools,
        Self::Equipment,
        Self::Vehicles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SimpleWeapons => "simple-weapons",
            Self::MartialWeapons => "martial-weapons",
            Self::LightArmor => "light-armor",
            Self::MediumArmor => "medium-armor",
            Self::HeavyArmor => "heavy-armor",
            Self::Shields => "shields",
            Self::ArtisanTools => "artisan-tools",
            Self::GamingSets => "gaming-sets",
            Self::MusicalInstruments => "musical-instruments",
            Self::AdventuringGear => "adventuring-gear",
            Self::Tools => "tools",
            Self::Equipment => "equipment",
            Self::Vehicles => "vehicles",
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

serialize_display!(CategoryId);
try_from_str!(CategoryId);

#[derive(Clone, Debug, Error)]
pub enum CategoryIdFromStrError {
    #[error("Unknown equipment category {0:?}")]
    Unknown(String),
}

impl FromStr for CategoryId {
    type Err = CategoryIdFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CategoryIdFromStrError::Unknown(s.into()))
    }
}

/// Substring patterns checked in order against lower-cased text.
///
/// Melee and ranged weapon variants collapse into the same category.
pub static PATTERNS: &[(&str, CategoryId)] = &[
    ("simple melee weapon", CategoryId::SimpleWeapons),
    ("simple ranged weapon", CategoryId::SimpleWeapons),
    ("simple weapon", CategoryId::SimpleWeapons),
    ("martial melee weapon", CategoryId::MartialWeapons),
    ("martial ranged weapon", CategoryId::MartialWeapons),
    ("martial weapon", CategoryId::MartialWeapons),
    ("light armor", CategoryId::LightArmor),
    ("medium armor", CategoryId::MediumArmor),
    ("heavy armor", CategoryId::HeavyArmor),
    ("shield", CategoryId::Shields),
    ("artisan's tools", CategoryId::ArtisanTools),
    ("artisan\u{2019}s tools", CategoryId::ArtisanTools),
    ("artisan tools", CategoryId::ArtisanTools),
    ("gaming set", CategoryId::GamingSets),
    ("musical instrument", CategoryId::MusicalInstruments),
    ("holy symbol", CategoryId::AdventuringGear),
    ("pack", CategoryId::AdventuringGear),
];

/// Returns the category of the first pattern found in `text`, if any.
pub fn classify(text: &str) -> Option<CategoryId> {
    let lowered = text.to_lowercase();
    PATTERNS
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
        .map(|&(pattern, category)| {
            trace!("Classified {:?} as {} (pattern {:?})", text, category, pattern);
            category
        })
}

/// Resolves a category string supplied explicitly by a source record.
///
/// Accepts either a canonical id (`"martial-weapons"`) or descriptive text
/// (`"any martial weapon"`). Anything else becomes the generic
/// [`CategoryId::Equipment`].
pub fn resolve_category(text: &str) -> CategoryId {
    let trimmed = text.trim();
    if let Ok(id) = trimmed.to_lowercase().parse() {
        return id;
    }
    match classify(trimmed) {
        Some(id) => id,
        None => {
            warn!(
                "Category {:?} doesn't match any known category, treating it as {}",
                text,
                CategoryId::Equipment
            );
            CategoryId::Equipment
        }
    }
}
