//! Turning a choice record from any source into a canonical [`Choice`].
//!
//! This is the only place that decides between an explicit option list and a
//! category reference. The adapters only pull fields out of their own record
//! format and hand them to [`Assembler::assemble`].

use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::{
    category,
    choice_type,
    choices::{Choice, OptionSet},
    options::{OptionParser, DEFAULT_NESTED_CHOICE_ID},
};

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Id given to the nested choices created for "or" options.
    pub nested_choice_id: String,
    /// Used in place of a missing or non-positive choose count.
    pub default_choose_count: u32,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            nested_choice_id: DEFAULT_NESTED_CHOICE_ID.into(),
            default_choose_count: 1,
        }
    }
}

impl AssemblerConfig {
    pub fn with_nested_choice_id(mut self, id: impl Into<String>) -> Self {
        self.nested_choice_id = id.into();
        self
    }

    pub fn with_default_choose_count(mut self, count: u32) -> Self {
        self.default_choose_count = count.max(1);
        self
    }
}

/// The fields every source can provide, borrowed from the source record.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChoiceRecord<'a> {
    pub source_id: &'a str,
    pub description: Option<&'a str>,
    pub choose_count: i64,
    pub choice_type: Option<&'a str>,
    pub options: &'a [String],
    pub category: Option<&'a str>,
    pub exclude_ids: &'a [String],
}

#[derive(Clone, Debug, Default)]
pub struct Assembler {
    config: AssemblerConfig,
    parser: OptionParser,
}

impl Assembler {
    pub fn new(config: AssemblerConfig) -> Self {
        let parser = OptionParser::new(config.nested_choice_id.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn assemble(&self, record: &ChoiceRecord<'_>) -> Choice {
        let description = record.description.unwrap_or_default().trim();
        let choice_type = choice_type::normalize(record.choice_type.unwrap_or_default()).choice_type();
        let choose_count = self.choose_count(record);
        let option_set = self.option_set(record, description);
        debug!(
            "Assembled {} choice {:?} (choose {}) from {:?}",
            choice_type, record.source_id, choose_count, description
        );
        Choice::new(
            record.source_id,
            description,
            choose_count,
            choice_type,
            option_set,
        )
    }

    pub fn assemble_opt(&self, record: Option<&ChoiceRecord<'_>>) -> Option<Choice> {
        record.map(|r| self.assemble(r))
    }

    fn choose_count(&self, record: &ChoiceRecord<'_>) -> u32 {
        if record.choose_count < 1 {
            // Configs loaded from files skip the builder, so clamp here too.
            let fallback = self.config.default_choose_count.max(1);
            debug!(
                "Choice {:?} has choose count {}, using {}",
                record.source_id, record.choose_count, fallback
            );
            return fallback;
        }
        if record.choose_count > i64::from(u32::MAX) {
            warn!(
                "Choice {:?} has choose count {}, clamping it",
                record.source_id, record.choose_count
            );
            return u32::MAX;
        }
        record.choose_count as u32
    }

    fn option_set(&self, record: &ChoiceRecord<'_>, description: &str) -> OptionSet {
        // An explicit category only counts when nothing is enumerated; a
        // description naming a category wins even over enumerated options.
        let explicit = match record.category {
            Some(text) if record.options.is_empty() && !text.trim().is_empty() => {
                Some(category::resolve_category(text))
            }
            _ => None,
        };
        let category_id = explicit.or_else(|| category::classify(description));

        match category_id {
            Some(category_id) => {
                trace!("Choice {:?} references category {}", record.source_id, category_id);
                OptionSet::CategoryReference {
                    category_id,
                    exclude_ids: record.exclude_ids.iter().cloned().collect(),
                }
            }
            None => OptionSet::explicit(record.options.iter().map(|text| self.parser.parse(text))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        category::CategoryId,
        choice_type::ChoiceType,
        choices::{ChoiceOption, NestedChoice},
    };

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn explicit_category_without_options() {
        let record = ChoiceRecord {
            source_id: "fighter-weapon",
            choose_count: 2,
            choice_type: Some("weapons"),
            category: Some("any martial weapon"),
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        assert_eq!(
            choice,
            Choice::new(
                "fighter-weapon",
                "",
                2,
                ChoiceType::WeaponProficiency,
                OptionSet::category(CategoryId::MartialWeapons),
            )
        );
    }

    #[test]
    fn options_win_over_category() {
        let options = strings(&["a longsword", "a battleaxe"]);
        let record = ChoiceRecord {
            source_id: "paladin-weapon",
            choose_count: 1,
            options: &options,
            category: Some("martial-weapons"),
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        assert_eq!(
            choice.option_set,
            OptionSet::explicit(vec![
                ChoiceOption::item("a-longsword", "a longsword"),
                ChoiceOption::item("a-battleaxe", "a battleaxe"),
            ])
        );
    }

    #[test]
    fn description_only_category() {
        let record = ChoiceRecord {
            source_id: "bard-instrument",
            description: Some(" three musical instruments of your choice "),
            choose_count: 3,
            choice_type: Some("Tool Proficiencies"),
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        assert_eq!(choice.description.as_str(), "three musical instruments of your choice");
        assert_eq!(choice.choice_type, ChoiceType::Tool);
        assert_eq!(choice.category(), Some(CategoryId::MusicalInstruments));
    }

    #[test]
    fn classified_description_wins_over_options() {
        let options = strings(&["(a) a shortsword or (b) any simple weapon"]);
        let record = ChoiceRecord {
            source_id: "rogue-weapon",
            description: Some("(a) a shortsword or (b) any simple weapon"),
            choose_count: 1,
            options: &options,
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        assert_eq!(choice.category(), Some(CategoryId::SimpleWeapons));
    }

    #[test]
    fn unclassified_description_keeps_options() {
        let options = strings(&["(a) a shortsword or (b) any simple weapon"]);
        let record = ChoiceRecord {
            source_id: "rogue-weapon",
            description: Some("a weapon of your choice"),
            choose_count: 1,
            options: &options,
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        let nested = match &choice.options().unwrap()[0] {
            ChoiceOption::NestedChoice(NestedChoice { choice }) => choice,
            other => panic!("Expected a nested choice, got {:?}", other),
        };
        assert_eq!(nested.options().unwrap()[1], ChoiceOption::item("simple-weapons", "any simple weapon"));
    }

    #[test]
    fn conjunction_in_description_is_classified() {
        let record = ChoiceRecord {
            source_id: "cleric-gear",
            description: Some("a mace and a shield"),
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        assert_eq!(choice.category(), Some(CategoryId::Shields));
    }

    #[test]
    fn missing_fields_degrade_to_defaults() {
        let record = ChoiceRecord {
            source_id: "mystery",
            choose_count: -3,
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        assert_eq!(
            choice,
            Choice::new("mystery", "", 1, ChoiceType::Equipment, OptionSet::explicit(vec![]))
        );
    }

    #[test]
    fn unknown_type_is_equipment() {
        let record = ChoiceRecord {
            source_id: "odd",
            choice_type: Some("unknown_xyz"),
            choose_count: 1,
            ..ChoiceRecord::default()
        };
        assert_eq!(Assembler::default().assemble(&record).choice_type, ChoiceType::Equipment);
    }

    #[test]
    fn exclusions_are_kept() {
        let exclude = strings(&["club", "greatclub"]);
        let record = ChoiceRecord {
            source_id: "monk-weapon",
            choose_count: 1,
            category: Some("simple-weapons"),
            exclude_ids: &exclude,
            ..ChoiceRecord::default()
        };
        match Assembler::default().assemble(&record).option_set {
            OptionSet::CategoryReference { category_id, exclude_ids } => {
                assert_eq!(category_id, CategoryId::SimpleWeapons);
                let excluded: Vec<&str> = exclude_ids.iter().map(|s| s.as_str()).collect();
                assert_eq!(excluded, vec!["club", "greatclub"]);
            }
            other => panic!("Expected a category reference, got {:?}", other),
        }
    }

    #[test]
    fn configured_defaults() {
        let config = AssemblerConfig::default()
            .with_nested_choice_id("or-option")
            .with_default_choose_count(2);
        let options = strings(&["a dagger or a sickle"]);
        let record = ChoiceRecord {
            source_id: "druid-weapon",
            options: &options,
            ..ChoiceRecord::default()
        };
        let choice = Assembler::new(config).assemble(&record);
        assert_eq!(choice.choose_count, 2);
        assert_eq!(choice.options().unwrap()[0].key().as_str(), "or-option");
    }

    #[test]
    fn config_from_yaml() {
        let config: AssemblerConfig = serde_yaml::from_str("nested_choice_id: sub\n").unwrap();
        assert_eq!(config, AssemblerConfig::default().with_nested_choice_id("sub"));
    }

    #[test]
    fn zero_default_choose_count_from_yaml_still_chooses_one() {
        let config: AssemblerConfig = serde_yaml::from_str("default_choose_count: 0\n").unwrap();
        let record = ChoiceRecord {
            source_id: "empty",
            ..ChoiceRecord::default()
        };
        assert_eq!(Assembler::new(config).assemble(&record).choose_count, 1);
    }

    #[test]
    fn long_text_survives_assembly() {
        let description = "one set of artisan's tools of your choice, which you may trade for a gaming set";
        let options = strings(&["(a) a heavy crossbow with a case of twenty bolts or (b) a longbow with a quiver"]);
        let record = ChoiceRecord {
            source_id: "guild-artisan-starting-equipment",
            description: Some(description),
            choose_count: 1,
            options: &options,
            ..ChoiceRecord::default()
        };
        let choice = Assembler::default().assemble(&record);
        assert_eq!(choice.id.as_str(), "guild-artisan-starting-equipment");
        assert_eq!(choice.description.as_str(), description);
        assert_eq!(choice.category(), Some(CategoryId::ArtisanTools));

        let record = ChoiceRecord {
            description: None,
            ..record
        };
        let choice = Assembler::default().assemble(&record);
        let nested = match &choice.options().unwrap()[0] {
            ChoiceOption::NestedChoice(NestedChoice { choice }) => choice,
            other => panic!("Expected a nested choice, got {:?}", other),
        };
        assert_eq!(nested.description.as_str(), options[0].as_str());
        assert_eq!(
            nested.options().unwrap()[0],
            ChoiceOption::item(
                "a-heavy-crossbow-with-a-case-of-twenty-bolts",
                "a heavy crossbow with a case of twenty bolts"
            )
        );
    }

    #[test]
    fn absent_record_is_absent_choice() {
        assert_eq!(Assembler::default().assemble_opt(None), None);
    }
}
