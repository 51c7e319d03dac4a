#![deny(unreachable_patterns)]

#[macro_use]
extern crate log;

use anyhow::{Context as _, Result};
use dnd5e_chargen_shared::{
    adapters::{external_api, rules_engine},
    Assembler, AssemblerConfig, Choice,
};
use serde::de::DeserializeOwned;
use std::{fs::File, path::Path};

const USAGE: &str = "usage: dnd5e-chargen <external-api|rules-engine> <records.yaml> [config.yaml]";

fn load_yaml<T: DeserializeOwned>(filename: impl AsRef<Path>) -> Result<T> {
    let path = filename.as_ref();
    anyhow::ensure!(path.is_file(), "File \"{}\" doesn't exist", path.display());
    let mut f = File::open(path).with_context(|| format!("Error opening {}", path.display()))?;
    serde_yaml::from_reader(&mut f).with_context(|| format!("Error parsing {}", path.display()))
}

fn load_config(filename: Option<&str>) -> Result<AssemblerConfig> {
    match filename {
        Some(f) => {
            let config: AssemblerConfig = load_yaml(f)?;
            debug!("Loaded assembler config: {:?}", config);
            Ok(config)
        }
        None => Ok(AssemblerConfig::default()),
    }
}

fn load_external(assembler: &Assembler, filename: &str) -> Result<Vec<Choice>> {
    let records: Vec<external_api::ExternalChoice> = load_yaml(filename)?;
    // API records carry no ids; number them after the file they came from.
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("choice");
    let mut choices = Vec::with_capacity(records.len());
    for (i, r) in records.iter().enumerate() {
        let id = format!("{}-{}", stem, i);
        if let Some(c) = external_api::to_choice(assembler, Some(r), &id) {
            info!("Assembled choice {}: {}", c.id, c);
            choices.push(c);
        }
    }
    Ok(choices)
}

fn load_rules_engine(assembler: &Assembler, filename: &str) -> Result<Vec<Choice>> {
    let records: Vec<rules_engine::RulesEngineChoice> = load_yaml(filename)?;
    let mut choices = Vec::with_capacity(records.len());
    for r in &records {
        if let Some(c) = rules_engine::to_choice(assembler, Some(r)) {
            info!("Assembled choice {}: {}", c.id, c);
            choices.push(c);
        }
    }
    Ok(choices)
}

fn main() -> Result<()> {
    pretty_env_logger::init_timed();

    let args: Vec<String> = std::env::args().skip(1).collect();
    anyhow::ensure!(args.len() == 2 || args.len() == 3, "{}", USAGE);

    let assembler = Assembler::new(load_config(args.get(2).map(String::as_str))?);
    let choices = match args[0].as_str() {
        "external-api" => load_external(&assembler, &args[1])?,
        "rules-engine" => load_rules_engine(&assembler, &args[1])?,
        other => anyhow::bail!("Unknown record format {:?}\n{}", other, USAGE),
    };

    print!("{}", serde_yaml::to_string(&choices)?);
    Ok(())
}
