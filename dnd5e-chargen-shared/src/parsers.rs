use crate::ability::Ability;

peg::parser! {
    grammar parsers() for str {
        rule ws() = quiet!{ [' ' | '\t' | '\n' | '\r']+ }

        rule quantity() -> u32
            = n:$(['0'..='9']+)
              {? match n.parse::<u32>() {
                     Ok(0) => Err("Quantity must be at least 1"),
                     Ok(q) => Ok(q),
                     Err(_) => Err("Quantity is too large"),
                 }
              }

        // A leading count followed by the name of what is counted, as in
        // `"20 arrows"`.
        pub rule quantity_prefix() -> (u32, &'input str)
            = ws()? q:quantity() ws() name:$([_]+) { (q, name.trim()) }

        // A leading single-character list marker such as `"(a)"`; returns the
        // text after it.
        pub rule choice_marker() -> &'input str
            = ws()? "(" [_] ")" ws()? rest:$([_]*) { rest }

        pub rule ability() -> Ability
            = ("strength" / "Strength" / "STRENGTH" / "str" / "Str" / "STR") { Ability::STR }
            / ("dexterity" / "Dexterity" / "DEXTERITY" / "dex" / "Dex" / "DEX") { Ability::DEX }
            / ("constitution" / "Constitution" / "CONSTITUTION" / "con" / "Con" / "CON") { Ability::CON }
            / ("intelligence" / "Intelligence" / "INTELLIGENCE" / "int" / "Int" / "INT") { Ability::INT }
            / ("wisdom" / "Wisdom" / "WISDOM" / "wis" / "Wis" / "WIS") { Ability::WIS }
            / ("charisma" / "Charisma" / "CHARISMA" / "cha" / "Cha" / "CHA") { Ability::CHA }
    }
}

pub use parsers::*;

/// Strips one leading `(x)` marker and the surrounding whitespace.
pub fn strip_choice_marker(text: &str) -> &str {
    choice_marker(text).unwrap_or(text).trim()
}
