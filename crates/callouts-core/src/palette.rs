//! Party colors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps a party label to a CSS color. Unaffiliated participants (empty
/// party) and parties without an entry use `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyPalette {
    pub default: String,
    pub parties: BTreeMap<String, String>,
}

impl PartyPalette {
    pub fn color(&self, party: &str) -> &str {
        self.parties
            .get(party.trim())
            .map_or(self.default.as_str(), String::as_str)
    }
}

impl Default for PartyPalette {
    fn default() -> Self {
        let parties = [
            ("FPÖ", "#000dff"),
            ("ÖVP", "#000000"),
            ("NEOS", "#fe019a"),
            ("GRÜNE", "#31ad00"),
            ("SPÖ", "#d41a0d"),
        ]
        .into_iter()
        .map(|(p, c)| (p.to_string(), c.to_string()))
        .collect();

        PartyPalette {
            default: "#d3d3d3".to_string(),
            parties,
        }
    }
}
