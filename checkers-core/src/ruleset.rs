//! RuleSet - rule variant switches for a game

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule variant flags
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub name: String,
    /// A side with any capture available must capture
    pub mandatory_capture: bool,
    /// Men may jump backward (kings always may)
    pub men_capture_backward: bool,
    /// A piece that can keep jumping after a capture must do so before the turn passes
    pub chain_captures: bool,
}

impl Rules {
    /// Standard rules: forced captures, backward man captures, multi-jumps
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            mandatory_capture: true,
            men_capture_backward: true,
            chain_captures: true,
        }
    }

    /// Relaxed rules: captures optional, one jump per turn
    pub fn casual() -> Self {
        Self {
            name: "casual".to_string(),
            mandatory_capture: false,
            men_capture_backward: true,
            chain_captures: false,
        }
    }

    /// Look up a named preset
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" => Some(Self::classic()),
            "casual" => Some(Self::casual()),
            _ => None,
        }
    }

    /// Load from JSON file; missing fields take their classic values
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let rules: Rules = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse rules JSON in {}", path.display()))?;
        Ok(rules)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}
