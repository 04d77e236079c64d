//! Rules configuration loaded from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CHARSHEET_STAMINA_DIE_FORMULA` | `1d10+Mod.Endurance` |
//! | `CHARSHEET_COMPOSURE_DIE_FORMULA` | `1d4` |

use std::path::Path;

use charsheet_domain::{DiceFormula, FormulaError, RestRules};
use serde::{Deserialize, Serialize};

pub const STAMINA_DIE_ENV: &str = "CHARSHEET_STAMINA_DIE_FORMULA";
pub const COMPOSURE_DIE_ENV: &str = "CHARSHEET_COMPOSURE_DIE_FORMULA";

fn default_stamina_die_formula() -> String {
    "1d10+Mod.Endurance".to_string()
}

fn default_composure_die_formula() -> String {
    "1d4".to_string()
}

/// Formulas the rest and healing resolvers roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesSettings {
    /// Rolled once per stamina die on short rests and stamina heals
    #[serde(default = "default_stamina_die_formula")]
    pub stamina_die_formula: String,
    /// Rolled once per short rest for composure
    #[serde(default = "default_composure_die_formula")]
    pub composure_die_formula: String,
}

impl Default for RulesSettings {
    fn default() -> Self {
        Self {
            stamina_die_formula: default_stamina_die_formula(),
            composure_die_formula: default_composure_die_formula(),
        }
    }
}

impl RulesSettings {
    /// Read from process environment. Unset or blank variables keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: fn() -> String| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(default)
        };
        Self {
            stamina_die_formula: read(STAMINA_DIE_ENV, default_stamina_die_formula),
            composure_die_formula: read(COMPOSURE_DIE_ENV, default_composure_die_formula),
        }
    }

    /// Parse both formulas. A malformed formula is a startup error.
    pub fn rest_rules(&self) -> Result<RestRules, FormulaError> {
        Ok(RestRules {
            stamina_die: DiceFormula::parse(&self.stamina_die_formula)?,
            composure_die: DiceFormula::parse(&self.composure_die_formula)?,
        })
    }
}

/// Load `.env.local` then `.env` from the workspace root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_standard_rest_rules() {
        let settings = RulesSettings::default();
        assert_eq!(settings.rest_rules().unwrap(), RestRules::default());
    }

    #[test]
    fn lookup_overrides_and_blank_values() {
        let env = HashMap::from([
            (STAMINA_DIE_ENV, "1d12 + Mod.Endurance".to_string()),
            (COMPOSURE_DIE_ENV, "   ".to_string()),
        ]);
        let settings = RulesSettings::from_lookup(|key| env.get(key).cloned());
        assert_eq!(settings.stamina_die_formula, "1d12 + Mod.Endurance");
        assert_eq!(settings.composure_die_formula, "1d4");

        let rules = settings.rest_rules().unwrap();
        assert_eq!(rules.stamina_die.to_string(), "1d12+Mod.Endurance");
    }

    #[test]
    fn malformed_formula_is_reported() {
        let settings = RulesSettings {
            stamina_die_formula: "1d".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            settings.rest_rules(),
            Err(FormulaError::InvalidFormat(_))
        ));
    }

    #[test]
    fn missing_json_fields_use_defaults() {
        let settings: RulesSettings =
            serde_json::from_str(r#"{"composure_die_formula": "1d6"}"#).unwrap();
        assert_eq!(settings.stamina_die_formula, "1d10+Mod.Endurance");
        assert_eq!(settings.composure_die_formula, "1d6");
    }
}
