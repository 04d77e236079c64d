//! Skills, skill scores and the modifier step table.
//!
//! A character has eighteen raw skill scores in `1..=10`. Every rule that
//! needs a bonus goes through [`skill_modifier`]; modifiers are never stored.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lowest legal raw skill score.
pub const MIN_SKILL: u8 = 1;
/// Highest legal raw skill score.
pub const MAX_SKILL: u8 = 10;

/// Map a raw skill score to its modifier.
///
/// Step table: 1 → 0, 2–3 → 1, 4–5 → 2, 6–7 → 3, 8–9 → 4, 10 → 5.
/// Values outside `1..=10` are a caller error and are not validated here.
pub fn skill_modifier(value: u8) -> i32 {
    match value {
        0..=1 => 0,
        2..=3 => 1,
        4..=5 => 2,
        6..=7 => 3,
        8..=9 => 4,
        _ => 5,
    }
}

/// The eighteen character skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Strength,
    Dexterity,
    Endurance,
    Reaction,
    Technique,
    Adaptation,
    Logic,
    Attention,
    Erudition,
    Culture,
    Science,
    Medicine,
    Suggestion,
    Insight,
    Authority,
    SelfControl,
    Religion,
    Flow,
}

impl Skill {
    pub const COUNT: usize = 18;

    pub const ALL: [Skill; Skill::COUNT] = [
        Skill::Strength,
        Skill::Dexterity,
        Skill::Endurance,
        Skill::Reaction,
        Skill::Technique,
        Skill::Adaptation,
        Skill::Logic,
        Skill::Attention,
        Skill::Erudition,
        Skill::Culture,
        Skill::Science,
        Skill::Medicine,
        Skill::Suggestion,
        Skill::Insight,
        Skill::Authority,
        Skill::SelfControl,
        Skill::Religion,
        Skill::Flow,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Canonical display name, as used in formulas (`Mod.SelfControl`).
    pub fn name(self) -> &'static str {
        match self {
            Skill::Strength => "Strength",
            Skill::Dexterity => "Dexterity",
            Skill::Endurance => "Endurance",
            Skill::Reaction => "Reaction",
            Skill::Technique => "Technique",
            Skill::Adaptation => "Adaptation",
            Skill::Logic => "Logic",
            Skill::Attention => "Attention",
            Skill::Erudition => "Erudition",
            Skill::Culture => "Culture",
            Skill::Science => "Science",
            Skill::Medicine => "Medicine",
            Skill::Suggestion => "Suggestion",
            Skill::Insight => "Insight",
            Skill::Authority => "Authority",
            Skill::SelfControl => "SelfControl",
            Skill::Religion => "Religion",
            Skill::Flow => "Flow",
        }
    }

    /// Russian full name and the short form used on item cards.
    fn localized(self) -> (&'static str, &'static str) {
        match self {
            Skill::Strength => ("сила", "сил"),
            Skill::Dexterity => ("ловкость", "лов"),
            Skill::Endurance => ("выносливость", "вын"),
            Skill::Reaction => ("реакция", "реак"),
            Skill::Technique => ("техника", "тех"),
            Skill::Adaptation => ("адаптация", "адапт"),
            Skill::Logic => ("логика", "лог"),
            Skill::Attention => ("внимание", "вни"),
            Skill::Erudition => ("эрудиция", "эруд"),
            Skill::Culture => ("культура", "культ"),
            Skill::Science => ("наука", "наук"),
            Skill::Medicine => ("медицина", "мед"),
            Skill::Suggestion => ("внушение", "вну"),
            Skill::Insight => ("проницательность", "прон"),
            Skill::Authority => ("авторитет", "авт"),
            Skill::SelfControl => ("самообладание", "сам"),
            Skill::Religion => ("религия", "рел"),
            Skill::Flow => ("поток", "пот"),
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Skill {
    type Err = DomainError;

    /// Accepts `Endurance`, `endurance`, `skill_endurance`, `self_control`,
    /// `SelfControl`, and the Russian names or abbreviations (`Вын`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let key = lowered.strip_prefix("skill_").unwrap_or(&lowered);
        let compact: String = key.chars().filter(|c| *c != '_').collect();

        Skill::ALL
            .into_iter()
            .find(|skill| {
                let (full, short) = skill.localized();
                skill.name().to_lowercase() == compact || full == key || short == key
            })
            .ok_or_else(|| DomainError::InvalidSkill(s.to_string()))
    }
}

/// The eighteen raw skill scores of one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillScores {
    values: [u8; Skill::COUNT],
}

impl SkillScores {
    /// All skills at the minimum score.
    pub fn baseline() -> Self {
        Self {
            values: [MIN_SKILL; Skill::COUNT],
        }
    }

    /// Build from explicit scores, rejecting anything outside `1..=10`.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (Skill, u8)>,
    ) -> Result<Self, DomainError> {
        let mut scores = Self::baseline();
        for (skill, value) in pairs {
            if !(MIN_SKILL..=MAX_SKILL).contains(&value) {
                return Err(DomainError::validation(format!(
                    "{skill} must be between {MIN_SKILL} and {MAX_SKILL}, got {value}"
                )));
            }
            scores.values[skill.index()] = value;
        }
        Ok(scores)
    }

    pub fn get(&self, skill: Skill) -> u8 {
        self.values[skill.index()]
    }

    /// Raise a skill, enforcing the cap. Leaves the score untouched on error.
    pub fn raise(&mut self, skill: Skill, points: u8) -> Result<u8, DomainError> {
        let next = u32::from(self.get(skill)) + u32::from(points);
        if next > u32::from(MAX_SKILL) {
            return Err(DomainError::SkillCapExceeded {
                skill,
                value: next,
            });
        }
        // next <= 10 so the narrowing is lossless
        self.values[skill.index()] = next as u8;
        Ok(self.values[skill.index()])
    }

    pub fn modifier(&self, skill: Skill) -> i32 {
        skill_modifier(self.get(skill))
    }

    /// Modifier for every skill, recomputed from the current scores.
    pub fn modifiers(&self) -> HashMap<Skill, i32> {
        Skill::ALL
            .into_iter()
            .map(|skill| (skill, self.modifier(skill)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, u8)> + '_ {
        Skill::ALL.into_iter().map(|skill| (skill, self.get(skill)))
    }
}

impl Default for SkillScores {
    fn default() -> Self {
        Self::baseline()
    }
}
