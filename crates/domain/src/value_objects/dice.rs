//! Dice formula parsing and evaluation
//!
//! Supports formulas like "2d10+Mod.Endurance", "1к8+Мод.Мед", "2d6-1", "d20".
//! A formula is one or more terms joined by `+` or `-`; a term is a die roll
//! (`XdY`, with `d` or `к` as the die marker), a skill modifier reference
//! (`Mod.<Skill>`) or an integer literal. Parsing is case-insensitive and
//! ignores whitespace.
//!
//! Evaluation never touches character state directly: modifiers come from a
//! [`ModifierContext`] and every die draw comes from an injected closure
//! `FnMut(min, max) -> i32` returning an inclusive uniform integer.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::skill::{Skill, SkillScores};

/// Upper bound on dice in a single term.
pub const MAX_DICE_PER_TERM: u32 = 100;
/// Upper bound on die size.
pub const MAX_DIE_SIZE: u32 = 1000;

const DIE_MARKERS: [char; 2] = ['d', 'к'];
const MODIFIER_PREFIXES: [&str; 2] = ["mod.", "мод."];

/// Error when parsing or evaluating a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Unbalanced operators or an unknown token
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// `Mod.<name>` where name is not one of the eighteen skills
    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),
    /// The roll context has no value for a referenced skill
    #[error("Modifier {0} is missing from the roll context")]
    MissingModifier(Skill),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be in range
    #[error("Die size must be between 1 and {max}", max = MAX_DIE_SIZE)]
    InvalidDieSize,
    #[error("Too many dice in one term: {0} (max {max})", max = MAX_DICE_PER_TERM)]
    TooManyDice(u32),
    /// Literal or running total overflow
    #[error("Value overflow")]
    Overflow,
}

/// Sign a term contributes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn apply(self, value: i32) -> i32 {
        match self {
            Sign::Plus => value,
            Sign::Minus => -value,
        }
    }

    fn symbol(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// One term of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiceTerm {
    /// Roll `count` independent dice with `sides` faces and sum them
    Dice { count: u32, sides: u32 },
    /// The current modifier of a skill
    Modifier(Skill),
    /// A flat integer
    Flat(i32),
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiceTerm::Dice { count, sides } => write!(f, "{count}d{sides}"),
            DiceTerm::Modifier(skill) => write!(f, "Mod.{skill}"),
            DiceTerm::Flat(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTerm {
    pub sign: Sign,
    pub term: DiceTerm,
}

/// Skill modifiers available to a roll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierContext {
    values: HashMap<Skill, i32>,
}

impl ModifierContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every skill modifier, recomputed from raw scores.
    pub fn from_scores(scores: &SkillScores) -> Self {
        Self {
            values: scores.modifiers(),
        }
    }

    pub fn with(mut self, skill: Skill, value: i32) -> Self {
        self.values.insert(skill, value);
        self
    }

    pub fn get(&self, skill: Skill) -> Option<i32> {
        self.values.get(&skill).copied()
    }
}

impl From<HashMap<Skill, i32>> for ModifierContext {
    fn from(values: HashMap<Skill, i32>) -> Self {
        Self { values }
    }
}

/// A parsed, immutable dice formula like "2d6+Mod.Strength-1"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    source: String,
    terms: Vec<SignedTerm>,
}

impl DiceFormula {
    /// Parse a formula string.
    ///
    /// Supported terms:
    /// - "XdY" / "XкY" - Roll X dice of size Y
    /// - "dY" - Roll 1 die of size Y (shorthand)
    /// - "Mod.Skill" / "Мод.Скр" - Skill modifier from the roll context
    /// - "Z" - Flat integer
    pub fn parse(input: &str) -> Result<Self, FormulaError> {
        let normalized: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if normalized.is_empty() {
            return Err(FormulaError::Empty);
        }

        let mut terms = Vec::new();
        let mut sign = Sign::Plus;
        let mut token = String::new();

        for (position, ch) in normalized.chars().enumerate() {
            let next_sign = match ch {
                '+' => Sign::Plus,
                '-' => Sign::Minus,
                _ => {
                    token.push(ch);
                    continue;
                }
            };

            if token.is_empty() {
                // Only the very first term may carry a leading sign
                if position == 0 {
                    sign = next_sign;
                    continue;
                }
                return Err(FormulaError::InvalidFormat(format!(
                    "Missing term before '{ch}' in '{input}'"
                )));
            }

            terms.push(SignedTerm {
                sign,
                term: parse_term(&token)?,
            });
            token.clear();
            sign = next_sign;
        }

        if token.is_empty() {
            return Err(FormulaError::InvalidFormat(format!(
                "Formula ends with an operator: '{input}'"
            )));
        }
        terms.push(SignedTerm {
            sign,
            term: parse_term(&token)?,
        });

        Ok(Self {
            source: input.trim().to_string(),
            terms,
        })
    }

    /// Build a formula from already-validated terms.
    ///
    /// The source text is the canonical rendering of the terms.
    pub fn from_terms(terms: Vec<SignedTerm>) -> Self {
        let mut formula = Self {
            source: String::new(),
            terms,
        };
        formula.source = formula.to_string();
        formula
    }

    /// The text this formula was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn terms(&self) -> &[SignedTerm] {
        &self.terms
    }

    /// Evaluate left to right, summing each term with its sign.
    ///
    /// `rng(min, max)` must return a uniform integer in `min..=max`. All
    /// modifier references are checked against the context before any die
    /// is drawn.
    pub fn roll<R>(&self, context: &ModifierContext, rng: &mut R) -> Result<DiceRollResult, FormulaError>
    where
        R: FnMut(i32, i32) -> i32,
    {
        for signed in &self.terms {
            if let DiceTerm::Modifier(skill) = signed.term {
                context
                    .get(skill)
                    .ok_or(FormulaError::MissingModifier(skill))?;
            }
        }

        let mut parts = Vec::with_capacity(self.terms.len());
        let mut total: i32 = 0;

        for SignedTerm { sign, term } in &self.terms {
            let part = match *term {
                DiceTerm::Dice { count, sides } => {
                    // sides <= MAX_DIE_SIZE, so the cast is lossless
                    let rolls: Vec<i32> = (0..count).map(|_| rng(1, sides as i32)).collect();
                    let value = rolls
                        .iter()
                        .try_fold(0i32, |acc, r| acc.checked_add(*r))
                        .ok_or(FormulaError::Overflow)?;
                    RollPart {
                        sign: *sign,
                        detail: PartDetail::Dice {
                            count,
                            sides,
                            rolls,
                        },
                        value,
                    }
                }
                DiceTerm::Modifier(skill) => RollPart {
                    sign: *sign,
                    detail: PartDetail::Modifier { skill },
                    value: context
                        .get(skill)
                        .ok_or(FormulaError::MissingModifier(skill))?,
                },
                DiceTerm::Flat(value) => RollPart {
                    sign: *sign,
                    detail: PartDetail::Flat,
                    value,
                },
            };

            total = total
                .checked_add(sign.apply(part.value))
                .ok_or(FormulaError::Overflow)?;
            parts.push(part);
        }

        Ok(DiceRollResult {
            formula: self.to_string(),
            parts,
            total,
        })
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, SignedTerm { sign, term }) in self.terms.iter().enumerate() {
            if index > 0 || *sign == Sign::Minus {
                write!(f, "{}", sign.symbol())?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

fn parse_term(token: &str) -> Result<DiceTerm, FormulaError> {
    if let Some(name) = MODIFIER_PREFIXES
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
    {
        return name
            .parse::<Skill>()
            .map(DiceTerm::Modifier)
            .map_err(|_| FormulaError::UnknownModifier(name.to_string()));
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        return token
            .parse::<i32>()
            .map(DiceTerm::Flat)
            .map_err(|_| FormulaError::Overflow);
    }

    let Some((marker_pos, marker)) = token.char_indices().find(|(_, c)| DIE_MARKERS.contains(c))
    else {
        return Err(FormulaError::InvalidFormat(format!("Unknown token '{token}'")));
    };

    let count_str = &token[..marker_pos];
    let sides_str = &token[marker_pos + marker.len_utf8()..];

    let count = if count_str.is_empty() {
        1 // "d20" means "1d20"
    } else {
        parse_number(count_str, "dice count")?
    };
    if count == 0 {
        return Err(FormulaError::InvalidDiceCount);
    }
    if count > MAX_DICE_PER_TERM {
        return Err(FormulaError::TooManyDice(count));
    }

    if sides_str.is_empty() {
        return Err(FormulaError::InvalidFormat(format!(
            "Missing die size in '{token}'"
        )));
    }
    let sides = parse_number(sides_str, "die size")?;
    if sides == 0 || sides > MAX_DIE_SIZE {
        return Err(FormulaError::InvalidDieSize);
    }

    Ok(DiceTerm::Dice { count, sides })
}

fn parse_number(text: &str, what: &str) -> Result<u32, FormulaError> {
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormulaError::InvalidFormat(format!(
            "Invalid {what}: '{text}'"
        )));
    }
    text.parse::<u32>()
        .map_err(|_| FormulaError::InvalidFormat(format!("Invalid {what}: '{text}'")))
}

/// What a single evaluated term contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartDetail {
    Dice {
        count: u32,
        sides: u32,
        rolls: Vec<i32>,
    },
    Modifier {
        skill: Skill,
    },
    Flat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollPart {
    pub sign: Sign,
    pub detail: PartDetail,
    /// Unsigned contribution of the term
    pub value: i32,
}

impl RollPart {
    fn label(&self) -> String {
        match &self.detail {
            PartDetail::Dice {
                count,
                sides,
                rolls,
            } if rolls.len() == 1 => format!("{count}d{sides}({})", rolls[0]),
            PartDetail::Dice {
                count,
                sides,
                rolls,
            } => {
                let rolls_str: Vec<String> = rolls.iter().map(|r| r.to_string()).collect();
                format!("{count}d{sides}[{}]", rolls_str.join(", "))
            }
            PartDetail::Modifier { skill } => format!("Mod.{skill}({})", self.value),
            PartDetail::Flat => self.value.to_string(),
        }
    }
}

/// Result of rolling a formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// Canonical text of the formula that was rolled
    pub formula: String,
    /// Every term in evaluation order
    pub parts: Vec<RollPart>,
    pub total: i32,
}

impl DiceRollResult {
    /// Every individual die result, in roll order.
    pub fn individual_rolls(&self) -> Vec<i32> {
        self.parts
            .iter()
            .filter_map(|part| match &part.detail {
                PartDetail::Dice { rolls, .. } => Some(rolls.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Format as an audit string (e.g., "2d6[4, 5] + Mod.Strength(3) = 12")
    pub fn breakdown(&self) -> String {
        let mut out = String::new();
        for (index, part) in self.parts.iter().enumerate() {
            match (index, part.sign) {
                (0, Sign::Plus) => {}
                (0, Sign::Minus) => out.push('-'),
                (_, sign) => {
                    out.push(' ');
                    out.push(sign.symbol());
                    out.push(' ');
                }
            }
            out.push_str(&part.label());
        }
        format!("{out} = {}", self.total)
    }
}

/// Parse and roll in one step.
pub fn roll_formula<R>(
    formula: &str,
    context: &ModifierContext,
    rng: &mut R,
) -> Result<DiceRollResult, FormulaError>
where
    R: FnMut(i32, i32) -> i32,
{
    DiceFormula::parse(formula)?.roll(context, rng)
}
