//! Specialization branches and their levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Highest level a single branch can reach.
pub const MAX_BRANCH_LEVEL: u8 = 10;

/// The seven specialization tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Medic,
    Mutant,
    Sharpshooter,
    Scout,
    Technician,
    Fighter,
    Juggernaut,
}

impl Branch {
    pub const COUNT: usize = 7;

    pub const ALL: [Branch; Branch::COUNT] = [
        Branch::Medic,
        Branch::Mutant,
        Branch::Sharpshooter,
        Branch::Scout,
        Branch::Technician,
        Branch::Fighter,
        Branch::Juggernaut,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Branch::Medic => "medic",
            Branch::Mutant => "mutant",
            Branch::Sharpshooter => "sharpshooter",
            Branch::Scout => "scout",
            Branch::Technician => "technician",
            Branch::Fighter => "fighter",
            Branch::Juggernaut => "juggernaut",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Branch {
    type Err = DomainError;

    /// Accepts the bare key (`medic`) or the column form (`medic_branch_level`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let key = lowered.strip_suffix("_branch_level").unwrap_or(&lowered);
        Branch::ALL
            .into_iter()
            .find(|branch| branch.key() == key)
            .ok_or_else(|| DomainError::InvalidBranch(s.to_string()))
    }
}

/// Independent level per branch, each in `0..=10`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchLevels {
    levels: [u8; Branch::COUNT],
}

impl BranchLevels {
    pub fn get(&self, branch: Branch) -> u8 {
        self.levels[branch as usize]
    }

    /// Raise one branch by a single level.
    pub fn increment(&mut self, branch: Branch) -> Result<u8, DomainError> {
        self.raise(branch, 1)
    }

    pub(crate) fn raise(&mut self, branch: Branch, by: u8) -> Result<u8, DomainError> {
        let current = self.get(branch);
        if u32::from(current) + u32::from(by) > u32::from(MAX_BRANCH_LEVEL) {
            return Err(DomainError::BranchMaxed(branch));
        }
        self.levels[branch as usize] = current + by;
        Ok(current + by)
    }

    pub fn total(&self) -> u32 {
        self.levels.iter().map(|l| u32::from(*l)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Branch, u8)> + '_ {
        Branch::ALL.into_iter().map(|branch| (branch, self.get(branch)))
    }
}
