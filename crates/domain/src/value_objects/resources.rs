//! Clamp-and-apply rules for the four depletable pools.
//!
//! Each function is pure: it takes the current value plus a delta or target
//! and returns the new value. The [`crate::Character`] aggregate calls these
//! and never writes a pool directly.

use serde::{Deserialize, Serialize};

/// Exhaustion accumulates from 0 to this value.
pub const MAX_EXHAUSTION: i32 = 6;

/// Hard ceiling for a composure (PU) target before trigger evaluation.
pub const PU_TARGET_CAP: i32 = 10;

/// Ceiling for the recomputed base PU. Not the same limit as [`PU_TARGET_CAP`].
pub const BASE_PU_CAP: i32 = 8;

/// `clamp(current + delta, 0, max)`
pub fn apply_hp(current: i32, max: i32, delta: i32) -> i32 {
    current.saturating_add(delta).clamp(0, max.max(0))
}

/// `max(0, current + delta)`
pub fn apply_stamina(current: i32, delta: i32) -> i32 {
    current.saturating_add(delta).max(0)
}

/// `clamp(current + delta, 0, 6)`
pub fn apply_exhaustion(current: i32, delta: i32) -> i32 {
    current.saturating_add(delta).clamp(0, MAX_EXHAUSTION)
}

/// Base PU for a given self-control modifier.
pub fn base_pu_for(self_control_modifier: i32) -> i32 {
    self_control_modifier.min(BASE_PU_CAP)
}

/// Outcome of the skill or social check that accompanied a PU change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckResult {
    Success,
    Failure,
}

/// Which emotion table an extreme composure swing draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionKind {
    Negative,
    Positive,
}

/// New composure value plus the emotion kind it triggered, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuOutcome {
    pub current: i32,
    pub trigger: Option<EmotionKind>,
    /// Whether the written value differs from the value before the call
    pub changed: bool,
}

/// Set composure to `target`, resetting to `base` on an extreme swing.
///
/// Order matters: the target is clamped to `0..=10` first, the trigger
/// condition is evaluated on the clamped value, and only then is either
/// `base` (trigger) or the clamped target (no trigger) written.
///
/// - clamped ≤ 0 with a failed check → reset, [`EmotionKind::Negative`]
/// - clamped ≥ 10 with a successful check → reset, [`EmotionKind::Positive`]
pub fn apply_pu(current: i32, base: i32, target: i32, check: Option<CheckResult>) -> PuOutcome {
    let clamped = target.clamp(0, PU_TARGET_CAP);

    let trigger = match check {
        Some(CheckResult::Failure) if clamped <= 0 => Some(EmotionKind::Negative),
        Some(CheckResult::Success) if clamped >= PU_TARGET_CAP => Some(EmotionKind::Positive),
        _ => None,
    };

    let next = if trigger.is_some() { base } else { clamped };
    PuOutcome {
        current: next,
        trigger,
        changed: next != current,
    }
}

/// Restore composure by `gain`, never above `base`.
pub fn restore_pu(current: i32, base: i32, gain: i32) -> i32 {
    base.min(current.saturating_add(gain))
}
