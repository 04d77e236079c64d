//! Random implementations.

use crate::infrastructure::ports::RandomPort;

/// System random - uses real randomness.
pub struct SystemRandom;

impl SystemRandom {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        use rand::Rng;
        if max <= min {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Adapt a port to the closure the domain rolls with.
pub fn dice_source(random: &dyn RandomPort) -> impl FnMut(i32, i32) -> i32 + '_ {
    move |min, max| random.gen_range(min, max)
}

/// Fixed random for testing.
#[cfg(test)]
pub struct FixedRandom(pub i32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, min: i32, max: i32) -> i32 {
        self.0.clamp(min, max)
    }
}

/// Replays a fixed sequence, then falls back to `min`.
#[cfg(test)]
pub struct ScriptedRandom {
    values: std::sync::Mutex<std::collections::VecDeque<i32>>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            values: std::sync::Mutex::new(values.into_iter().collect()),
        }
    }

    /// Values not drawn yet.
    pub fn remaining(&self) -> usize {
        self.values.lock().map(|values| values.len()).unwrap_or(0)
    }
}

#[cfg(test)]
impl RandomPort for ScriptedRandom {
    fn gen_range(&self, min: i32, _max: i32) -> i32 {
        self.values
            .lock()
            .ok()
            .and_then(|mut values| values.pop_front())
            .unwrap_or(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_bounds() {
        let random = SystemRandom::new();
        for _ in 0..200 {
            let roll = random.gen_range(1, 6);
            assert!((1..=6).contains(&roll));
        }
        assert_eq!(random.gen_range(4, 4), 4);
    }

    #[test]
    fn scripted_random_replays_then_falls_back() {
        let random = ScriptedRandom::new([5, 2]);
        let mut roll = dice_source(&random);
        assert_eq!(roll(1, 10), 5);
        assert_eq!(roll(1, 10), 2);
        assert_eq!(roll(1, 10), 1);
        assert_eq!(random.remaining(), 0);
    }
}
