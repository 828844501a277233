//! Environmental inputs threaded into the engines instead of read from globals.
//!
//! Scoring depends on the calendar (property age, the winter urgency bonus) and
//! the valuation models draw random stand-ins for data the system does not yet
//! source. Passing a [`FixedClock`] and a [`SeededRandom`] makes every result
//! reproducible.

use std::sync::Mutex;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midnight on the given date.
    pub fn on(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::default()))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Random draws used by the valuation stand-ins and the demo lead generator.
///
/// Takes `&self` so one source can be shared behind an `Arc` across engines.
pub trait RandomSource: Send + Sync {
    /// Uniform integer in `low..=high`. Returns `low` when the range is empty.
    fn int_in(&self, low: i64, high: i64) -> i64;

    /// Uniform float in `low..high`. Returns `low` when the range is empty.
    fn float_in(&self, low: f64, high: f64) -> f64;

    /// Uniform index into a collection of `len` items; `len` must be non-zero.
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.int_in(0, len as i64 - 1) as usize
    }

    /// True with probability `probability`.
    fn chance(&self, probability: f64) -> bool {
        self.float_in(0.0, 1.0) < probability
    }

    /// Index drawn proportionally to `weights`. All-zero weights pick the first entry.
    fn weighted(&self, weights: &[u32]) -> usize {
        let total: u64 = weights.iter().map(|weight| u64::from(*weight)).sum();
        if total == 0 {
            return 0;
        }
        let mut roll = self.int_in(0, total as i64 - 1) as u64;
        for (index, weight) in weights.iter().enumerate() {
            let weight = u64::from(*weight);
            if roll < weight {
                return index;
            }
            roll -= weight;
        }
        weights.len() - 1
    }
}

/// OS-seeded generator; results differ between calls and processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn int_in(&self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }

    fn float_in(&self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        rand::thread_rng().gen_range(low..high)
    }
}

/// Deterministic generator; the same seed replays the same sequence.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, draw: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut guard = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        draw(&mut *guard)
    }
}

impl RandomSource for SeededRandom {
    fn int_in(&self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.with_rng(|rng| rng.gen_range(low..=high))
    }

    fn float_in(&self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.with_rng(|rng| rng.gen_range(low..high))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn seeded_sources_replay_the_same_sequence() {
        let first = SeededRandom::new(7);
        let second = SeededRandom::new(7);

        let a: Vec<i64> = (0..16).map(|_| first.int_in(75, 95)).collect();
        let b: Vec<i64> = (0..16).map(|_| second.int_in(75, 95)).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|value| (75..=95).contains(value)));
    }

    #[test]
    fn empty_ranges_collapse_to_lower_bound() {
        let random = SeededRandom::new(1);
        assert_eq!(random.int_in(5, 5), 5);
        assert_eq!(random.int_in(9, 3), 9);
        assert_eq!(random.float_in(2.5, 2.5), 2.5);
        assert_eq!(random.pick(1), 0);
    }

    #[test]
    fn weighted_draws_skip_zero_weights() {
        let random = SeededRandom::new(99);
        for _ in 0..64 {
            let index = random.weighted(&[0, 3, 0, 1]);
            assert!(index == 1 || index == 3, "drew zero-weight slot {index}");
        }
        assert_eq!(random.weighted(&[0, 0]), 0);
    }

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date");
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.today().month(), 1);
    }
}
