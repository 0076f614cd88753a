//! Counter used to synthesize unique environment names.
//!
//! A sequence is seeded once and then handed out with an atomic
//! fetch-and-increment, so names drawn from the same sequence never repeat
//! within a process, even when drawn from many threads at once.
//!
//! The randomized seed keeps tests from depending on a fixed environment
//! name. It only lowers the chance of two processes picking the same name;
//! it does not rule it out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::id::Id;

/// Upper bound (exclusive) of a randomly chosen seed
pub const SEED_RANGE: u64 = 1_000_000;

/// Prefix of every synthesized environment name
pub const ENVIRONMENT_PREFIX: &str = "test";

static SHARED: OnceLock<Arc<IdSequence>> = OnceLock::new();

#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    /// Create a sequence seeded with a pseudo-random value in `[0, SEED_RANGE)`
    pub fn random() -> Self {
        // v4 uuids are backed by the OS rng, which is all the randomness we need here.
        let seed = (Id::new().as_u128() % SEED_RANGE as u128) as u64;
        Self::starting_at(seed)
    }

    /// Create a sequence whose first value is `seed`
    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed),
        }
    }

    /// The process-wide sequence used when none is injected.
    pub fn shared() -> Arc<IdSequence> {
        SHARED
            .get_or_init(|| {
                let sequence = IdSequence::random();
                tracing::debug!(seed = sequence.peek(), "Seeded shared id sequence");
                Arc::new(sequence)
            })
            .clone()
    }

    /// Return the current value and advance the sequence.
    pub fn next(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Value the next call to [`IdSequence::next`] would return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Synthesize a fresh environment name, `test<N>`.
    pub fn next_environment(&self) -> String {
        format!("{}{}", ENVIRONMENT_PREFIX, self.next())
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::random()
    }
}

#[cfg(test)]
#[path = "sequence.test.rs"]
mod tests;
