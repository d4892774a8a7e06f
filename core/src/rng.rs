//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through a RandomSource. Production runs derive
//! one SubsystemRng per stream slot from a single master seed:
//!   - Customer arrivals, customer reactions and random events each
//!     draw from their own stream.
//!   - Changing how often one stream is sampled never shifts the others.
//!
//! Tests substitute FixedRng or ScriptedRng to pin individual draws.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A source of uniform samples in [0.0, 1.0).
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Roll an integer in [lo, hi], both ends inclusive.
    fn int_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(hi >= lo, "empty range {lo}..={hi}");
        let span = (hi - lo + 1) as f64;
        lo + ((self.next_f64() * span).floor() as i64).min(hi - lo)
    }

    /// Roll an index in [0, n).
    fn index_below(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        ((self.next_f64() * n as f64).floor() as usize).min(n - 1)
    }
}

/// A named, deterministic RNG for a single stream.
pub struct SubsystemRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl SubsystemRng {
    /// Create a stream RNG from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for SubsystemRng {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Always returns the same sample.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng(f64);

impl FixedRng {
    pub fn new(value: f64) -> Self {
        assert!((0.0..1.0).contains(&value), "sample {value} outside [0, 1)");
        Self(value)
    }
}

impl RandomSource for FixedRng {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of samples.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted rng needs at least one sample");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted samples must lie in [0, 1)"
        );
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Derives stream RNGs for a single run from its master seed.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_slot(&self, slot: StreamSlot) -> SubsystemRng {
        SubsystemRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries. Only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    Spawn = 0,
    Customer = 1,
    Events = 2,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spawn => "spawn",
            Self::Customer => "customer",
            Self::Events => "events",
        }
    }
}

/// The three random streams the engine draws from.
pub struct RngStreams {
    /// Per-tick arrival rolls.
    pub spawn: Box<dyn RandomSource>,
    /// Item choice, quantity and reaction rolls.
    pub customer: Box<dyn RandomSource>,
    /// Random event band and amount rolls.
    pub events: Box<dyn RandomSource>,
}

impl RngStreams {
    pub fn from_seed(master_seed: u64) -> Self {
        let bank = RngBank::new(master_seed);
        Self {
            spawn: Box::new(bank.for_slot(StreamSlot::Spawn)),
            customer: Box::new(bank.for_slot(StreamSlot::Customer)),
            events: Box::new(bank.for_slot(StreamSlot::Events)),
        }
    }

    /// Every stream returns the same sample forever.
    pub fn fixed(value: f64) -> Self {
        Self {
            spawn: Box::new(FixedRng::new(value)),
            customer: Box::new(FixedRng::new(value)),
            events: Box::new(FixedRng::new(value)),
        }
    }
}
