//! Injectable randomness for the problem generators.
//!
//! Generators never touch a global RNG; they draw through a [`Sampler`]. The
//! default is [`RngSampler`] over the thread RNG, and tests use
//! [`ScriptedSampler`] to pin every choice.

use std::collections::VecDeque;

use rand::Rng;

/// Source of uniform choices for problem generation.
pub trait Sampler {
    /// Uniform index in `0..len`. `len` is always non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform integer in `min..=max`.
    fn int_inclusive(&mut self, min: i64, max: i64) -> i64;

    /// Fair coin flip.
    fn chance(&mut self) -> bool {
        self.index(2) == 1
    }

    /// Uniform float in `[0, 1)`, drawn in thousandths.
    #[allow(clippy::cast_precision_loss)]
    fn unit(&mut self) -> f64 {
        self.index(1000) as f64 / 1000.0
    }
}

impl dyn Sampler + '_ {
    /// Pick one element uniformly. Pools are compile-time constants and never empty.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.index(items.len())]
    }
}

//
// ─── RNG BACKED ────────────────────────────────────────────────────────────────
//

/// [`Sampler`] over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSampler<R> {
    rng: R,
}

impl RngSampler<rand::rngs::ThreadRng> {
    /// Sampler over the thread-local RNG.
    #[must_use]
    pub fn thread() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> RngSampler<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Sampler for RngSampler<R> {
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }

    fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

//
// ─── SCRIPTED ──────────────────────────────────────────────────────────────────
//

/// Deterministic [`Sampler`] that replays a fixed list of draws.
///
/// Each draw consumes the next value `v`: `index(len)` yields `v % len` and
/// `int_inclusive(min, max)` yields `min + v % (max - min + 1)`. Once the script
/// runs out every draw yields `0` (or `min`).
#[derive(Debug, Clone, Default)]
pub struct ScriptedSampler {
    script: VecDeque<u64>,
}

impl ScriptedSampler {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Draws left before the sampler starts returning zero.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next(&mut self) -> u64 {
        self.script.pop_front().unwrap_or(0)
    }
}

impl Sampler for ScriptedSampler {
    #[allow(clippy::cast_possible_truncation)]
    fn index(&mut self, len: usize) -> usize {
        let value = self.next();
        if len == 0 {
            return 0;
        }
        (value % len as u64) as usize
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn int_inclusive(&mut self, min: i64, max: i64) -> i64 {
        let value = self.next();
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as u64;
        min + (value % span) as i64
    }
}
