//! Deterministic draw primitives for level generation.
//!
//! [`GameRng`] wraps the ISAAC64 engine with NetHack's `rn2`/`rnd`/`rn1`/`d`
//! helpers and an optional draw log. Every draw made while tracing is on
//! appends one [`RngTraceEntry`], which is what the parity tooling diffs
//! against a reference run.

pub mod isaac64;

use std::panic::Location;

use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use isaac64::Isaac64;

/// Errors raised by draw primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// A draw was requested with an empty or negative range.
    #[error("{func}({arg}) attempted: range must be positive")]
    InvalidDraw { func: &'static str, arg: String },
}

/// One logged draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngTraceEntry {
    /// Index of the raw engine word this draw consumed (0-based).
    pub seq: u64,
    /// Primitive name as the reference logs it ("rn2", "rnd", "d").
    pub func: String,
    /// Arguments, comma separated.
    pub args: String,
    pub result: i32,
    /// `file:line` of the caller.
    pub call_site: String,
}

impl RngTraceEntry {
    /// The part of an entry that must match across implementations.
    pub fn key(&self) -> (&str, &str, i32) {
        (&self.func, &self.args, self.result)
    }
}

/// Seeded sequencer owned by one generation session.
#[derive(Debug, Clone)]
pub struct GameRng {
    engine: Isaac64,
    seed: u64,
    tracing: bool,
    trace: Vec<RngTraceEntry>,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            engine: Isaac64::seed_from_u64(seed),
            seed,
            tracing: false,
            trace: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw `word % x`, the `RND()` of the reference.
    #[inline]
    fn raw(&mut self, x: i32) -> i32 {
        (self.engine.next_word() % x as u64) as i32
    }

    #[track_caller]
    fn log(&mut self, func: &'static str, args: String, result: i32) {
        if self.tracing {
            let at = Location::caller();
            self.trace.push(RngTraceEntry {
                seq: self.engine.consumed() - 1,
                func: func.to_string(),
                args,
                result,
                call_site: format!("{}:{}", at.file(), at.line()),
            });
        }
    }

    /// Uniform value in `[0, x)`.
    ///
    /// # Panics
    /// On `x <= 0`: a caller computed an empty range, which is a logic bug.
    #[track_caller]
    pub fn rn2(&mut self, x: i32) -> i32 {
        match self.try_rn2(x) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like [`GameRng::rn2`] but reports an invalid range instead of panicking.
    #[track_caller]
    pub fn try_rn2(&mut self, x: i32) -> Result<i32, RngError> {
        if x <= 0 {
            return Err(RngError::InvalidDraw {
                func: "rn2",
                arg: x.to_string(),
            });
        }
        let v = self.raw(x);
        self.log("rn2", x.to_string(), v);
        Ok(v)
    }

    /// Uniform value in `[1, x]`.
    #[track_caller]
    pub fn rnd(&mut self, x: i32) -> i32 {
        if x <= 0 {
            panic!(
                "{}",
                RngError::InvalidDraw {
                    func: "rnd",
                    arg: x.to_string()
                }
            );
        }
        let v = self.raw(x) + 1;
        self.log("rnd", x.to_string(), v);
        v
    }

    /// `y + rn2(x)`. Logged as the underlying `rn2` draw.
    #[track_caller]
    pub fn rn1(&mut self, x: i32, y: i32) -> i32 {
        self.rn2(x) + y
    }

    /// Roll `n` dice with `x` sides each.
    #[track_caller]
    pub fn d(&mut self, n: i32, x: i32) -> i32 {
        if n < 0 || x < 0 || (x == 0 && n != 0) {
            panic!(
                "{}",
                RngError::InvalidDraw {
                    func: "d",
                    arg: format!("{n},{x}")
                }
            );
        }
        let mut total = n;
        for _ in 0..n {
            total += self.raw(x);
        }
        if n > 0 {
            self.log("d", format!("{n},{x}"), total);
        }
        total
    }

    /// True with probability `1/n`.
    #[track_caller]
    pub fn one_in(&mut self, n: i32) -> bool {
        self.rn2(n) == 0
    }

    /// Fisher-Yates from the back: `j = rn2(i + 1)` for `i = len-1 .. 1`.
    #[track_caller]
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.rn2(i as i32 + 1) as usize;
            items.swap(i, j);
        }
    }

    /// Start a fresh draw log.
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Stop logging; entries recorded so far are kept.
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    pub fn is_tracing(&self) -> bool {
        self.tracing
    }

    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }

    /// Move the draw log out, leaving an empty one behind.
    pub fn take_trace(&mut self) -> Vec<RngTraceEntry> {
        std::mem::take(&mut self.trace)
    }

    /// Raw engine words consumed so far, logged or not.
    pub fn draw_count(&self) -> u64 {
        self.engine.consumed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let v = rng.rn2(10);
            assert!((0..10).contains(&v));
        }
    }

    #[test]
    fn test_rnd_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let v = rng.rnd(6);
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn test_d_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let v = rng.d(3, 6);
            assert!((3..=18).contains(&v));
        }
        assert_eq!(rng.d(0, 6), 0);
    }

    #[test]
    fn test_rn1_offsets_rn2() {
        let mut a = GameRng::new(5);
        let mut b = GameRng::new(5);
        for _ in 0..100 {
            assert_eq!(a.rn1(7, 3), b.rn2(7) + 3);
        }
    }

    #[test]
    fn test_rn2_matches_engine_modulo() {
        let mut rng = GameRng::new(42);
        let mut engine = Isaac64::new(42);
        for x in 1..200 {
            assert_eq!(rng.rn2(x) as u64, engine.next_word() % x as u64);
        }
    }

    #[test]
    fn test_try_rn2_rejects_empty_range() {
        let mut rng = GameRng::new(1);
        assert_eq!(
            rng.try_rn2(0),
            Err(RngError::InvalidDraw {
                func: "rn2",
                arg: "0".to_string()
            })
        );
        assert!(rng.try_rn2(-3).is_err());
        assert_eq!(rng.draw_count(), 0);
    }

    #[test]
    #[should_panic(expected = "rn2(0) attempted")]
    fn test_rn2_zero_panics() {
        GameRng::new(1).rn2(0);
    }

    #[test]
    #[should_panic(expected = "rnd(-1) attempted")]
    fn test_rnd_negative_panics() {
        GameRng::new(1).rnd(-1);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(99);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_draw_order() {
        let mut rng = GameRng::new(3);
        rng.enable_tracing();
        let mut items = ['a', 'b', 'c', 'd'];
        rng.shuffle(&mut items);
        let args: Vec<&str> = rng.trace().iter().map(|e| e.args.as_str()).collect();
        assert_eq!(args, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_tracing_does_not_change_stream() {
        let mut plain = GameRng::new(77);
        let mut traced = GameRng::new(77);
        traced.enable_tracing();
        for i in 1..50 {
            assert_eq!(plain.rn2(i), traced.rn2(i));
            assert_eq!(plain.rnd(i), traced.rnd(i));
            assert_eq!(plain.d(2, i), traced.d(2, i));
        }
    }

    #[test]
    fn test_trace_records_call_site() {
        let mut rng = GameRng::new(1);
        rng.enable_tracing();
        rng.rn2(5);
        let entry = &rng.trace()[0];
        assert!(entry.call_site.starts_with(file!()), "{}", entry.call_site);
        assert_eq!(entry.func, "rn2");
        assert_eq!(entry.args, "5");
    }

    #[test]
    fn test_rn1_logs_as_rn2() {
        let mut rng = GameRng::new(1);
        rng.enable_tracing();
        let v = rng.rn1(10, 4);
        let entry = &rng.trace()[0];
        assert_eq!(entry.func, "rn2");
        assert_eq!(entry.args, "10");
        assert_eq!(entry.result + 4, v);
    }

    #[test]
    fn test_d_logs_once() {
        let mut rng = GameRng::new(1);
        rng.enable_tracing();
        let v = rng.d(4, 6);
        assert_eq!(rng.trace().len(), 1);
        assert_eq!(rng.trace()[0].key(), ("d", "4,6", v));
        assert_eq!(rng.trace()[0].seq, 3);
        assert_eq!(rng.draw_count(), 4);
    }

    #[test]
    fn test_take_trace_empties_log() {
        let mut rng = GameRng::new(1);
        rng.enable_tracing();
        rng.rn2(3);
        rng.rn2(3);
        let taken = rng.take_trace();
        assert_eq!(taken.len(), 2);
        assert!(rng.trace().is_empty());
        assert!(rng.is_tracing());
    }
}
