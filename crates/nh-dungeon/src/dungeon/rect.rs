//! Inclusive grid rectangles (rect.c)

use serde::{Deserialize, Serialize};

use crate::{COLNO, ROWNO};

/// Inclusive rectangle of grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub lx: usize,
    pub ly: usize,
    pub hx: usize,
    pub hy: usize,
}

impl Rect {
    pub const fn new(lx: usize, ly: usize, hx: usize, hy: usize) -> Self {
        Self { lx, ly, hx, hy }
    }

    /// The whole map.
    pub const fn map() -> Self {
        Self::new(0, 0, COLNO - 1, ROWNO - 1)
    }

    pub fn width(&self) -> usize {
        self.hx + 1 - self.lx
    }

    pub fn height(&self) -> usize {
        self.hy + 1 - self.ly
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.lx && x <= self.hx && y >= self.ly && y <= self.hy
    }

    /// Check if this rectangle lies entirely inside another
    pub fn is_inside(&self, other: &Rect) -> bool {
        other.lx <= self.lx && other.hx >= self.hx && other.ly <= self.ly && other.hy >= self.hy
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.hx < other.lx || self.lx > other.hx || self.hy < other.ly || self.ly > other.hy)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rect {
            lx: self.lx.max(other.lx),
            ly: self.ly.max(other.ly),
            hx: self.hx.min(other.hx),
            hy: self.hy.min(other.hy),
        })
    }

    /// Grow by `n` on every side, clamped at zero.
    pub fn expanded(&self, n: usize) -> Rect {
        Rect {
            lx: self.lx.saturating_sub(n),
            ly: self.ly.saturating_sub(n),
            hx: self.hx + n,
            hy: self.hy + n,
        }
    }

    /// Cells in x-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.lx..=self.hx).flat_map(move |x| (self.ly..=self.hy).map(move |y| (x, y)))
    }
}
