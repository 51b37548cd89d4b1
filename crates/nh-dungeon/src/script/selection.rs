//! Coordinate sets for scripts (`selection.*` in level files)

use nh_rng::GameRng;

/// An ordered set of script coordinates. Points are kept sorted column
/// first, then row, so sampling by index is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    points: Vec<(i32, i32)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every point of the inclusive rectangle `(x1, y1)..=(x2, y2)`.
    pub fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::from_points((x1..=x2).flat_map(|x| (y1..=y2).map(move |y| (x, y))))
    }

    pub fn from_points(points: impl IntoIterator<Item = (i32, i32)>) -> Self {
        let mut points: Vec<(i32, i32)> = points.into_iter().collect();
        points.sort_unstable();
        points.dedup();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.points.binary_search(&(x, y)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.points.iter().copied()
    }

    pub fn set(&mut self, x: i32, y: i32) {
        if let Err(at) = self.points.binary_search(&(x, y)) {
            self.points.insert(at, (x, y));
        }
    }

    pub fn union(mut self, other: &Selection) -> Self {
        for (x, y) in other.iter() {
            self.set(x, y);
        }
        self
    }

    pub fn without(mut self, x: i32, y: i32) -> Self {
        self.points.retain(|&p| p != (x, y));
        self
    }

    /// One point picked by a single `rn2(len)` draw, taken out of the set
    /// when `remove` is true. An empty set makes no draw.
    pub fn rndcoord(&mut self, rng: &mut GameRng, remove: bool) -> Option<(i32, i32)> {
        if self.points.is_empty() {
            return None;
        }
        let idx = rng.rn2(self.points.len() as i32) as usize;
        if remove {
            Some(self.points.remove(idx))
        } else {
            Some(self.points[idx])
        }
    }
}
