//! Cyclic wheel positions.

use rand::{Rng, RngExt};

use super::{Axis, Catalog, Selection};
use crate::common::Result;

/// Current index of each of the three wheels.
///
/// Indices are kept reduced modulo the option count of their axis, so
/// stepping past either end wraps around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wheels {
    indices: [usize; 3],
}

impl Wheels {
    /// All wheels at their first option.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw indices in wheel order.
    #[inline]
    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Index of one wheel.
    #[inline]
    pub fn index(&self, axis: Axis) -> usize {
        self.indices[axis.position()]
    }

    /// Move a wheel to `index`, wrapping it into range.
    pub fn set(&mut self, catalog: &Catalog, axis: Axis, index: usize) {
        let len = catalog.options(axis).len();
        self.indices[axis.position()] = if len == 0 { 0 } else { index % len };
    }

    /// Move a wheel one option back.
    pub fn step_up(&mut self, catalog: &Catalog, axis: Axis) {
        let len = catalog.options(axis).len();
        if len == 0 {
            return;
        }
        let current = self.index(axis) % len;
        self.indices[axis.position()] = (current + len - 1) % len;
    }

    /// Move a wheel one option forward.
    pub fn step_down(&mut self, catalog: &Catalog, axis: Axis) {
        let len = catalog.options(axis).len();
        if len == 0 {
            return;
        }
        self.indices[axis.position()] = (self.index(axis) + 1) % len;
    }

    /// Put every wheel back on its first option.
    #[inline]
    pub fn reset(&mut self) {
        self.indices = [0; 3];
    }

    /// Land every wheel on a uniformly drawn option.
    ///
    /// Wheels over an empty axis stay at 0.
    pub fn spin<R: Rng + ?Sized>(&mut self, catalog: &Catalog, rng: &mut R) {
        for axis in Axis::ALL {
            let len = catalog.options(axis).len();
            self.indices[axis.position()] = if len == 0 { 0 } else { rng.random_range(0..len) };
        }
    }

    /// The triple the wheels currently show.
    pub fn selection<'c>(&self, catalog: &'c Catalog) -> Result<Selection<'c>> {
        catalog.resolve(self.indices)
    }
}
