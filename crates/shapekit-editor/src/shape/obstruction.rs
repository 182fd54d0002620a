//! Per-edge sound obstruction flags.

use serde::{Deserialize, Serialize};

/// Which faces of an area block sound.
///
/// `sides[i]` belongs to the edge starting at point `i` (`i -> i + 1`); for a
/// closed shape the last side is the closing edge. `sides` always has one
/// entry per point. The engine receives the flattened form
/// `[sides..., roof, floor]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoundObstruction {
    pub sides: Vec<bool>,
    pub roof: bool,
    pub floor: bool,
}

impl SoundObstruction {
    /// All faces open, with one side per point.
    pub fn with_sides(count: usize) -> Self {
        Self {
            sides: vec![false; count],
            ..Default::default()
        }
    }

    pub fn side(&self, index: usize) -> Option<bool> {
        self.sides.get(index).copied()
    }

    pub fn set_side(&mut self, index: usize, obstructs: bool) -> bool {
        match self.sides.get_mut(index) {
            Some(side) => {
                *side = obstructs;
                true
            }
            None => false,
        }
    }

    pub(crate) fn insert_side(&mut self, index: usize) {
        let index = index.min(self.sides.len());
        self.sides.insert(index, false);
    }

    pub(crate) fn remove_side(&mut self, index: usize) {
        if index < self.sides.len() {
            self.sides.remove(index);
        }
    }

    pub(crate) fn clear_sides(&mut self) {
        self.sides.clear();
    }

    /// Reorders sides after the point list was reversed.
    ///
    /// An open shape has `n - 1` real edges followed by one unused slot; the
    /// real edges swap order and the unused slot stays last. On a closed
    /// shape every side is a real edge.
    pub(crate) fn reverse(&mut self, closed: bool) {
        let n = self.sides.len();
        if closed || n < 2 {
            self.sides.reverse();
        } else {
            self.sides[..n - 1].reverse();
        }
    }

    /// `[sides..., roof, floor]`, the layout engine area components expect.
    pub fn flattened(&self) -> Vec<bool> {
        let mut flat = Vec::with_capacity(self.sides.len() + 2);
        flat.extend_from_slice(&self.sides);
        flat.push(self.roof);
        flat.push(self.floor);
        flat
    }
}
