// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor-wide options read by the selection core.
//!
//! The full option set is owned by the hosting editor; this core only
//! reads the subset that governs selection behaviour.

use serde::{Deserialize, Serialize};

/// How a box-selection combines with the existing selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoxSelectMode {
    /// Replace the current selection
    #[default]
    Replace,
    /// Add to the current selection (Shift+Drag)
    Additive,
}

/// Editor properties recognised by the selection core
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorProperties {
    /// Box-selection combine mode
    pub box_select_mode: BoxSelectMode,
    /// Offset applied to pasted node and joint positions, if any
    pub paste_offset: Option<[f32; 2]>,
}

/// An axis-aligned selection rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner
    pub min: [f32; 2],
    /// Maximum corner
    pub max: [f32; 2],
}

impl Rect {
    /// Create a rectangle from two corners
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    /// Check if a point lies inside the rectangle
    pub fn contains(&self, point: [f32; 2]) -> bool {
        point[0] >= self.min[0]
            && point[0] <= self.max[0]
            && point[1] >= self.min[1]
            && point[1] <= self.max[1]
    }

    /// Check if another rectangle, given as (min, max) corners, overlaps
    pub fn intersects(&self, min: [f32; 2], max: [f32; 2]) -> bool {
        self.min[0] <= max[0]
            && self.max[0] >= min[0]
            && self.min[1] <= max[1]
            && self.max[1] >= min[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new([0.0, 0.0], [10.0, 10.0]);
        assert!(rect.contains([5.0, 5.0]));
        assert!(rect.contains([0.0, 10.0]));
        assert!(!rect.contains([10.1, 5.0]));
    }

    #[test]
    fn test_rect_intersects() {
        let rect = Rect::new([0.0, 0.0], [10.0, 10.0]);
        assert!(rect.intersects([5.0, 5.0], [15.0, 15.0]));
        assert!(!rect.intersects([11.0, 0.0], [20.0, 10.0]));
    }
}
