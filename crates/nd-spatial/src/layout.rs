//! Cell-to-world placement.
//!
//! Cell `(row, col)` is centred at
//!
//!   origin + x_step * (col + 0.5) + y_step * (row + 0.5)
//!
//! Orthogonal maps use axis-aligned steps; isometric maps use the diamond
//! basis `(w/2, h/2)` / `(-w/2, h/2)`.

use nd_core::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    pub origin: Vec2,
    /// World offset of one column step.
    pub x_step: Vec2,
    /// World offset of one row step.
    pub y_step: Vec2,
}

impl MapLayout {
    pub fn orthogonal(tile_width: f32, tile_height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            x_step: Vec2::new(tile_width, 0.0),
            y_step: Vec2::new(0.0, tile_height),
        }
    }

    pub fn isometric(tile_width: f32, tile_height: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            x_step: Vec2::new(tile_width * 0.5, tile_height * 0.5),
            y_step: Vec2::new(-tile_width * 0.5, tile_height * 0.5),
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// World-space centre of cell `(row, col)`.
    #[inline]
    pub fn cell_center(&self, row: usize, col: usize) -> Vec2 {
        self.origin + self.x_step * (col as f32 + 0.5) + self.y_step * (row as f32 + 0.5)
    }

    /// Shortest world length of one grid step, with diagonal steps divided
    /// by √2.  Octile grid distance times this never exceeds the true world
    /// length of a grid path.
    pub fn step_unit(&self) -> f32 {
        let diag_a = (self.x_step + self.y_step).length() / std::f32::consts::SQRT_2;
        let diag_b = (self.x_step - self.y_step).length() / std::f32::consts::SQRT_2;
        self.x_step
            .length()
            .min(self.y_step.length())
            .min(diag_a)
            .min(diag_b)
    }
}

impl Default for MapLayout {
    /// 32×32 orthogonal tiles.
    fn default() -> Self {
        Self::orthogonal(32.0, 32.0)
    }
}
