//! Grid layout and per-cell mapping from buffered magnitudes to visuals.

use crate::color::hsl_to_rgb;
use crate::config::{HslParams, VizConfig};
use crate::constants::CELL_SPACING_DIVISOR;
use crate::scroll::ScrollBuffer;
use glam::Vec3;

/// `amount × amount` cells in row-major `(x, y)` order: `i = x * amount + y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    amount: u32,
    offset: f32,
}

impl GridLayout {
    pub fn new(amount: u32) -> Self {
        let amount = amount.max(1);
        Self {
            amount,
            offset: (amount as f32 - 1.0) / 2.0,
        }
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn count(&self) -> usize {
        let a = self.amount as usize;
        a * a
    }

    /// Center offset `(amount - 1) / 2`.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.amount && y < self.amount)
            .then(|| x as usize * self.amount as usize + y as usize)
    }

    #[inline]
    pub fn cell_of(&self, i: usize) -> Option<(u32, u32)> {
        (i < self.count()).then(|| {
            let a = self.amount as usize;
            ((i / a) as u32, (i % a) as u32)
        })
    }

    /// Ground-plane position of a cell at the given height.
    #[inline]
    pub fn position(&self, x: u32, y: u32, height: f32) -> Vec3 {
        Vec3::new(
            (self.offset - x as f32) / CELL_SPACING_DIVISOR,
            height,
            (self.offset - y as f32) / CELL_SPACING_DIVISOR,
        )
    }

    /// Cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, u32, u32)> {
        let a = self.amount;
        (0..a)
            .flat_map(move |x| (0..a).map(move |y| (x, y)))
            .enumerate()
            .map(|(i, (x, y))| (i, x, y))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellVisual {
    pub position: Vec3,
    pub color: [f32; 3],
}

/// Height and color transform for one buffered magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMapper {
    height_scale: f32,
    hsl: HslParams,
}

impl GridMapper {
    pub fn new(config: &VizConfig) -> Self {
        Self {
            height_scale: config.effective_height_scale(),
            hsl: config.hsl,
        }
    }

    #[inline]
    pub fn height(&self, value: u8) -> f32 {
        value as f32 / self.height_scale
    }

    #[inline]
    pub fn color(&self, value: u8) -> [f32; 3] {
        let v = value as f32;
        let p = &self.hsl;
        hsl_to_rgb(
            p.hue_base + v * p.hue_scale,
            p.saturation,
            p.lightness_base + v * p.lightness_scale,
        )
    }

    /// Visual for every cell, in index order. Buffer slots beyond the grid
    /// are ignored; missing slots read as zero.
    pub fn map<'a>(
        &'a self,
        layout: &'a GridLayout,
        buffer: &'a ScrollBuffer,
    ) -> impl Iterator<Item = (usize, CellVisual)> + 'a {
        layout.cells().map(move |(i, x, y)| {
            let value = buffer.get(i);
            (
                i,
                CellVisual {
                    position: layout.position(x, y, self.height(value)),
                    color: self.color(value),
                },
            )
        })
    }
}
