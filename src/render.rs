//! The interface between the simulation and whatever draws it.

use crate::math::Point2d;

/// An RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GREY: Self = Self::rgb(128, 128, 128);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A drawing surface, such as a canvas, implemented by the host.
pub trait Surface {
    /// Fills a closed polygon.
    fn fill_polygon(&mut self, points: &[Point2d], colour: Colour);

    /// Draws a straight line.
    fn stroke_line(&mut self, from: Point2d, to: Point2d, colour: Colour);
}
