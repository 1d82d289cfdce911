//! Rendering boundary.
//!
//! The simulator never depends on a rendering technology. Objects and their
//! states describe themselves through [`Canvas`]; a host plugs in its own
//! implementation, or uses [`NullCanvas`] to discard everything.

use crate::math::Vector2D;
use crate::shapes::Polygon;

/// An RGB colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

/// Drawing surface, in world coordinates.
pub trait Canvas {
    /// Outline (or fill, when `filled`) of a closed polygon.
    fn draw_polygon(&mut self, polygon: &Polygon, color: Color, filled: bool);

    fn draw_line(&mut self, from: Vector2D, to: Vector2D, color: Color);

    fn draw_circle(&mut self, center: Vector2D, radius: f64, color: Color);

    fn draw_text(&mut self, _at: Vector2D, _text: &str, _color: Color) {}
}

/// A canvas that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn draw_polygon(&mut self, _polygon: &Polygon, _color: Color, _filled: bool) {}

    fn draw_line(&mut self, _from: Vector2D, _to: Vector2D, _color: Color) {}

    fn draw_circle(&mut self, _center: Vector2D, _radius: f64, _color: Color) {}
}
