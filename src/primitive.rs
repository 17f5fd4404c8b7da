//! 2D shapes handed to rasterizers that draw into a [`RasterBuffer`](crate::RasterBuffer).
//!
//! The codec itself never looks at these.

/// A point or direction in image space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A line segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Line {
    pub vertices: [Vec2; 2],
}

impl Line {
    pub const fn new(v1: Vec2, v2: Vec2) -> Self {
        Self { vertices: [v1, v2] }
    }

    pub fn v1(&self) -> Vec2 {
        self.vertices[0]
    }

    pub fn v2(&self) -> Vec2 {
        self.vertices[1]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec2; 3],
}

impl Triangle {
    pub const fn new(v1: Vec2, v2: Vec2, v3: Vec2) -> Self {
        Self {
            vertices: [v1, v2, v3],
        }
    }

    pub fn v1(&self) -> Vec2 {
        self.vertices[0]
    }

    pub fn v2(&self) -> Vec2 {
        self.vertices[1]
    }

    pub fn v3(&self) -> Vec2 {
        self.vertices[2]
    }
}
