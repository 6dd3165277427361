//! Orbit camera math for the 3D preview.
//!
//! The camera circles a target at the origin. `alpha` is the longitude around
//! the vertical axis, `beta` the angle down from the vertical, `radius` the
//! distance to the target. Projection is a plain pinhole perspective onto the
//! canvas, enough to draw the preview wireframe without a 3D engine.

#[cfg(test)]
#[path = "orbit_test.rs"]
mod orbit_test;

use std::f64::consts::{FRAC_PI_2, PI};

pub const DEFAULT_ALPHA: f64 = FRAC_PI_2;
pub const DEFAULT_BETA: f64 = PI / 2.5;
pub const DEFAULT_RADIUS: f64 = 8.0;
/// Vertical field of view in radians.
pub const DEFAULT_FOV: f64 = 0.8;
/// Edge length of the preview box.
pub const BOX_SIZE: f64 = 2.0;
/// Radians of rotation per dragged CSS pixel.
pub const DRAG_SENSITIVITY: f64 = 0.01;

const MIN_BETA: f64 = 0.01;
const MAX_BETA: f64 = PI - 0.01;
const NEAR_PLANE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            Self::new(self.x / len, self.y / len, self.z / len)
        }
    }
}

/// A point on the canvas in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Orbit camera looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub alpha: f64,
    pub beta: f64,
    pub radius: f64,
    pub fov: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            radius: DEFAULT_RADIUS,
            fov: DEFAULT_FOV,
        }
    }
}

impl OrbitCamera {
    /// Camera position in world space.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        Vec3::new(
            self.radius * self.alpha.cos() * self.beta.sin(),
            self.radius * self.beta.cos(),
            self.radius * self.alpha.sin() * self.beta.sin(),
        )
    }

    /// Rotate by a pointer drag of `dx`/`dy` CSS pixels.
    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.alpha = (self.alpha - dx * DRAG_SENSITIVITY).rem_euclid(2.0 * PI);
        self.beta = (self.beta - dy * DRAG_SENSITIVITY).clamp(MIN_BETA, MAX_BETA);
    }

    /// Project a world point onto a `width` x `height` canvas.
    ///
    /// Returns `None` for points at or behind the near plane.
    #[must_use]
    pub fn project(&self, point: Vec3, width: f64, height: f64) -> Option<ScreenPoint> {
        let eye = self.eye();
        let forward = Vec3::new(0.0, 0.0, 0.0).sub(eye).normalized();
        let right = forward.cross(Vec3::new(0.0, 1.0, 0.0)).normalized();
        let up = right.cross(forward);

        let rel = point.sub(eye);
        let depth = rel.dot(forward);
        if depth <= NEAR_PLANE {
            return None;
        }
        let scale = (height / 2.0) / (self.fov / 2.0).tan();
        Some(ScreenPoint {
            x: width / 2.0 + rel.dot(right) / depth * scale,
            y: height / 2.0 - rel.dot(up) / depth * scale,
        })
    }
}

/// The 12 edges of an axis-aligned cube of edge `size` centered on the origin.
#[must_use]
pub fn box_edges(size: f64) -> Vec<(Vec3, Vec3)> {
    let h = size / 2.0;
    let corner = |i: u8| {
        Vec3::new(
            if i & 1 == 0 { -h } else { h },
            if i & 2 == 0 { -h } else { h },
            if i & 4 == 0 { -h } else { h },
        )
    };
    let mut edges = Vec::with_capacity(12);
    for i in 0..8u8 {
        for bit in [1u8, 2, 4] {
            if i & bit == 0 {
                edges.push((corner(i), corner(i | bit)));
            }
        }
    }
    edges
}

/// Screen-space segments of the preview box; edges crossing the near plane
/// are skipped.
#[must_use]
pub fn wireframe(camera: &OrbitCamera, width: f64, height: f64) -> Vec<(ScreenPoint, ScreenPoint)> {
    box_edges(BOX_SIZE)
        .into_iter()
        .filter_map(|(a, b)| Some((camera.project(a, width, height)?, camera.project(b, width, height)?)))
        .collect()
}
