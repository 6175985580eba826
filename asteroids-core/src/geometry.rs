use core::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point or a displacement in arena space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `radians`.
    #[inline]
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Left-hand perpendicular `(-y, x)`; not normalized.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[inline]
    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned extent of a vertex set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Extent of `origin` together with every vertex.
    pub fn around(origin: Vec2, vertices: &[Vec2]) -> Self {
        vertices.iter().fold(
            Self {
                min: origin,
                max: origin,
            },
            |acc, vertex| Self {
                min: Vec2::new(acc.min.x.min(vertex.x), acc.min.y.min(vertex.y)),
                max: Vec2::new(acc.max.x.max(vertex.x), acc.max.y.max(vertex.y)),
            },
        )
    }
}

/// Rotates each local offset by `heading` and translates it to `origin`.
pub fn to_world(origin: Vec2, heading: f64, offsets: &[Vec2]) -> Vec<Vec2> {
    let (sin, cos) = heading.sin_cos();
    offsets
        .iter()
        .map(|offset| {
            Vec2::new(
                origin.x + offset.x * cos - offset.y * sin,
                origin.y + offset.x * sin + offset.y * cos,
            )
        })
        .collect()
}

/// True when every turn along the closed vertex loop has the same
/// orientation. Collinear runs are rejected.
pub fn is_convex(vertices: &[Vec2]) -> bool {
    let count = vertices.len();
    if count < 3 {
        return false;
    }

    let mut sign = 0.0f64;
    for index in 0..count {
        let a = vertices[index];
        let b = vertices[(index + 1) % count];
        let c = vertices[(index + 2) % count];
        let turn = (b - a).cross(c - b);
        if turn == 0.0 {
            return false;
        }
        if sign == 0.0 {
            sign = turn.signum();
        } else if turn.signum() != sign {
            return false;
        }
    }

    true
}
