//! Screen and document geometry.
//!
//! Document space is the fixed space emoji positions are stored in. Its origin
//! sits at the viewport center; screen space is what the host draws in.
//!
//! ```text
//! screen = center + doc * zoom + pan
//! doc    = (screen - pan - center) / zoom
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Rounding noise allowed per unit of operand magnitude, in ulps.
const SNAP_ULPS: f64 = 8.0;

/// A point in screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A translation, such as a pan offset or a drag translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal component.
    pub width: f64,
    /// Vertical component.
    pub height: f64,
}

impl Offset {
    /// No translation.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new offset.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both components are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

impl Add for Offset {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl AddAssign for Offset {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.width, -self.height)
    }
}

impl Mul<f64> for Offset {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

impl Div<f64> for Offset {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.width / rhs, self.height / rhs)
    }
}

impl Add<Offset> for Point {
    type Output = Self;

    fn add(self, rhs: Offset) -> Self {
        Self::new(self.x + rhs.width, self.y + rhs.height)
    }
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A size in screen points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The center of a rectangle of this size anchored at the origin.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether both dimensions are strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// An integer position in document space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocPoint {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl DocPoint {
    /// The document origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new document point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for DocPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Map a screen point into document space.
///
/// The result is truncated toward zero. Callers must pass a finite,
/// non-zero `zoom`.
#[must_use]
pub fn to_document(screen: Point, center: Point, pan: Offset, zoom: f64) -> DocPoint {
    let x = (screen.x - pan.width - center.x) / zoom;
    let y = (screen.y - pan.height - center.y) / zoom;
    let scale = zoom.abs();
    let x_extent = (screen.x.abs() + pan.width.abs() + center.x.abs()) / scale;
    let y_extent = (screen.y.abs() + pan.height.abs() + center.y.abs()) / scale;
    DocPoint::new(truncate_within(x, x_extent), truncate_within(y, y_extent))
}

/// Map a document point onto the screen.
#[must_use]
pub fn to_screen(doc: DocPoint, center: Point, pan: Offset, zoom: f64) -> Point {
    Point::new(
        center.x + f64::from(doc.x) * zoom + pan.width,
        center.y + f64::from(doc.y) * zoom + pan.height,
    )
}

/// Convert a screen-space translation into document units.
#[must_use]
pub fn delta_to_document(delta: Offset, zoom: f64) -> Offset {
    delta / zoom
}

/// Convert a document-space translation into screen units.
#[must_use]
pub fn delta_to_screen(delta: Offset, zoom: f64) -> Offset {
    delta * zoom
}

/// Truncate toward zero, snapping values within rounding noise of an integer.
pub(crate) fn truncate(value: f64) -> i32 {
    truncate_within(value, 0.0)
}

/// Truncate toward zero. `extent` is the magnitude of the operands `value`
/// was computed from; the snap window grows with it so only floating
/// rounding noise is absorbed.
#[allow(clippy::cast_possible_truncation)]
fn truncate_within(value: f64, extent: f64) -> i32 {
    let nearest = value.round();
    let noise = SNAP_ULPS * f64::EPSILON * (extent + value.abs()).max(1.0);
    if (value - nearest).abs() <= noise {
        nearest as i32
    } else {
        value.trunc() as i32
    }
}
