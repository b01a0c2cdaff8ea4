//! Planar points and the handful of vector operations the curves need.
use num_traits::Float;

/// A coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T: Float> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// True if neither coordinate is NaN or infinite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn distance(&self, other: Point<T>) -> T {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn distance_squared(&self, other: Point<T>) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn dot(&self, other: Point<T>) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Linear interpolation `(1 - t) * self + t * other`
    #[inline]
    pub fn lerp(&self, other: Point<T>, t: T) -> Self {
        let t1 = T::one() - t;
        Self::new(t1 * self.x + t * other.x, t1 * self.y + t * other.y)
    }
}

impl<T: Float> core::ops::Sub for Point<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Float> core::ops::Add for Point<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Float> core::ops::Mul<T> for Point<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Float> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}
