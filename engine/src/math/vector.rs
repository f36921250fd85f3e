use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn copy(&self) -> Self {
        *self
    }

    pub fn set_from(&mut self, v: &Vector3) -> &mut Self {
        self.x = v.x;
        self.y = v.y;
        self.z = v.z;
        self
    }

    pub fn add(&mut self, v: &Vector3) -> &mut Self {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
        self
    }

    pub fn sub(&mut self, v: &Vector3) -> &mut Self {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
        self
    }

    pub fn scalar_mult(&mut self, n: f64) -> &mut Self {
        self.x *= n;
        self.y *= n;
        self.z *= n;
        self
    }

    /// A zero vector ends up with NaN components; use
    /// [`Vector3::try_normalized`] where that can happen.
    pub fn normalize(&mut self) -> &mut Self {
        let size = self.length();
        self.x /= size;
        self.y /= size;
        self.z /= size;
        self
    }

    pub fn dot(&self, v: &Vector3) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(&self, other: &Vector3) -> f64 {
        self.minus(other).length()
    }

    pub fn plus(&self, v: &Vector3) -> Vector3 {
        let mut result = *self;
        result.add(v);
        result
    }

    pub fn minus(&self, v: &Vector3) -> Vector3 {
        let mut result = *self;
        result.sub(v);
        result
    }

    pub fn scaled(&self, n: f64) -> Vector3 {
        let mut result = *self;
        result.scalar_mult(n);
        result
    }

    pub fn normalized(&self) -> Vector3 {
        let mut result = *self;
        result.normalize();
        result
    }

    pub fn try_normalized(&self) -> Option<Vector3> {
        let size = self.length();
        if size > 0.0 && size.is_finite() {
            Some(self.scaled(1.0 / size))
        } else {
            None
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(values: [f64; 3]) -> Self {
        Vector3::new(values[0], values[1], values[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl std::fmt::Display for Vector3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}
