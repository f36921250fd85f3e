use crate::error::{GeometryError, ensure_positive};
use crate::math::{Range, Vector3};
use crate::session_rng::SessionRng;

#[derive(Clone, Debug, PartialEq)]
pub struct Food {
    position: Vector3,
    radius: f64,
}

impl Food {
    pub fn new(position: Vector3, radius: f64) -> Result<Self, GeometryError> {
        ensure_positive("food radius", radius)?;
        if !position.is_finite() {
            return Err(GeometryError::DegenerateVector { name: "food position" });
        }
        Ok(Self { position, radius })
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position.set_from(&position);
    }

    pub fn relocate(&mut self, x_range: &Range, z_range: &Range, rng: &mut SessionRng) -> Vector3 {
        self.position.x = x_range.sample(rng);
        self.position.z = z_range.sample(rng);
        self.position
    }
}
