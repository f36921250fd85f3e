use crate::error::{GeometryError, ensure_positive};
use crate::math::Range;

#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    width: f64,
    height: f64,
}

impl Terrain {
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        ensure_positive("terrain width", width)?;
        ensure_positive("terrain height", height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height / 2.0
    }

    pub fn x_range(&self) -> Range {
        Range::centered(self.width).expect("terrain width is validated positive")
    }

    pub fn z_range(&self) -> Range {
        Range::centered(self.height).expect("terrain height is validated positive")
    }

    pub fn padded_ranges(&self, padding: f64) -> Result<(Range, Range), GeometryError> {
        Ok((self.x_range().inset(padding)?, self.z_range().inset(padding)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_size() {
        assert!(Terrain::new(0.0, 10.0).is_err());
        assert!(Terrain::new(10.0, -1.0).is_err());
        assert!(Terrain::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_ranges() {
        let terrain = Terrain::new(20.0, 10.0).unwrap();
        assert_eq!(terrain.x_range(), Range::new(-10.0, 10.0).unwrap());
        assert_eq!(terrain.z_range(), Range::new(-5.0, 5.0).unwrap());

        let (x, z) = terrain.padded_ranges(2.0).unwrap();
        assert_eq!(x, Range::new(-8.0, 8.0).unwrap());
        assert_eq!(z, Range::new(-3.0, 3.0).unwrap());
    }

    #[test]
    fn test_padding_larger_than_arena_fails() {
        let terrain = Terrain::new(20.0, 4.0).unwrap();
        assert_eq!(
            terrain.padded_ranges(3.0),
            Err(GeometryError::InvalidRange { min: 1.0, max: -1.0 })
        );
    }
}
