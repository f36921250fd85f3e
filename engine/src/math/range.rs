use crate::error::GeometryError;
use crate::session_rng::SessionRng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Result<Self, GeometryError> {
        if min.is_nan() || max.is_nan() || max < min {
            return Err(GeometryError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn centered(length: f64) -> Result<Self, GeometryError> {
        Self::new(-length / 2.0, length / 2.0)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn inset(&self, margin: f64) -> Result<Self, GeometryError> {
        Self::new(self.min + margin, self.max - margin)
    }

    pub fn sample(&self, rng: &mut SessionRng) -> f64 {
        if self.length() == 0.0 {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_max_below_min() {
        assert_eq!(
            Range::new(2.0, 1.0),
            Err(GeometryError::InvalidRange { min: 2.0, max: 1.0 })
        );
        assert!(Range::new(1.0, 1.0).is_ok());
        assert!(Range::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_centered_and_length() {
        let range = Range::centered(20.0).unwrap();
        assert_eq!(range.min(), -10.0);
        assert_eq!(range.max(), 10.0);
        assert_eq!(range.length(), 20.0);
    }

    #[test]
    fn test_inset_fails_when_margin_too_large() {
        let range = Range::centered(4.0).unwrap();
        assert_eq!(range.inset(1.0).unwrap(), Range::new(-1.0, 1.0).unwrap());
        assert!(range.inset(2.5).is_err());
    }

    #[test]
    fn test_sample_stays_inside() {
        let range = Range::new(-3.0, 5.0).unwrap();
        let mut rng = SessionRng::new(7);
        for _ in 0..500 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn test_sample_of_empty_width_range() {
        let range = Range::new(2.0, 2.0).unwrap();
        let mut rng = SessionRng::new(1);
        assert_eq!(range.sample(&mut rng), 2.0);
    }
}
