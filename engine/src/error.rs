#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    InvalidRange { min: f64, max: f64 },
    NonPositive { name: &'static str, value: f64 },
    Negative { name: &'static str, value: f64 },
    InitLengthTooShort { found: usize, min: usize },
    DegenerateVector { name: &'static str },
    WidthNotBelowStepSize { width: f64, step_size: f64 },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::InvalidRange { min, max } => {
                write!(f, "Invalid range: max {} is less than min {}", max, min)
            }
            GeometryError::NonPositive { name, value } => {
                write!(f, "{} must be positive, got {}", name, value)
            }
            GeometryError::Negative { name, value } => {
                write!(f, "{} must not be negative, got {}", name, value)
            }
            GeometryError::InitLengthTooShort { found, min } => {
                write!(f, "Initial snake length must be at least {}, got {}", min, found)
            }
            GeometryError::DegenerateVector { name } => {
                write!(f, "{} has zero length and cannot be normalized", name)
            }
            GeometryError::WidthNotBelowStepSize { width, step_size } => {
                write!(
                    f,
                    "Snake width {} must be less than step size {} for self collision to be meaningful",
                    width, step_size
                )
            }
        }
    }
}

impl std::error::Error for GeometryError {}

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    Config(String),
    Geometry(GeometryError),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Config(e) => write!(f, "Config error: {}", e),
            GameError::Geometry(e) => write!(f, "Geometry error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Geometry(e) => Some(e),
            GameError::Config(_) => None,
        }
    }
}

impl From<GeometryError> for GameError {
    fn from(e: GeometryError) -> Self {
        GameError::Geometry(e)
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), GeometryError> {
    // Written so that NaN is rejected too.
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { name, value })
    }
}

pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::Negative { name, value })
    }
}
