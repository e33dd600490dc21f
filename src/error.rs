use core::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveFieldSize { half_size: f64 },
    NonPositiveTick { seconds: f64 },
    NonPositiveBulletSpeed { speed: f64 },
    NegativeRadius { what: &'static str, radius: f64 },
    NegativeTurnRate { degrees: f64 },
    EmptyAsteroidTiers,
    AsteroidTierMismatch { radii: usize, speeds: usize },
    ZeroMemoryRotation,
    ZeroDecisionBudget,
    UnknownStrategy { id: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveFieldSize { half_size } => {
                write!(f, "field half-size must be > 0, got {half_size}")
            }
            Self::NonPositiveTick { seconds } => {
                write!(f, "tick duration must be > 0 seconds, got {seconds}")
            }
            Self::NonPositiveBulletSpeed { speed } => {
                write!(f, "bullet speed must be > 0, got {speed}")
            }
            Self::NegativeRadius { what, radius } => {
                write!(f, "{what} radius must be >= 0, got {radius}")
            }
            Self::NegativeTurnRate { degrees } => {
                write!(f, "turn rate must be >= 0 degrees per tick, got {degrees}")
            }
            Self::EmptyAsteroidTiers => write!(f, "at least one asteroid size tier is required"),
            Self::AsteroidTierMismatch { radii, speeds } => write!(
                f,
                "asteroid tiers disagree: {radii} radii but {speeds} speeds"
            ),
            Self::ZeroMemoryRotation => write!(f, "memory rotation must be at least 1 commit"),
            Self::ZeroDecisionBudget => write!(f, "decision budget must be at least 1 microsecond"),
            Self::UnknownStrategy { id } => write!(f, "unknown pilot strategy: {id}"),
        }
    }
}

impl std::error::Error for ConfigError {}
