pub mod benchmark;
pub mod command;
pub mod config;
pub mod error;
pub mod kinematics;
pub mod memory;
pub mod pilots;
pub mod quadratic;
pub mod runner;
pub mod snapshot;
pub mod targeting;
pub mod threat;

pub use command::{Command, TurnDirection};
pub use config::PilotConfig;
pub use error::ConfigError;
pub use kinematics::{CollisionPrediction, KinematicBody};
pub use pilots::{create_pilot, pilot_from_config, Pilot};
pub use snapshot::{AsteroidSnapshot, TickSnapshot};
