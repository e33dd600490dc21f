use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    /// Counter-clockwise; heading increases.
    #[default]
    Left,
    /// Clockwise; heading decreases.
    Right,
    None,
}

impl TurnDirection {
    /// `+1` for left, `-1` for right, `0` for none.
    pub fn sign(self) -> i8 {
        match self {
            TurnDirection::Left => 1,
            TurnDirection::Right => -1,
            TurnDirection::None => 0,
        }
    }
}

/// The single action emitted for a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "direction", rename_all = "snake_case")]
pub enum Command {
    Fire,
    Turn(TurnDirection),
    RaiseShield,
}

impl Command {
    pub const HOLD: Command = Command::Turn(TurnDirection::None);

    pub fn is_shield(&self) -> bool {
        matches!(self, Command::RaiseShield)
    }

    /// The `(fire, turn_degrees)` pair a frame loop applies, with turns
    /// scaled by `turn_rate`. `None` stands for the shield.
    pub fn to_frame_input(self, turn_rate: f64) -> Option<(bool, f64)> {
        match self {
            Command::Fire => Some((true, 0.0)),
            Command::Turn(direction) => Some((false, direction.sign() as f64 * turn_rate)),
            Command::RaiseShield => None,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Fire => write!(f, "fire"),
            Command::Turn(TurnDirection::Left) => write!(f, "turn-left"),
            Command::Turn(TurnDirection::Right) => write!(f, "turn-right"),
            Command::Turn(TurnDirection::None) => write!(f, "hold"),
            Command::RaiseShield => write!(f, "shield"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_input_mapping() {
        assert_eq!(Command::Fire.to_frame_input(4.0), Some((true, 0.0)));
        assert_eq!(
            Command::Turn(TurnDirection::Left).to_frame_input(4.0),
            Some((false, 4.0))
        );
        assert_eq!(
            Command::Turn(TurnDirection::Right).to_frame_input(4.0),
            Some((false, -4.0))
        );
        assert_eq!(Command::HOLD.to_frame_input(4.0), Some((false, 0.0)));
        assert_eq!(Command::RaiseShield.to_frame_input(4.0), None);
    }

    #[test]
    fn commands_serialize_as_tagged_json() -> serde_json::Result<()> {
        let json = serde_json::to_string(&Command::Turn(TurnDirection::Right))?;
        assert_eq!(json, r#"{"kind":"turn","direction":"right"}"#);
        assert_eq!(serde_json::to_string(&Command::Fire)?, r#"{"kind":"fire"}"#);
        let back: Command = serde_json::from_str(r#"{"kind":"raise_shield"}"#)?;
        assert_eq!(back, Command::RaiseShield);
        Ok(())
    }
}
