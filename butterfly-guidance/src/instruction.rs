//! Turn instruction vocabulary
//!
//! `TurnType` and `DirectionModifier` are what the search annotates on every
//! edge transition and what guidance post-processing rewrites. The external
//! names (`as_str`) are the strings emitted in step maneuvers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnType {
    Invalid,
    NewName,
    Continue,
    Turn,
    Merge,
    OnRamp,
    OffRamp,
    Fork,
    EndOfRoad,
    Notification,
    EnterRoundabout,
    EnterAndExitRoundabout,
    EnterRotary,
    EnterAndExitRotary,
    EnterRoundaboutIntersection,
    EnterAndExitRoundaboutIntersection,
    UseLane,
    NoTurn,
    Suppressed,
    ExitRoundabout,
    ExitRotary,
    ExitRoundaboutIntersection,
    StayOnRoundabout,
    Sliproad,
}

impl TurnType {
    /// Name emitted in the `maneuver.type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnType::Invalid | TurnType::NoTurn | TurnType::Suppressed => "invalid",
            TurnType::NewName => "new name",
            TurnType::Continue | TurnType::StayOnRoundabout => "continue",
            TurnType::Turn | TurnType::Sliproad => "turn",
            TurnType::Merge => "merge",
            TurnType::OnRamp => "on ramp",
            TurnType::OffRamp => "off ramp",
            TurnType::Fork => "fork",
            TurnType::EndOfRoad => "end of road",
            TurnType::Notification => "notification",
            TurnType::EnterRoundabout | TurnType::EnterAndExitRoundabout => "roundabout",
            TurnType::EnterRotary | TurnType::EnterAndExitRotary => "rotary",
            TurnType::EnterRoundaboutIntersection
            | TurnType::EnterAndExitRoundaboutIntersection => "roundabout turn",
            TurnType::UseLane => "use lane",
            TurnType::ExitRoundabout | TurnType::ExitRoundaboutIntersection => "exit roundabout",
            TurnType::ExitRotary => "exit rotary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionModifier {
    UTurn,
    SharpRight,
    Right,
    SlightRight,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
}

impl DirectionModifier {
    /// Name emitted in the `maneuver.modifier` field
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionModifier::UTurn => "uturn",
            DirectionModifier::SharpRight => "sharp right",
            DirectionModifier::Right => "right",
            DirectionModifier::SlightRight => "slight right",
            DirectionModifier::Straight => "straight",
            DirectionModifier::SlightLeft => "slight left",
            DirectionModifier::Left => "left",
            DirectionModifier::SharpLeft => "sharp left",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnInstruction {
    pub turn_type: TurnType,
    pub direction_modifier: DirectionModifier,
}

impl TurnInstruction {
    pub fn new(turn_type: TurnType, direction_modifier: DirectionModifier) -> Self {
        Self {
            turn_type,
            direction_modifier,
        }
    }

    /// Instruction of an edge transition that is not a maneuver
    pub fn no_turn() -> Self {
        Self::new(TurnType::NoTurn, DirectionModifier::Straight)
    }
}

impl Default for TurnInstruction {
    fn default() -> Self {
        Self::no_turn()
    }
}
