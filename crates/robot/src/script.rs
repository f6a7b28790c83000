//! Robot positions and URScript program text.

use common::ItemId;
use serde::{Deserialize, Serialize};

/// Tool height for every pose, in metres.
pub const Z: f64 = 0.20;

/// Tool orientation (rotation vector) shared by every pose.
pub const RX: f64 = 0.0;
pub const RY: f64 = -3.1415;
pub const RZ: f64 = 0.0;

/// Joint acceleration and velocity used for every move.
const ACCELERATION: f64 = 1.2;
const VELOCITY: f64 = 0.6;

/// A point on the work surface, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Storage boxes on a 10 cm grid, plus the shipping spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bin {
    A,
    B,
    C,
    /// Where picked items are dropped off. Sits slightly closer than the
    /// grid (0.25 instead of 0.30).
    #[serde(rename = "S")]
    Shipping,
}

impl Bin {
    pub fn position(self) -> Position {
        match self {
            Bin::A => Position::new(0.10, 0.00),
            Bin::B => Position::new(0.20, 0.00),
            Bin::C => Position::new(0.30, 0.00),
            Bin::Shipping => Position::new(0.20, 0.25),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Bin::A => "A",
            Bin::B => "B",
            Bin::C => "C",
            Bin::Shipping => "S",
        }
    }
}

impl std::fmt::Display for Bin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URScript body moving from `from` to `to` through a safe home pose.
///
/// Numbers always use `.` as the decimal separator.
pub fn generate_move(from: Position, to: Position) -> String {
    format!(
        "
  # Safe home pose first (stable starting point for inverse kinematics)
  home = [0, -1.57, 0, -1.57, 0, 0]
  movej(home, a={ACCELERATION}, v={VELOCITY})

  # World poses (x, y, Z) with a fixed orientation
  p_from = p[{fx}, {fy}, {Z}, {RX}, {RY}, {RZ}]
  p_to   = p[{tx}, {ty}, {Z}, {RX}, {RY}, {RZ}]

  # Two plain joint moves
  movej(get_inverse_kin(p_from), a={ACCELERATION}, v={VELOCITY})
  movej(get_inverse_kin(p_to),   a={ACCELERATION}, v={VELOCITY})
",
        fx = from.x,
        fy = from.y,
        tx = to.x,
        ty = to.y,
    )
}

/// Wraps a body into a named program the controller runs on receipt.
pub fn wrap_program(body: &str, item: ItemId) -> String {
    format!("def pick_item_{item}():\n{body}\nend\n")
}
