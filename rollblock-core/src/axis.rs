/// Signed axis directions, world axes and roll labels
use nalgebra::Vector3;
use std::fmt;

const X_MASK: u8 = 0x01 | 0x02;
const Y_MASK: u8 = 0x04 | 0x08;
const Z_MASK: u8 = 0x10 | 0x20;

/// One of the six signed unit directions a block face can point along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisDirection {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl AxisDirection {
    /// All directions in index order.
    pub const ALL: [AxisDirection; 6] = [
        AxisDirection::PosX,
        AxisDirection::NegX,
        AxisDirection::PosY,
        AxisDirection::NegY,
        AxisDirection::PosZ,
        AxisDirection::NegZ,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }

    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            AxisDirection::PosX => Vector3::x(),
            AxisDirection::NegX => -Vector3::x(),
            AxisDirection::PosY => Vector3::y(),
            AxisDirection::NegY => -Vector3::y(),
            AxisDirection::PosZ => Vector3::z(),
            AxisDirection::NegZ => -Vector3::z(),
        }
    }

    pub const fn is_x_aligned(self) -> bool {
        self.mask() & X_MASK != 0
    }

    pub const fn is_y_aligned(self) -> bool {
        self.mask() & Y_MASK != 0
    }

    pub const fn is_z_aligned(self) -> bool {
        self.mask() & Z_MASK != 0
    }

    pub const fn is_aligned_with(self, axis: WorldAxis) -> bool {
        match axis {
            WorldAxis::X => self.is_x_aligned(),
            WorldAxis::Y => self.is_y_aligned(),
            WorldAxis::Z => self.is_z_aligned(),
        }
    }

    /// True for the three positive directions.
    pub const fn is_positive(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn opposite(self) -> Self {
        match self {
            AxisDirection::PosX => AxisDirection::NegX,
            AxisDirection::NegX => AxisDirection::PosX,
            AxisDirection::PosY => AxisDirection::NegY,
            AxisDirection::NegY => AxisDirection::PosY,
            AxisDirection::PosZ => AxisDirection::NegZ,
            AxisDirection::NegZ => AxisDirection::PosZ,
        }
    }

    /// The world axis this direction lies on.
    pub const fn world_axis(self) -> WorldAxis {
        match self {
            AxisDirection::PosX | AxisDirection::NegX => WorldAxis::X,
            AxisDirection::PosY | AxisDirection::NegY => WorldAxis::Y,
            AxisDirection::PosZ | AxisDirection::NegZ => WorldAxis::Z,
        }
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_positive() { '+' } else { '-' };
        write!(f, "{}{}", sign, self.world_axis())
    }
}

/// A fixed world axis about which rolls are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorldAxis {
    X,
    Y,
    Z,
}

impl WorldAxis {
    pub const ALL: [WorldAxis; 3] = [WorldAxis::X, WorldAxis::Y, WorldAxis::Z];
}

impl fmt::Display for WorldAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorldAxis::X => "X",
            WorldAxis::Y => "Y",
            WorldAxis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// A +1 / -1 factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    pub const fn value(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    pub const fn flip(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// Direction of a quarter turn within an orthogonal ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    pub const fn from_sign(sign: Sign) -> Self {
        match sign {
            Sign::Positive => Turn::Clockwise,
            Sign::Negative => Turn::CounterClockwise,
        }
    }

    /// Ring step: +1 for clockwise, -1 for counter-clockwise.
    pub const fn step(self) -> isize {
        match self {
            Turn::Clockwise => 1,
            Turn::CounterClockwise => -1,
        }
    }

    pub const fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }
}

/// One of the six outgoing edges of an orientation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RollEdge {
    pub axis: WorldAxis,
    pub turn: Turn,
}

impl RollEdge {
    /// Edges in table order: xCW, xCCW, yCW, yCCW, zCW, zCCW.
    pub const ALL: [RollEdge; 6] = [
        RollEdge::new(WorldAxis::X, Turn::Clockwise),
        RollEdge::new(WorldAxis::X, Turn::CounterClockwise),
        RollEdge::new(WorldAxis::Y, Turn::Clockwise),
        RollEdge::new(WorldAxis::Y, Turn::CounterClockwise),
        RollEdge::new(WorldAxis::Z, Turn::Clockwise),
        RollEdge::new(WorldAxis::Z, Turn::CounterClockwise),
    ];

    pub const fn new(axis: WorldAxis, turn: Turn) -> Self {
        Self { axis, turn }
    }

    pub const fn index(self) -> usize {
        let base = match self.axis {
            WorldAxis::X => 0,
            WorldAxis::Y => 2,
            WorldAxis::Z => 4,
        };
        match self.turn {
            Turn::Clockwise => base,
            Turn::CounterClockwise => base + 1,
        }
    }

    pub const fn inverse(self) -> Self {
        Self::new(self.axis, self.turn.inverse())
    }
}

impl fmt::Display for RollEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turn = match self.turn {
            Turn::Clockwise => "CW",
            Turn::CounterClockwise => "CCW",
        };
        write!(f, "{}{}", self.axis, turn)
    }
}
