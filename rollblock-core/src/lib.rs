/// Rollblock Core Library - Orientation state machine and roll kinematics
///
/// This library models a cuboid block rolled face over face across a floor:
/// the 24-state orientation graph, the arc geometry of a single 90 degree roll
/// and a per-block animator that a render loop drives with elapsed time.

pub mod animator;
pub mod axis;
pub mod error;
pub mod kinematics;
pub mod orientation;

// Re-export commonly used types
pub use animator::{Pose, RollAnimator, DEFAULT_ROLL_SPEED};
pub use axis::{AxisDirection, RollEdge, Sign, Turn, WorldAxis};
pub use error::RollError;
pub use kinematics::{roll_arc, HalfExtents, RollArcParameters};
pub use orientation::{AxisRoles, LocalAxis, Orientation, OrientationGraph};
