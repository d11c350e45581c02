/// Per-block roll animation
///
/// A `RollAnimator` is idle until a roll is requested. Each `step` then moves
/// the block along the arc computed by `roll_arc`; once the arc angle reaches
/// a quarter turn the new orientation and position are committed together and
/// the animator is idle again.
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::axis::{RollEdge, Sign, WorldAxis};
use crate::error::RollError;
use crate::kinematics::{roll_arc, HalfExtents, RollArcParameters};
use crate::orientation::{Orientation, OrientationGraph};

/// Fraction of a half turn covered per nominal time unit.
pub const DEFAULT_ROLL_SPEED: f64 = 0.025;

/// Orientation and position to render the block with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Maps block-local coordinates to world directions.
    pub rotation: Matrix3<f64>,
    pub position: Vector3<f64>,
}

#[derive(Debug, Clone, Copy)]
struct ActiveRoll {
    edge: RollEdge,
    angle: f64,
    arc: RollArcParameters,
}

#[derive(Debug, Clone)]
pub struct RollAnimator {
    extents: HalfExtents,
    orientation: Orientation,
    orientation_matrix: Matrix3<f64>,
    base_position: Vector3<f64>,
    roll: Option<ActiveRoll>,
    roll_speed: f64,
    pose: Pose,
}

impl RollAnimator {
    /// Create an idle block in the base orientation at the origin.
    ///
    /// # Panics
    /// If any half extent is not finite and positive.
    pub fn new(half_x: f64, half_y: f64, half_z: f64) -> Self {
        match HalfExtents::new(half_x, half_y, half_z) {
            Ok(extents) => Self::with_extents(extents),
            Err(e) => panic!("invalid block: {e}"),
        }
    }

    pub fn with_extents(extents: HalfExtents) -> Self {
        let orientation = Orientation::BASE;
        let orientation_matrix = OrientationGraph::global().orientation_matrix(orientation);
        let base_position = Vector3::zeros();
        Self {
            extents,
            orientation,
            orientation_matrix,
            base_position,
            roll: None,
            roll_speed: DEFAULT_ROLL_SPEED,
            pose: Pose {
                rotation: orientation_matrix,
                position: base_position,
            },
        }
    }

    pub fn half_extents(&self) -> HalfExtents {
        self.extents
    }

    pub fn roll_speed(&self) -> f64 {
        self.roll_speed
    }

    pub fn set_roll_speed(&mut self, roll_speed: f64) -> Result<(), RollError> {
        if !roll_speed.is_finite() || roll_speed <= 0.0 {
            return Err(RollError::InvalidRollSpeed(roll_speed));
        }
        self.roll_speed = roll_speed;
        Ok(())
    }

    /// Radians of arc covered per time unit.
    pub fn angular_rate(&self) -> f64 {
        PI * self.roll_speed
    }

    pub fn is_rolling(&self) -> bool {
        self.roll.is_some()
    }

    pub fn current_orientation(&self) -> Orientation {
        self.orientation
    }

    /// Orientation matrix of the last committed state.
    pub fn orientation_matrix(&self) -> Matrix3<f64> {
        self.orientation_matrix
    }

    /// Position of the last committed state.
    pub fn base_position(&self) -> Vector3<f64> {
        self.base_position
    }

    /// Position from the most recent `step`.
    pub fn position(&self) -> Vector3<f64> {
        self.pose.position
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn arc_angle(&self) -> Option<f64> {
        self.roll.map(|roll| roll.angle)
    }

    pub fn pending_edge(&self) -> Option<RollEdge> {
        self.roll.map(|roll| roll.edge)
    }

    pub fn arc(&self) -> Option<RollArcParameters> {
        self.roll.map(|roll| roll.arc)
    }

    /// Move the idle block.
    pub fn set_base_position(&mut self, position: Vector3<f64>) -> Result<(), RollError> {
        if self.is_rolling() {
            return Err(RollError::RollInProgress);
        }
        self.base_position = position;
        self.pose.position = position;
        Ok(())
    }

    /// Start rolling about the world `axis`. Returns false and changes nothing
    /// if a roll is already in flight.
    pub fn request_roll(&mut self, axis: WorldAxis, sign: Sign) -> bool {
        if self.is_rolling() {
            log::debug!("ignoring {axis} roll request, already rolling");
            return false;
        }

        let arc = roll_arc(self.orientation, &self.extents, axis, sign, Sign::Positive);

        let edge = self.orientation.roll_edge(axis, sign);

        log::debug!(
            "rolling {} about {axis}, edge {edge}, radius {:.3}",
            self.orientation,
            arc.radius
        );
        self.roll = Some(ActiveRoll {
            edge,
            angle: 0.0,
            arc,
        });
        true
    }

    /// Advance the animation by `dt` time units and return the pose to render.
    /// `dt == 0.0` returns the current pose unchanged.
    pub fn step(&mut self, dt: f64) -> Pose {
        let Some(mut roll) = self.roll else {
            return self.pose;
        };

        roll.angle += dt.max(0.0) * self.angular_rate();
        if roll.angle >= FRAC_PI_2 {
            roll.angle = FRAC_PI_2;
            let position = self.base_position + roll.arc.point_at(roll.angle);
            self.commit(roll.edge, position);
        } else {
            self.pose = Pose {
                rotation: roll.arc.rotation_at(roll.angle).matrix() * self.orientation_matrix,
                position: self.base_position + roll.arc.point_at(roll.angle),
            };
            self.roll = Some(roll);
            log::trace!("arc angle {:.4}, position {:?}", roll.angle, self.pose.position);
        }
        self.pose
    }

    fn commit(&mut self, edge: RollEdge, position: Vector3<f64>) {
        let graph = OrientationGraph::global();
        self.orientation = graph.follow(self.orientation, edge);
        graph.update_orientation_matrix(self.orientation, &mut self.orientation_matrix);
        self.base_position = position;
        self.roll = None;
        self.pose = Pose {
            rotation: self.orientation_matrix,
            position,
        };
        log::debug!("roll {edge} done, now {} at {:?}", self.orientation, position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::Turn;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_block_is_idle() {
        let mut block = RollAnimator::new(1.0, 2.0, 3.0);
        assert!(!block.is_rolling());
        assert_eq!(block.current_orientation(), Orientation::BASE);
        assert_eq!(block.arc_angle(), None);

        let pose = block.step(1.0);
        assert_eq!(pose.rotation, Matrix3::identity());
        assert_eq!(pose.position, Vector3::zeros());
    }

    #[test]
    #[should_panic(expected = "invalid block")]
    fn test_new_rejects_bad_extents() {
        RollAnimator::new(1.0, 0.0, 1.0);
    }

    #[test]
    fn test_roll_speed() {
        let mut block = RollAnimator::new(1.0, 1.0, 1.0);
        assert_eq!(block.roll_speed(), DEFAULT_ROLL_SPEED);
        assert_relative_eq!(block.angular_rate(), PI * 0.025);
        assert_eq!(block.set_roll_speed(-1.0), Err(RollError::InvalidRollSpeed(-1.0)));
        assert!(block.set_roll_speed(f64::INFINITY).is_err());
        block.set_roll_speed(0.5).unwrap();
        assert_eq!(block.roll_speed(), 0.5);
    }

    #[test]
    fn test_step_advances_angle() {
        let mut block = RollAnimator::new(1.0, 2.0, 3.0);
        assert!(block.request_roll(WorldAxis::X, Sign::Positive));
        assert_eq!(block.arc_angle(), Some(0.0));

        block.step(2.0);
        assert_relative_eq!(block.arc_angle().unwrap(), 2.0 * PI * 0.025, epsilon = 1e-12);
        assert!(block.is_rolling());
        // Nothing is committed mid roll
        assert_eq!(block.current_orientation(), Orientation::BASE);
        assert_eq!(block.base_position(), Vector3::zeros());
    }

    #[test]
    fn test_reposition_only_when_idle() {
        let mut block = RollAnimator::new(1.0, 2.0, 3.0);
        let target = Vector3::new(10.0, 0.0, 3.0);
        block.set_base_position(target).unwrap();
        assert_eq!(block.step(0.0).position, target);

        block.request_roll(WorldAxis::Y, Sign::Negative);
        assert_eq!(block.set_base_position(Vector3::zeros()), Err(RollError::RollInProgress));
        assert_eq!(block.base_position(), target);
    }

    #[test]
    fn test_negative_local_axis_flips_edge() {
        let mut block = RollAnimator::new(1.0, 2.0, 3.0);
        // Two X rolls leave local Y pointing along -Y
        for _ in 0..2 {
            block.request_roll(WorldAxis::X, Sign::Positive);
            block.step(100.0);
        }
        assert_eq!(block.current_orientation().aligned_with(WorldAxis::Y).to_string(), "-Y");

        block.request_roll(WorldAxis::Y, Sign::Positive);
        assert_eq!(
            block.pending_edge(),
            Some(RollEdge::new(WorldAxis::Y, Turn::CounterClockwise))
        );
    }
}
