use approx::assert_relative_eq;
use nalgebra::{Matrix3, Vector3};
use rollblock_core::{
    AxisDirection, Orientation, RollAnimator, RollEdge, RollError, Sign, Turn, WorldAxis,
};

/// Step with unit time until the roll completes, returning the number of steps.
fn finish_roll(block: &mut RollAnimator) -> usize {
    let mut steps = 0;
    while block.is_rolling() {
        block.step(1.0);
        steps += 1;
        assert!(steps < 1000, "roll never completed");
    }
    steps
}

#[test]
fn x_roll_from_base_orientation() {
    let mut block = RollAnimator::new(1.0, 2.0, 3.0);
    assert!(block.request_roll(WorldAxis::X, Sign::Positive));

    let arc = block.arc().unwrap();
    assert_eq!(arc.radius, 13f64.sqrt());
    assert_eq!(block.pending_edge(), Some(RollEdge::new(WorldAxis::X, Turn::Clockwise)));

    // 0.5 / 0.025 = 20 nominal units, one more if rounding falls short
    let steps = finish_roll(&mut block);
    assert!((20..=21).contains(&steps), "{steps}");

    let expected = block.current_orientation();
    assert_eq!(
        expected,
        Orientation::BASE.follow(RollEdge::new(WorldAxis::X, Turn::Clockwise))
    );
    assert_eq!(
        expected.local_axes(),
        [AxisDirection::PosX, AxisDirection::NegZ, AxisDirection::PosY]
    );
    assert_eq!(expected.to_string(), "(+X,-Z,+Y)");
    assert_relative_eq!(block.position(), Vector3::new(0.0, 5.0, -1.0), epsilon = 1e-9);
    assert_eq!(block.arc(), None);
}

#[test]
fn arc_is_continuous_from_start_to_end() {
    let mut block = RollAnimator::new(1.0, 2.0, 3.0);
    let start = Vector3::new(10.0, 0.0, 3.0);
    block.set_base_position(start).unwrap();
    block.request_roll(WorldAxis::Y, Sign::Positive);
    let arc = block.arc().unwrap();

    let first = block.step(0.0);
    assert_relative_eq!(first.position, start + arc.pivot + arc.u.into_inner() * arc.radius, epsilon = 1e-9);
    assert_relative_eq!(first.position, start, epsilon = 1e-9);

    let dt = 0.1;
    let max_jump = arc.radius * dt * block.angular_rate() + 1e-9;
    let mut previous = first.position;
    while block.is_rolling() {
        let pose = block.step(dt);
        assert!((pose.position - previous).norm() <= max_jump);
        previous = pose.position;
    }
    assert_relative_eq!(previous, start + arc.pivot + arc.v.into_inner() * arc.radius, epsilon = 1e-9);
    assert_relative_eq!(previous, start + arc.displacement(), epsilon = 1e-9);
}

#[test]
fn intermediate_rotations_stay_proper() {
    let mut block = RollAnimator::new(0.5, 1.0, 1.5);
    block.request_roll(WorldAxis::Z, Sign::Negative);
    while block.is_rolling() {
        let pose = block.step(0.7);
        assert_relative_eq!(pose.rotation.determinant(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pose.rotation.transpose() * pose.rotation, Matrix3::identity(), epsilon = 1e-12);
    }
    assert_eq!(block.pose().rotation, block.orientation_matrix());
}

#[test]
fn only_one_roll_at_a_time() {
    let mut block = RollAnimator::new(1.0, 2.0, 3.0);
    assert!(block.request_roll(WorldAxis::X, Sign::Negative));
    block.step(3.0);
    let angle = block.arc_angle();
    let edge = block.pending_edge();

    assert!(!block.request_roll(WorldAxis::Y, Sign::Positive));
    assert_eq!(block.arc_angle(), angle);
    assert_eq!(block.pending_edge(), edge);

    finish_roll(&mut block);
    assert!(block.request_roll(WorldAxis::Y, Sign::Positive));
}

#[test]
fn zero_steps_are_exact_queries() {
    let mut block = RollAnimator::new(1.0, 2.0, 3.0);
    block.set_base_position(Vector3::new(1.0, 2.0, 3.0)).unwrap();

    let idle = block.step(0.0);
    assert_eq!(block.step(0.0), idle);

    block.request_roll(WorldAxis::X, Sign::Positive);
    block.step(7.3);
    let rolling = block.step(0.0);
    for _ in 0..10 {
        assert_eq!(block.step(0.0), rolling);
    }
    assert!(block.is_rolling());
}

#[test]
fn four_rolls_come_full_circle() {
    let mut block = RollAnimator::new(1.0, 2.0, 3.0);
    for _ in 0..4 {
        assert!(block.request_roll(WorldAxis::X, Sign::Positive));
        finish_roll(&mut block);
    }
    assert_eq!(block.current_orientation(), Orientation::BASE);
    assert_relative_eq!(block.position(), Vector3::new(0.0, 20.0, 0.0), epsilon = 1e-9);
}

#[test]
fn rolling_back_returns_home() {
    let mut block = RollAnimator::new(1.0, 2.0, 3.0);
    let moves = [
        (WorldAxis::X, Sign::Positive),
        (WorldAxis::Y, Sign::Negative),
        (WorldAxis::Z, Sign::Positive),
        (WorldAxis::Y, Sign::Positive),
    ];
    for (axis, sign) in moves {
        block.request_roll(axis, sign);
        finish_roll(&mut block);
    }
    for (axis, sign) in moves.iter().rev() {
        block.request_roll(*axis, sign.flip());
        finish_roll(&mut block);
    }
    assert_eq!(block.current_orientation(), Orientation::BASE);
    assert_relative_eq!(block.position(), Vector3::zeros(), epsilon = 1e-9);
}

#[test]
fn faster_roll_speed_finishes_sooner() {
    let mut block = RollAnimator::new(1.0, 1.0, 1.0);
    block.set_roll_speed(0.5).unwrap();
    block.request_roll(WorldAxis::Y, Sign::Positive);
    assert_eq!(finish_roll(&mut block), 1);

    block.request_roll(WorldAxis::Y, Sign::Positive);
    assert_eq!(block.set_roll_speed(0.0), Err(RollError::InvalidRollSpeed(0.0)));
    assert_eq!(
        block.set_base_position(Vector3::zeros()),
        Err(RollError::RollInProgress)
    );
}
