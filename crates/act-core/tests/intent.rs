use act_core::{Capability, FireIntention, Intentions, MoveIntention, Vec2};

#[test]
fn capabilities_select_which_records_exist() {
    let intentions = Intentions::with_capabilities(&[Capability::Move, Capability::Fire]);
    assert!(intentions.has(Capability::Move));
    assert!(intentions.has(Capability::Fire));
    assert!(!intentions.has(Capability::Throw));
    assert!(!intentions.has(Capability::Melee));

    let all = Intentions::all();
    assert!(Capability::ALL.iter().all(|c| all.has(*c)));
}

#[test]
fn one_shot_requests_are_consumed_on_read() {
    let mut fire = FireIntention::default();
    fire.request_once(Vec2::Y);
    assert_eq!(fire.take_once(), Some(Vec2::Y));
    assert_eq!(fire.take_once(), None);

    let mut intentions = Intentions::all();
    let throw = intentions.throw.as_mut().unwrap();
    throw.request(Vec2::X, 4.0);
    assert_eq!(throw.take(), Some((Vec2::X, 4.0)));
    assert_eq!(throw.take(), None);

    let melee = intentions.melee.as_mut().unwrap();
    melee.request(-Vec2::X);
    assert_eq!(melee.take(), Some(-Vec2::X));
    assert_eq!(melee.take(), None);
}

#[test]
fn pattern_directions_drain_every_read() {
    let mut fire = FireIntention::default();
    fire.directions.push(Vec2::X);
    fire.directions.push(Vec2::Y);
    assert_eq!(fire.drain_directions(), vec![Vec2::X, Vec2::Y]);
    assert!(fire.drain_directions().is_empty());
}

#[test]
fn jump_is_taken_once_and_zero_means_none() {
    let mut movement = MoveIntention {
        jump_impulse: 7.5,
        ..MoveIntention::default()
    };
    assert_eq!(movement.take_jump(), Some(7.5));
    assert_eq!(movement.take_jump(), None);
}

#[test]
fn reset_zeroes_records_but_keeps_capabilities() {
    let mut intentions = Intentions::all();
    intentions.movement.as_mut().unwrap().velocity = Vec2::new(1.0, 2.0);
    let fire = intentions.fire.as_mut().unwrap();
    fire.hold = true;
    fire.directions.push(Vec2::X);

    intentions.reset();

    assert_eq!(intentions.movement, Some(MoveIntention::default()));
    assert_eq!(intentions.fire, Some(FireIntention::default()));
    assert!(intentions.has(Capability::Throw));
}
