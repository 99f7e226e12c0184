mod common;

use act_core::{tags, Vec2};
use act_tree::{
    ActionNode, ActivationError, Aim, ConfigError, DriverStatus, MoveBy, Parallel, Script,
    ScriptDriver, Sequence, ShootSingle, Wait,
};

use common::{approx, ctx, Body, DT};

#[test]
fn missing_script_leaves_the_driver_idle() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::new(None);

    let err = driver.activate(&ctx(0, DT), &mut body, None).unwrap_err();

    assert_eq!(err, ActivationError::MissingScript);
    assert_eq!(driver.status(), DriverStatus::Idle);
    assert_eq!(driver.tick(&ctx(1, DT), &mut body), DriverStatus::Idle);
    assert!(body.trace.events.is_empty());
}

#[test]
fn override_replaces_the_default_for_one_activation() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::with_tree(Wait::new(10.0));
    let spawn_point = Script::Tree(ShootSingle::new(90.0, Aim::Forward).into());

    driver
        .activate(&ctx(0, DT), &mut body, Some(spawn_point))
        .unwrap();
    driver.tick(&ctx(1, DT), &mut body);
    assert!(approx(body.take_fire_once().unwrap(), Vec2::Y));
    assert_eq!(driver.tick(&ctx(2, DT), &mut body), DriverStatus::Finished);

    driver.activate(&ctx(3, DT), &mut body, None).unwrap();
    driver.tick(&ctx(4, DT), &mut body);
    assert_eq!(body.take_fire_once(), None);
    assert_eq!(driver.status(), DriverStatus::Running);
}

#[test]
fn reactivation_runs_the_default_script_from_scratch() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::with_tree(Wait::new(2.0 * DT));

    for round in 0..2u64 {
        let base = round * 10;
        driver.activate(&ctx(base, DT), &mut body, None).unwrap();
        assert_eq!(driver.tick(&ctx(base + 1, DT), &mut body), DriverStatus::Running);
        assert_eq!(driver.tick(&ctx(base + 2, DT), &mut body), DriverStatus::Running);
        assert_eq!(driver.tick(&ctx(base + 3, DT), &mut body), DriverStatus::Finished);
    }
    assert_eq!(body.trace.count(tags::NODE_START, 0), 2);
    assert_eq!(body.trace.count(tags::NODE_END, 0), 2);
}

#[test]
fn activating_while_running_stops_the_previous_script() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::with_tree(MoveBy::new(Vec2::new(100.0, 0.0), 2.0));
    driver.activate(&ctx(0, DT), &mut body, None).unwrap();
    driver.tick(&ctx(1, DT), &mut body);
    assert!(approx(body.velocity(), Vec2::new(2.0, 0.0)));

    driver.activate(&ctx(2, DT), &mut body, None).unwrap();

    assert_eq!(body.velocity(), Vec2::ZERO);
    assert_eq!(body.trace.count(tags::NODE_END, 0), 1);
    assert_eq!(
        body.trace
            .events
            .iter()
            .filter(|e| e.tag == tags::SCRIPT_STOP)
            .count(),
        1
    );
    assert!(driver.is_running());
}

#[test]
fn owner_deactivation_unwinds_the_whole_tree() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::with_tree(Parallel::new(vec![
        MoveBy::new(Vec2::new(100.0, 0.0), 3.0).into(),
        Sequence::new(vec![Wait::new(5.0).into()]).into(),
    ]));
    driver.activate(&ctx(0, DT), &mut body, None).unwrap();
    driver.tick(&ctx(1, DT), &mut body);
    driver.tick(&ctx(2, DT), &mut body);

    body.active = false;
    assert_eq!(driver.tick(&ctx(3, DT), &mut body), DriverStatus::Stopped);

    assert_eq!(body.velocity(), Vec2::ZERO);
    for id in 0..4 {
        assert_eq!(body.trace.count(tags::NODE_END, id), 1, "node {id}");
    }
    // Nothing runs after stopping.
    body.active = true;
    assert_eq!(driver.tick(&ctx(4, DT), &mut body), DriverStatus::Stopped);
    assert_eq!(body.trace.count(tags::NODE_END, 0), 1);
}

#[test]
fn stop_ends_active_nodes_once() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::with_tree(Sequence::new(vec![MoveBy::new(
        Vec2::new(0.0, 10.0),
        1.0,
    )
    .into()]));
    driver.activate(&ctx(0, DT), &mut body, None).unwrap();
    driver.tick(&ctx(1, DT), &mut body);

    driver.stop(&ctx(2, DT), &mut body);
    driver.stop(&ctx(3, DT), &mut body);

    assert_eq!(driver.status(), DriverStatus::Stopped);
    assert_eq!(body.velocity(), Vec2::ZERO);
    assert_eq!(body.trace.count(tags::NODE_END, 0), 1);
    assert_eq!(body.trace.count(tags::NODE_END, 1), 1);
}

#[test]
fn node_ids_are_assigned_in_pre_order() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::with_tree(Sequence::new(vec![
        Parallel::new(vec![Wait::new(1.0).into(), Wait::new(1.0).into()]).into(),
        Wait::new(1.0).into(),
    ]));

    let report = driver.activate(&ctx(0, DT), &mut body, None).unwrap();
    assert_eq!(report.node_count(), 5);
    assert!(report.is_clean());

    driver.tick(&ctx(1, DT), &mut body);
    assert_eq!(body.trace.nodes_tagged(tags::NODE_START), vec![0, 1, 2, 3]);
}

/// Per-tick velocities until the driver stops running.
fn velocity_trace(mut driver: ScriptDriver) -> Vec<Vec2> {
    let mut body = Body::default();
    driver.activate(&ctx(0, DT), &mut body, None).unwrap();
    let mut velocities = Vec::new();
    for tick in 1..=200 {
        if driver.tick(&ctx(tick, DT), &mut body) != DriverStatus::Running {
            break;
        }
        velocities.push(body.velocity());
    }
    velocities
}

#[test]
fn flat_sequence_matches_tree_sequence() {
    let leaves = || -> Vec<ActionNode> {
        vec![
            Wait::new(0.25).into(),
            MoveBy::new(Vec2::new(0.0, 1.0), 4.0).into(),
            MoveBy::new(Vec2::new(-1.0, 0.0), 6.0).into(),
        ]
    };

    let flat = velocity_trace(ScriptDriver::with_sequence(leaves()));
    let tree = velocity_trace(ScriptDriver::with_tree(Sequence::new(leaves())));

    assert!(!flat.is_empty());
    assert_eq!(flat, tree);
}

#[test]
fn flat_sequence_rejects_composites() {
    let mut body = Body::default();
    let mut driver = ScriptDriver::with_sequence(vec![
        Sequence::new(vec![Wait::new(1.0).into()]).into(),
        ShootSingle::new(0.0, Aim::Forward).into(),
    ]);

    let report = driver.activate(&ctx(0, DT), &mut body, None).unwrap();
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].node, 0);
    assert_eq!(
        report.faults[0].error,
        ConfigError::NestedInFlatSequence { kind: "sequence" }
    );

    driver.tick(&ctx(1, DT), &mut body);
    assert_eq!(body.take_fire_once(), Some(Vec2::X));
}
