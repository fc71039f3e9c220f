mod support;

use rstest::rstest;

use space_inflators::entities::{RIGHT_COLUMN, TOP_ROW};
use space_inflators::{Cell, EntityKind, Key, Side, SoundEvent, PLAYER_START};

use support::Harness;

fn player_shots(h: &Harness) -> Vec<(EntityKind, Cell)> {
    h.world
        .entities()
        .filter(|(_, e)| e.projectile().is_some_and(|p| p.side == Side::Player))
        .map(|(_, e)| (e.kind(), e.cell))
        .collect()
}

fn set_torpedoes(h: &mut Harness, torpedoes: u32) {
    if let Some(ship) = h.world.player_mut().ship_mut() {
        ship.torpedoes = torpedoes;
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[rstest]
#[case(Cell::new(15, 1), Key::Up, Cell::new(15, 2))]
#[case(Cell::new(15, 1), Key::Left, Cell::new(14, 1))]
#[case(Cell::new(0, 1), Key::Left, Cell::new(0, 1))]
#[case(Cell::new(RIGHT_COLUMN, 5), Key::Right, Cell::new(RIGHT_COLUMN, 5))]
#[case(Cell::new(15, 0), Key::Down, Cell::new(15, 0))]
#[case(Cell::new(15, TOP_ROW), Key::Up, Cell::new(15, TOP_ROW))]
fn movement_is_clipped_to_the_field(#[case] from: Cell, #[case] key: Key, #[case] to: Cell) {
    let mut h = Harness::quiet();
    h.world.player_mut().cell = from;
    h.keys.push(key);

    h.world.advance_tick();

    assert_eq!(h.world.player().cell, to);
}

#[test]
fn moving_resets_both_weapon_cooldowns() {
    let mut h = Harness::quiet();
    if let Some(ship) = h.world.player_mut().ship_mut() {
        ship.bullet_cooldown = true;
        ship.torpedo_cooldown = true;
    }
    h.keys.push(Key::Left);

    h.world.advance_tick();

    let ship = h.world.player().ship().copied();
    assert_eq!(ship.map(|s| (s.bullet_cooldown, s.torpedo_cooldown)), Some((false, false)));
}

#[test]
fn unknown_keys_do_nothing() {
    let mut h = Harness::quiet();
    h.keys.push(Key::Other(u32::from('x')));

    h.world.advance_tick();

    assert_eq!(h.world.player().cell, PLAYER_START);
    assert!(player_shots(&h).is_empty());
    assert!(h.sound.events().is_empty());
}

// ── Primary weapon ────────────────────────────────────────────────────────────

#[test]
fn bullet_spawns_above_the_ship_and_waits_a_tick() {
    let mut h = Harness::quiet();
    h.keys.push(Key::Fire);

    h.world.advance_tick();

    assert_eq!(
        player_shots(&h),
        vec![(EntityKind::Bullet, PLAYER_START.offset(0, 1))]
    );
    assert_eq!(h.sound.count(SoundEvent::PlayerFire), 1);

    h.world.advance_tick();
    assert_eq!(
        player_shots(&h),
        vec![(EntityKind::Bullet, PLAYER_START.offset(0, 2))]
    );
}

#[test]
fn holding_fire_shoots_every_other_tick() {
    let mut h = Harness::quiet();
    for _ in 0..4 {
        h.keys.push(Key::Fire);
    }
    for _ in 0..4 {
        h.world.advance_tick();
    }
    assert_eq!(h.sound.count(SoundEvent::PlayerFire), 2);
    assert_eq!(player_shots(&h).len(), 2);
}

#[test]
fn shot_fired_from_the_top_row_never_enters_the_field() {
    let mut h = Harness::quiet();
    h.world.player_mut().cell = Cell::new(15, TOP_ROW);
    h.keys.push(Key::Fire);

    h.world.advance_tick();

    assert!(player_shots(&h).is_empty());
    assert_eq!(h.sound.count(SoundEvent::PlayerFire), 1);
    assert!(h
        .world
        .entities()
        .all(|(_, e)| (0..=TOP_ROW).contains(&e.cell.y)));
}

// ── Secondary weapon ──────────────────────────────────────────────────────────

#[test]
fn torpedo_without_ammo_changes_nothing() {
    let mut h = Harness::quiet();
    set_torpedoes(&mut h, 0);
    h.keys.push(Key::Torpedo);

    h.world.advance_tick();

    assert!(player_shots(&h).is_empty());
    let ship = h.world.player().ship().copied();
    assert_eq!(ship.map(|s| s.torpedoes), Some(0));
    assert_eq!(ship.map(|s| s.torpedo_cooldown), Some(false));
    assert_eq!(h.sound.count(SoundEvent::PlayerTorpedo), 0);
}

#[test]
fn torpedo_consumes_ammo_and_blocks_the_next_tick() {
    let mut h = Harness::quiet();
    set_torpedoes(&mut h, 2);
    h.keys.push(Key::Torpedo);
    h.keys.push(Key::Torpedo);

    h.world.advance_tick();
    assert_eq!(
        player_shots(&h),
        vec![(EntityKind::Torpedo, PLAYER_START.offset(0, 1))]
    );
    assert_eq!(h.world.player().ship().map(|s| s.torpedoes), Some(1));

    h.world.advance_tick();
    assert_eq!(h.sound.count(SoundEvent::PlayerTorpedo), 1);
    assert_eq!(h.world.player().ship().map(|s| s.torpedoes), Some(1));
}

#[test]
fn torpedo_clears_a_pending_bullet_cooldown() {
    let mut h = Harness::quiet();
    set_torpedoes(&mut h, 1);
    h.keys.push(Key::Fire);
    h.keys.push(Key::Torpedo);
    h.keys.push(Key::Fire);

    for _ in 0..3 {
        h.world.advance_tick();
    }

    assert_eq!(h.sound.count(SoundEvent::PlayerFire), 2);
    assert_eq!(h.sound.count(SoundEvent::PlayerTorpedo), 1);
}

#[test]
fn scoreboard_reports_torpedo_stock() {
    let mut h = Harness::quiet();
    set_torpedoes(&mut h, 7);
    h.world.advance_tick();
    let status = h.status.last().unwrap_or_default();
    assert!(status.contains("Torpedoes: 007"), "status = {status}");
}
