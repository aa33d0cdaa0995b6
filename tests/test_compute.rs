use space_shooter::compute::*;
use space_shooter::entities::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_state() -> SessionState {
    SessionState {
        player: Player { rect: Rect::new(275, 715, 50, 50) },
        bullets: Vec::new(),
        enemies: Vec::new(),
        score: 0,
        status: SessionStatus::Playing,
        respawn: true,
        cues: Vec::new(),
    }
}

fn enemy_at(x: i32, y: i32, speed: i32) -> Enemy {
    Enemy { rect: Rect::new(x, y, 40, 40), speed }
}

fn bullet_at(x: i32, y: i32) -> Bullet {
    Bullet { rect: Rect::new(x, y, 10, 20) }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_player_bottom_centre() {
    let s = init_state(6, true, &mut seeded_rng());
    assert_eq!(s.player.rect.center_x(), 300);
    assert_eq!(s.player.rect.center_y(), 740);
    assert_eq!(s.player.rect.w, 50);
    assert_eq!(s.player.rect.h, 50);
}

#[test]
fn init_state_fresh_session() {
    let s = init_state(6, true, &mut seeded_rng());
    assert_eq!(s.enemies.len(), 6);
    assert!(s.bullets.is_empty());
    assert!(s.cues.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.status, SessionStatus::Playing);
    assert!(s.respawn);
}

#[test]
fn spawned_enemies_start_above_screen_within_ranges() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for e in init_state(6, true, &mut rng).enemies {
            assert!((50..=550).contains(&e.rect.x), "x = {}", e.rect.x);
            assert!((-100..=-40).contains(&e.rect.y), "y = {}", e.rect.y);
            assert!((2..=4).contains(&e.speed), "speed = {}", e.speed);
            assert_eq!((e.rect.w, e.rect.h), (40, 40));
        }
    }
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let s = make_state(); // x=275
    assert_eq!(move_player_left(&s).player.rect.x, 270);
}

#[test]
fn move_left_clamps_at_edge() {
    let mut s = make_state();
    s.player.rect.x = 3;
    assert_eq!(move_player_left(&s).player.rect.x, 0);
    s.player.rect.x = 0;
    assert_eq!(move_player_left(&s).player.rect.x, 0);
}

#[test]
fn move_right_normal() {
    let s = make_state();
    assert_eq!(move_player_right(&s).player.rect.x, 280);
}

#[test]
fn move_right_clamps_at_edge() {
    let mut s = make_state();
    s.player.rect.x = 548;
    assert_eq!(move_player_right(&s).player.rect.x, 550); // right edge = 600
    s.player.rect.x = 550;
    assert_eq!(move_player_right(&s).player.rect.x, 550);
}

#[test]
fn move_player_both_keys_cancel() {
    let s = make_state();
    let held = HeldKeys { left: true, right: true };
    assert_eq!(move_player(&s, held).player.rect.x, 275);
    assert_eq!(move_player(&s, HeldKeys::default()).player.rect.x, 275);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _ = move_player_left(&s);
    let _ = move_player_right(&s);
    assert_eq!(s.player.rect.x, 275);
}

#[test]
fn player_never_leaves_screen() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for _ in 0..2_000 {
        let held = HeldKeys { left: rng.gen_bool(0.5), right: rng.gen_bool(0.3) };
        s = move_player(&s, held);
        assert!(s.player.rect.left() >= 0);
        assert!(s.player.rect.right() <= SCREEN_WIDTH);
        assert_eq!(s.player.rect.y, 715);
    }
}

// ── shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shoot_spawns_bullet_at_player_top_centre() {
    let s = make_state();
    let s2 = player_shoot(&s);
    assert_eq!(s2.bullets.len(), 1);
    let b = &s2.bullets[0].rect;
    assert_eq!(b.center_x(), 300);
    assert_eq!(b.center_y(), 715);
    assert_eq!((b.w, b.h), (10, 20));
    assert_eq!(s2.cues, vec![SoundCue::Shoot]);
}

#[test]
fn shoot_has_no_bullet_cap() {
    let mut s = make_state();
    for _ in 0..10 {
        s = player_shoot(&s);
    }
    assert_eq!(s.bullets.len(), 10);
}

// ── bullets ───────────────────────────────────────────────────────────────────

#[test]
fn bullets_move_up_seven() {
    let mut s = make_state();
    s.bullets.push(bullet_at(295, 400));
    let s2 = advance_bullets(&s);
    assert_eq!(s2.bullets[0].rect.y, 393);
    assert_eq!(s2.bullets[0].rect.x, 295);
}

#[test]
fn bullet_removed_once_bottom_is_above_screen() {
    let mut s = make_state();
    // y=-13 → -20, bottom 0 → kept; y=-14 → -21, bottom -1 → dropped
    s.bullets.push(bullet_at(100, -13));
    s.bullets.push(bullet_at(200, -14));
    let s2 = advance_bullets(&s);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].rect.x, 100);
    assert_eq!(s2.bullets[0].rect.bottom(), 0);
}

#[test]
fn bullet_y_strictly_decreases_until_removed() {
    let mut s = make_state();
    s.bullets.push(bullet_at(295, 705));
    let mut last_y = 705;
    let mut ticks = 0;
    while !s.bullets.is_empty() {
        s = advance_bullets(&s);
        if let Some(b) = s.bullets.first() {
            assert_eq!(b.rect.y, last_y - 7);
            last_y = b.rect.y;
        }
        ticks += 1;
        assert!(ticks < 200);
    }
    assert!(last_y + 20 >= 0);
}

// ── enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_escape_boundary_is_strict() {
    assert!(!enemy_escaped(&enemy_at(100, 800, 2)));
    assert!(enemy_escaped(&enemy_at(100, 801, 2)));
}

#[test]
fn enemy_touching_bottom_does_not_lose() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 798, 2)); // → top 800
    let s2 = advance_enemies(&s);
    assert_eq!(s2.enemies[0].rect.y, 800);
    assert_eq!(s2.status, SessionStatus::Playing);

    let s3 = advance_enemies(&s2); // → top 802
    assert_eq!(s3.status, SessionStatus::Lost);
}

#[test]
fn enemy_y_increases_by_own_speed_every_tick() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, -50, 3));
    s.enemies.push(enemy_at(300, -60, 2));
    let mut rng = seeded_rng();
    while s.status == SessionStatus::Playing {
        let before: Vec<i32> = s.enemies.iter().map(|e| e.rect.y).collect();
        s = tick(&s, &mut rng);
        for (e, y) in s.enemies.iter().zip(before) {
            assert_eq!(e.rect.y, y + e.speed);
        }
    }
    assert_eq!(s.status, SessionStatus::Lost);
    assert!(s.enemies.iter().any(|e| e.rect.top() > SCREEN_HEIGHT));
}

// ── collisions ────────────────────────────────────────────────────────────────

#[test]
fn hit_removes_both_scores_and_respawns_one() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100, 2));
    s.bullets.push(bullet_at(110, 120));
    let s2 = resolve_collisions(&s, &mut seeded_rng());

    assert!(s2.bullets.is_empty());
    assert_eq!(s2.score, 10);
    assert_eq!(s2.enemies.len(), 1);
    let replacement = &s2.enemies[0];
    assert!(replacement.rect.y < 0, "replacement spawns above the screen");
    assert_eq!(s2.cues, vec![SoundCue::Explosion]);
}

#[test]
fn bullet_destroys_only_first_overlapping_enemy() {
    let mut s = make_state();
    s.respawn = false;
    s.enemies.push(enemy_at(100, 100, 2));
    s.enemies.push(enemy_at(105, 100, 3));
    s.bullets.push(bullet_at(110, 110));
    let s2 = resolve_collisions(&s, &mut seeded_rng());

    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.enemies[0].rect.x, 105);
    assert_eq!(s2.score, 10);
}

#[test]
fn enemy_destroyed_only_once_per_frame() {
    let mut s = make_state();
    s.respawn = false;
    s.enemies.push(enemy_at(100, 100, 2));
    s.bullets.push(bullet_at(105, 105));
    s.bullets.push(bullet_at(120, 110));
    let s2 = resolve_collisions(&s, &mut seeded_rng());

    assert!(s2.enemies.is_empty());
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.bullets[0].rect.x, 120);
    assert_eq!(s2.score, 10);
}

#[test]
fn grazing_bullet_misses() {
    let mut s = make_state();
    s.enemies.push(enemy_at(100, 100, 2));
    s.bullets.push(bullet_at(140, 110)); // touches the right edge only
    let s2 = resolve_collisions(&s, &mut seeded_rng());
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.enemies[0].rect.x, 100);
    assert_eq!(s2.score, 0);
    assert!(s2.cues.is_empty());
}

#[test]
fn score_saturates_instead_of_wrapping() {
    let mut s = make_state();
    s.respawn = false;
    s.score = u32::MAX - 5;
    s.enemies.push(enemy_at(100, 100, 2));
    s.enemies.push(enemy_at(300, 100, 2));
    s.bullets.push(bullet_at(110, 120));
    s.bullets.push(bullet_at(310, 120));
    let s2 = resolve_collisions(&s, &mut seeded_rng());

    assert!(s2.enemies.is_empty());
    assert_eq!(s2.score, u32::MAX);
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn clearing_six_enemies_without_respawn_wins_with_sixty() {
    let mut s = make_state();
    s.respawn = false;
    for i in 0..6 {
        let x = 50 + i * 80;
        s.enemies.push(enemy_at(x, 100, 2));
        s.bullets.push(bullet_at(x + 15, 120));
    }
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.enemies.is_empty());
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.score, 60);
    assert_eq!(s2.status, SessionStatus::Won);
    assert_eq!(s2.cues.len(), 6);
}

#[test]
fn respawn_keeps_field_populated() {
    let mut s = make_state();
    for i in 0..6 {
        let x = 50 + i * 80;
        s.enemies.push(enemy_at(x, 100, 2));
        s.bullets.push(bullet_at(x + 15, 120));
    }
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 6);
    assert_eq!(s2.score, 60);
    assert_eq!(s2.status, SessionStatus::Playing);
}

#[test]
fn escape_ends_session_and_skips_collisions() {
    let mut s = make_state();
    s.score = 30;
    s.enemies.push(enemy_at(100, 798, 4)); // → 802
    s.enemies.push(enemy_at(300, 300, 2));
    s.bullets.push(bullet_at(310, 330)); // would hit the second enemy
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, SessionStatus::Lost);
    assert_eq!(s2.score, 30);
    assert_eq!(s2.enemies.len(), 2);
}

#[test]
fn finished_session_is_frozen() {
    let mut s = make_state();
    s.status = SessionStatus::Lost;
    s.enemies.push(enemy_at(100, 100, 2));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.enemies[0].rect.y, 100);
    assert_eq!(s2.status, SessionStatus::Lost);
}
