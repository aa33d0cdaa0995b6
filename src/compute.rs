//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `SessionState` (and, where needed, an RNG handle) and returns a brand-new
//! `SessionState`.  Side effects are limited to the injected RNG; sounds are
//! reported through `SessionState::cues` for the frontend to play.

use rand::Rng;

use crate::entities::{
    Bullet, Enemy, HeldKeys, Player, Rect, SessionState, SessionStatus, SoundCue, BULLET_SIZE,
    BULLET_SPEED, ENEMY_SIZE, ENEMY_SPAWN_X, ENEMY_SPAWN_Y, ENEMY_SPEED_RANGE, PLAYER_BOTTOM_OFFSET,
    PLAYER_SIZE, PLAYER_SPEED, SCORE_PER_KILL, SCREEN_HEIGHT, SCREEN_WIDTH,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh enemy somewhere above the top edge with a random fall speed.
pub fn spawn_enemy(rng: &mut impl Rng) -> Enemy {
    let x = rng.gen_range(ENEMY_SPAWN_X.0..=ENEMY_SPAWN_X.1);
    let y = rng.gen_range(ENEMY_SPAWN_Y.0..=ENEMY_SPAWN_Y.1);
    let speed = rng.gen_range(ENEMY_SPEED_RANGE.0..=ENEMY_SPEED_RANGE.1);
    Enemy {
        rect: Rect::new(x, y, ENEMY_SIZE.0, ENEMY_SIZE.1),
        speed,
    }
}

/// Build the state for a new session: score 0, player bottom-centre and
/// `enemy_count` enemies waiting above the screen.
pub fn init_state(enemy_count: usize, respawn: bool, rng: &mut impl Rng) -> SessionState {
    SessionState {
        player: Player {
            rect: Rect::centered(
                SCREEN_WIDTH / 2,
                SCREEN_HEIGHT - PLAYER_BOTTOM_OFFSET,
                PLAYER_SIZE.0,
                PLAYER_SIZE.1,
            ),
        },
        bullets: Vec::new(),
        enemies: (0..enemy_count).map(|_| spawn_enemy(rng)).collect(),
        score: 0,
        status: SessionStatus::Playing,
        respawn,
        cues: Vec::new(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player_left(state: &SessionState) -> SessionState {
    let rect = state.player.rect;
    let x = (rect.x - PLAYER_SPEED).max(0);
    SessionState {
        player: Player { rect: Rect { x, ..rect } },
        ..state.clone()
    }
}

pub fn move_player_right(state: &SessionState) -> SessionState {
    let rect = state.player.rect;
    let x = (rect.x + PLAYER_SPEED).min(SCREEN_WIDTH - rect.w);
    SessionState {
        player: Player { rect: Rect { x, ..rect } },
        ..state.clone()
    }
}

/// Apply both held directions; holding left and right together cancels out.
pub fn move_player(state: &SessionState, held: HeldKeys) -> SessionState {
    let mut next = state.clone();
    if held.left {
        next = move_player_left(&next);
    }
    if held.right {
        next = move_player_right(&next);
    }
    next
}

/// Fire one bullet from the player's top-centre.
pub fn player_shoot(state: &SessionState) -> SessionState {
    let p = &state.player.rect;
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        rect: Rect::centered(p.center_x(), p.top(), BULLET_SIZE.0, BULLET_SIZE.1),
    });
    let mut cues = state.cues.clone();
    cues.push(SoundCue::Shoot);
    SessionState {
        bullets,
        cues,
        ..state.clone()
    }
}

// ── Per-frame steps ─────────────────────────────────────────────────────────

/// Move every bullet up and drop those whose bottom edge left the screen.
pub fn advance_bullets(state: &SessionState) -> SessionState {
    let bullets = state
        .bullets
        .iter()
        .filter_map(|b| {
            let rect = Rect { y: b.rect.y - BULLET_SPEED, ..b.rect };
            if rect.bottom() < 0 {
                None
            } else {
                Some(Bullet { rect })
            }
        })
        .collect();
    SessionState {
        bullets,
        ..state.clone()
    }
}

/// True once the enemy's top edge is strictly below the bottom of the screen.
pub fn enemy_escaped(enemy: &Enemy) -> bool {
    enemy.rect.top() > SCREEN_HEIGHT
}

/// Move every enemy down by its own speed.  Any enemy falling fully past
/// the bottom edge loses the session.
pub fn advance_enemies(state: &SessionState) -> SessionState {
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| Enemy {
            rect: Rect { y: e.rect.y + e.speed, ..e.rect },
            ..e.clone()
        })
        .collect();
    let status = if enemies.iter().any(enemy_escaped) {
        SessionStatus::Lost
    } else {
        state.status
    };
    SessionState {
        enemies,
        status,
        ..state.clone()
    }
}

/// Bullets ↔ enemies.
///
/// Bullets are visited in insertion order and each one destroys at most the
/// first overlapping enemy (in insertion order) that is still alive this
/// frame.  Every kill scores, removes the bullet and, when respawn is on,
/// appends one replacement enemy.
pub fn resolve_collisions(state: &SessionState, rng: &mut impl Rng) -> SessionState {
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_bullets: Vec<usize> = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !killed_enemies.contains(ei) && bullet.rect.intersects(&enemy.rect))
            .map(|(ei, _)| ei);
        if let Some(ei) = hit {
            killed_enemies.push(ei);
            used_bullets.push(bi);
        }
    }

    if killed_enemies.is_empty() {
        return state.clone();
    }

    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e.clone())
        .collect();
    if state.respawn {
        enemies.extend((0..killed_enemies.len()).map(|_| spawn_enemy(rng)));
    }

    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b.clone())
        .collect();

    let mut cues = state.cues.clone();
    cues.extend(killed_enemies.iter().map(|_| SoundCue::Explosion));

    SessionState {
        bullets,
        enemies,
        score: state
            .score
            .saturating_add(SCORE_PER_KILL.saturating_mul(killed_enemies.len() as u32)),
        cues,
        ..state.clone()
    }
}

// ── Per-frame tick (RNG injected) ───────────────────────────────────────────

/// Advance the simulation by one frame after input has been applied:
/// bullets, enemies (loss check), collisions, then the win check.
/// A finished session is returned unchanged.
pub fn tick(state: &SessionState, rng: &mut impl Rng) -> SessionState {
    if state.status != SessionStatus::Playing {
        return state.clone();
    }

    let next = advance_bullets(state);
    let next = advance_enemies(&next);
    if next.status == SessionStatus::Lost {
        return next;
    }

    let mut next = resolve_collisions(&next, rng);
    if next.enemies.is_empty() {
        next.status = SessionStatus::Won;
    }
    next
}
