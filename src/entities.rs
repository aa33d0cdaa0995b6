//! Game entity types: pure data, no logic.

// ── Logical surface ───────────────────────────────────────────────────────────

/// Width of the fixed logical play surface.
pub const SCREEN_WIDTH: i32 = 600;
/// Height of the fixed logical play surface.
pub const SCREEN_HEIGHT: i32 = 800;

pub const PLAYER_SIZE: (i32, i32) = (50, 50);
pub const PLAYER_SPEED: i32 = 5;
/// Distance between the player's centre and the bottom edge at spawn.
pub const PLAYER_BOTTOM_OFFSET: i32 = 60;

pub const BULLET_SIZE: (i32, i32) = (10, 20);
pub const BULLET_SPEED: i32 = 7;

pub const ENEMY_SIZE: (i32, i32) = (40, 40);
/// Inclusive range of an enemy's per-tick fall speed.
pub const ENEMY_SPEED_RANGE: (i32, i32) = (2, 4);
/// Inclusive range of a freshly spawned enemy's left edge.
pub const ENEMY_SPAWN_X: (i32, i32) = (50, SCREEN_WIDTH - 50);
/// Inclusive range of a freshly spawned enemy's top edge (above the screen).
pub const ENEMY_SPAWN_Y: (i32, i32) = (-100, -40);

pub const SCORE_PER_KILL: u32 = 10;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in logical units.  `x`/`y` are the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Build a rect of the given size centred on `(cx, cy)`.
    pub fn centered(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect { x: cx - w / 2, y: cy - h / 2, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Strict overlap: rects that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }
}

// ── Player, bullets & enemies ─────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Downward movement per tick, fixed for the enemy's lifetime.
    pub speed: i32,
}

// ── Side effects ──────────────────────────────────────────────────────────────

/// A sound the frontend should play for this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Explosion,
}

// ── Session state ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    /// An enemy fell fully past the bottom edge.
    Lost,
    /// Every enemy on the field was destroyed.
    Won,
}

/// Which movement keys are held this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// Everything one play session owns.  Cloneable so the pure update
/// functions in `compute` can return a fresh copy.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub score: u32,
    pub status: SessionStatus,
    /// Spawn a replacement enemy for every kill.
    pub respawn: bool,
    /// Sounds emitted during the most recent frame.
    pub cues: Vec<SoundCue>,
}
