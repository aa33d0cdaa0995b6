//! Screen state machine.
//!
//! One `App::step` call handles exactly one frame of the active screen:
//! it consumes that frame's input, advances whatever the screen owns and
//! decides the next screen.  The frontend owns the loop, the pacing and
//! the drawing; nothing here blocks.
//!
//! | Screen       | Leaves on                                              |
//! |--------------|--------------------------------------------------------|
//! | `MainMenu`   | Start → Playing, How to Play, High Scores, Exit        |
//! | `HowToPlay`  | any key → MainMenu                                     |
//! | `HighScores` | any key → MainMenu                                     |
//! | `Playing`    | enemy escapes → GameOver, field cleared → Victory      |
//! | `GameOver`   | Restart → Playing, Exit                                |
//! | `Victory`    | Restart → Playing, Exit                                |
//!
//! A quit event exits from every screen.

use rand::Rng;

use crate::compute::{init_state, move_player, player_shoot, tick};
use crate::config::GameConfig;
use crate::entities::{HeldKeys, Rect, SessionState, SessionStatus, SoundCue};
use crate::highscore::HighScoreStore;
use crate::layout::{
    button_at, button_for_digit, Button, ButtonAction, END_SCREEN_BUTTONS, MAIN_MENU_BUTTONS,
};

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Fire,
    Char(char),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyPress),
    /// Mouse click, carrying the logical area of the clicked cell.
    Click { area: Rect },
    /// Window close / Ctrl+C.
    Quit,
}

/// Input gathered for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

// ── Screens ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum Screen {
    MainMenu,
    HowToPlay,
    /// Value read from disk when the screen was opened.
    HighScores { high_score: u32 },
    Playing(SessionState),
    GameOver { score: u32 },
    Victory { score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

pub struct App {
    screen: Screen,
    config: GameConfig,
    store: HighScoreStore,
    /// Cached at startup, refreshed whenever a session ends.
    high_score: u32,
    cues: Vec<SoundCue>,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        let store = HighScoreStore::new(config.score_file.clone());
        let high_score = store.load();
        App {
            screen: Screen::MainMenu,
            config,
            store,
            high_score,
            cues: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Sounds produced since the last call.
    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    /// Run one frame of the active screen.
    pub fn step(&mut self, input: &FrameInput, rng: &mut impl Rng) -> Control {
        if input.events.contains(&InputEvent::Quit) {
            if let Screen::Playing(session) = &self.screen {
                let score = session.score;
                self.finish_session(score);
            }
            tracing::info!("quit requested");
            return Control::Exit;
        }

        let next = match &self.screen {
            Screen::MainMenu => match menu_choice(&input.events, &MAIN_MENU_BUTTONS) {
                Some(ButtonAction::Start) => Some(self.new_session(rng)),
                Some(ButtonAction::HowToPlay) => Some(Screen::HowToPlay),
                Some(ButtonAction::HighScores) => Some(Screen::HighScores {
                    high_score: self.store.load(),
                }),
                Some(ButtonAction::Exit) => return Control::Exit,
                Some(ButtonAction::Restart) | None => None,
            },
            Screen::HowToPlay | Screen::HighScores { .. } => {
                let dismissed = input
                    .events
                    .iter()
                    .any(|e| matches!(e, InputEvent::Key(_)));
                dismissed.then_some(Screen::MainMenu)
            }
            Screen::Playing(session) => {
                let session = play_frame(session, input, rng);
                Some(self.settle_session(session))
            }
            Screen::GameOver { .. } | Screen::Victory { .. } => {
                match menu_choice(&input.events, &END_SCREEN_BUTTONS) {
                    Some(ButtonAction::Restart) => Some(self.new_session(rng)),
                    Some(ButtonAction::Exit) => return Control::Exit,
                    _ => None,
                }
            }
        };

        if let Some(screen) = next {
            self.screen = screen;
        }
        Control::Continue
    }

    fn new_session(&self, rng: &mut impl Rng) -> Screen {
        tracing::info!(enemies = self.config.enemy_count, "session started");
        Screen::Playing(init_state(self.config.enemy_count, self.config.respawn, rng))
    }

    /// Collect a frame's sounds and leave Playing once the session is over.
    fn settle_session(&mut self, mut session: SessionState) -> Screen {
        self.cues.append(&mut session.cues);
        match session.status {
            SessionStatus::Playing => Screen::Playing(session),
            SessionStatus::Lost => {
                tracing::info!(score = session.score, "Game Over!");
                self.finish_session(session.score);
                Screen::GameOver { score: session.score }
            }
            SessionStatus::Won => {
                tracing::info!(score = session.score, "victory");
                self.finish_session(session.score);
                Screen::Victory { score: session.score }
            }
        }
    }

    fn finish_session(&mut self, score: u32) {
        if let Err(err) = self.store.save(score) {
            tracing::warn!("could not persist high score: {err:#}");
        }
        self.high_score = self.high_score.max(score);
    }
}

/// Fire for every fire press, move, then advance the simulation.
fn play_frame(session: &SessionState, input: &FrameInput, rng: &mut impl Rng) -> SessionState {
    let mut next = session.clone();
    for event in &input.events {
        if *event == InputEvent::Key(KeyPress::Fire) {
            next = player_shoot(&next);
        }
    }
    let next = move_player(&next, input.held);
    tick(&next, rng)
}

/// First button picked this frame, by click or by its digit.
fn menu_choice(events: &[InputEvent], buttons: &[Button]) -> Option<ButtonAction> {
    events.iter().find_map(|event| match *event {
        InputEvent::Click { area } => button_at(buttons, &area),
        InputEvent::Key(KeyPress::Char(c)) => button_for_digit(buttons, c),
        _ => None,
    })
}
