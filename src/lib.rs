//! Single-screen arcade shooter: game rules, screens and high-score storage.

pub mod compute;
pub mod config;
pub mod entities;
pub mod highscore;
pub mod layout;
pub mod screens;
