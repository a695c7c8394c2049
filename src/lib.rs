//! Flashcard quiz over a Chinese vocabulary list kept in a Google Sheet.

pub mod config;
pub mod dataset;
pub mod logging;
pub mod mvi;
pub mod session;
pub mod source;
pub mod ui;
