//! blockfall (workspace facade crate).
//!
//! The game logic, input mapping, renderer and audio live in dedicated crates under
//! `crates/`; this package re-exports them as `blockfall::{core,input,term,audio,types}` and
//! adds the pieces the binary wires together: configuration, the session log and the
//! frame-driven [`app::App`].

pub mod app;
pub mod config;
pub mod session_log;

pub use blockfall_audio as audio;
pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
