//! Core library modules for the jiggler application.
//!
//! ## Layout
//!
//! - **Core**: `interval`, `settings`, `activity`, `random`, `timers`,
//!   `controller`
//! - **Input**: `hotkey`, `input`
//! - **Presentation**: `shell`, `view`, `messages`
//! - **Infrastructure**: `logging`
//!
//! ## Usage
//!
//! ```rust
//! use jiggler::libs::interval::Interval;
//!
//! assert_eq!(Interval::new(1, 0, 0, 0).total_milliseconds(), 3_600_000);
//! ```

pub mod activity;
pub mod controller;
pub mod hotkey;
pub mod input;
pub mod interval;
pub mod logging;
pub mod messages;
pub mod random;
pub mod settings;
pub mod shell;
pub mod timers;
pub mod view;
