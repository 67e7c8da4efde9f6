//! # Jiggler - sandboxed presence simulator
//!
//! Periodically performs a "fake activity" inside a virtual activity area:
//! a simulated cursor jiggles, a simulated foreground window switches, or
//! both. Nothing here touches the real cursor or real windows.
//!
//! ## Features
//!
//! - **Structured interval**: hours, minutes, seconds and milliseconds
//! - **Operation modes**: jiggle, switch or hybrid
//! - **Auto-stop**: optional bound on the length of a run
//! - **Global hotkey**: Ctrl+F3 toggles the run from anywhere
//! - **Virtual clock**: deterministic simulation for tests and `simulate`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jiggler::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
