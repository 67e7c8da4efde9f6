//! Tracing subscriber setup.
//!
//! Structured logging is only switched on in debug mode (see
//! [`is_debug_mode`]). Outside debug mode the message macros print plain
//! lines and no subscriber is installed.

use crate::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "jiggler=debug";

/// Installs the global `fmt` subscriber. Safe to call more than once.
pub fn init() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
