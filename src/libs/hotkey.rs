//! Process-wide toggle hotkey.
//!
//! The OS input hook (`rdev::listen`) blocks its thread forever and cannot be
//! torn down, so it is started at most once per process. What comes and goes
//! is the *subscription*: a [`HotkeySubscription`] guard that routes matched
//! chords into a channel while it is alive. Dropping the guard deregisters
//! it; raw events that arrive afterwards fall on the floor.
//!
//! Only one subscription may be live at a time, which rules out duplicate
//! toggles when the shell is torn down and rebuilt.
//!
//! The hook is passive: it observes key events and cannot swallow them. The
//! terminal has no default action bound to the chord, so nothing needs to be
//! suppressed.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use clap::ValueEnum;
use parking_lot::Mutex;
use rdev::{EventType, Key};
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// How many times the hook is restarted after `rdev::listen` fails.
const LISTEN_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("a hotkey subscription is already active")]
    AlreadySubscribed,
    #[error("the keyboard listener stopped after repeated failures")]
    ListenerStopped,
    #[error("failed to start the keyboard listener thread: {0}")]
    ListenerSpawn(#[from] std::io::Error),
}

/// Function key half of the chord.
#[derive(ValueEnum, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[value(rename_all = "UPPER")]
pub enum FunctionKey {
    F1,
    F2,
    #[default]
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl FunctionKey {
    pub fn key(self) -> Key {
        match self {
            FunctionKey::F1 => Key::F1,
            FunctionKey::F2 => Key::F2,
            FunctionKey::F3 => Key::F3,
            FunctionKey::F4 => Key::F4,
            FunctionKey::F5 => Key::F5,
            FunctionKey::F6 => Key::F6,
            FunctionKey::F7 => Key::F7,
            FunctionKey::F8 => Key::F8,
            FunctionKey::F9 => Key::F9,
            FunctionKey::F10 => Key::F10,
            FunctionKey::F11 => Key::F11,
            FunctionKey::F12 => Key::F12,
        }
    }
}

impl fmt::Display for FunctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Control plus one function key.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Chord {
    pub key: FunctionKey,
}

impl Chord {
    pub fn new(key: FunctionKey) -> Self {
        Self { key }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ctrl+{}", self.key)
    }
}

/// Sent once per completed chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyPressed;

/// Turns a stream of raw key events into chord matches.
///
/// Either control key counts. Auto-repeat of a held function key matches
/// only once, until the key is released.
#[derive(Debug, Clone)]
pub struct ChordDetector {
    chord: Chord,
    left_ctrl: bool,
    right_ctrl: bool,
    key_down: bool,
}

impl ChordDetector {
    pub fn new(chord: Chord) -> Self {
        Self {
            chord,
            left_ctrl: false,
            right_ctrl: false,
            key_down: false,
        }
    }

    pub fn chord(&self) -> Chord {
        self.chord
    }

    /// Feeds one raw event. Returns `true` when it completes the chord.
    pub fn feed(&mut self, event: &EventType) -> bool {
        let target = self.chord.key.key();
        match event {
            EventType::KeyPress(Key::ControlLeft) => self.left_ctrl = true,
            EventType::KeyRelease(Key::ControlLeft) => self.left_ctrl = false,
            EventType::KeyPress(Key::ControlRight) => self.right_ctrl = true,
            EventType::KeyRelease(Key::ControlRight) => self.right_ctrl = false,
            EventType::KeyPress(key) if *key == target => {
                let repeat = self.key_down;
                self.key_down = true;
                return !repeat && (self.left_ctrl || self.right_ctrl);
            }
            EventType::KeyRelease(key) if *key == target => self.key_down = false,
            _ => {}
        }
        false
    }
}

struct Subscriber {
    id: u64,
    detector: ChordDetector,
    sender: UnboundedSender<HotkeyPressed>,
}

/// Holds the single live subscriber and dispatches raw events to it.
pub struct HotkeyRegistry {
    slot: Mutex<Option<Subscriber>>,
    next_id: AtomicU64,
    listener_dead: AtomicBool,
}

impl Default for HotkeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeyRegistry {
    pub const fn new() -> Self {
        Self {
            slot: parking_lot::const_mutex(None),
            next_id: AtomicU64::new(1),
            listener_dead: AtomicBool::new(false),
        }
    }

    /// Claims the registry for `chord`.
    ///
    /// Fails while another guard is alive, or once the OS hook has given up.
    pub fn subscribe(&self, chord: Chord, sender: UnboundedSender<HotkeyPressed>) -> Result<HotkeySubscription<'_>, HotkeyError> {
        if self.is_listener_dead() {
            return Err(HotkeyError::ListenerStopped);
        }
        let mut slot = self.slot.lock();
        if slot.is_some() {
            return Err(HotkeyError::AlreadySubscribed);
        }
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Subscriber {
            id,
            detector: ChordDetector::new(chord),
            sender,
        });
        Ok(HotkeySubscription { registry: self, id })
    }

    /// Records that the OS hook exited for good. The live subscriber, if
    /// any, is dropped from the slot.
    pub fn mark_listener_dead(&self) {
        self.listener_dead.store(true, Ordering::SeqCst);
        *self.slot.lock() = None;
    }

    pub fn is_listener_dead(&self) -> bool {
        self.listener_dead.load(Ordering::SeqCst)
    }

    pub fn is_subscribed(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Routes one raw event. Returns `true` when a toggle was delivered.
    pub fn dispatch(&self, event: &EventType) -> bool {
        let mut slot = self.slot.lock();
        let Some(subscriber) = slot.as_mut() else {
            return false;
        };
        if !subscriber.detector.feed(event) {
            return false;
        }
        msg_debug!(Message::HotkeyMatched(subscriber.detector.chord().to_string()));
        subscriber.sender.send(HotkeyPressed).is_ok()
    }

    fn release(&self, id: u64) {
        let mut slot = self.slot.lock();
        if slot.as_ref().is_some_and(|subscriber| subscriber.id == id) {
            *slot = None;
        }
    }
}

/// Live hotkey registration. Deregisters on drop.
pub struct HotkeySubscription<'a> {
    registry: &'a HotkeyRegistry,
    id: u64,
}

impl Drop for HotkeySubscription<'_> {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

static REGISTRY: HotkeyRegistry = HotkeyRegistry::new();
static LISTENER: OnceLock<()> = OnceLock::new();

/// Subscribes to the process-wide hotkey and makes sure the OS hook runs.
pub fn register(chord: Chord, sender: UnboundedSender<HotkeyPressed>) -> Result<HotkeySubscription<'static>, HotkeyError> {
    let subscription = REGISTRY.subscribe(chord, sender)?;
    start_listener()?;
    Ok(subscription)
}

fn start_listener() -> Result<(), HotkeyError> {
    if LISTENER.get().is_some() {
        return Ok(());
    }
    std::thread::Builder::new().name("jiggler-hotkey".into()).spawn(|| {
        for attempt in 1..=LISTEN_ATTEMPTS {
            match rdev::listen(|event| {
                REGISTRY.dispatch(&event.event_type);
            }) {
                Ok(()) => break,
                Err(e) => {
                    msg_warning!(Message::HotkeyListenerFailed(format!("{:?}", e), attempt, LISTEN_ATTEMPTS));
                    if attempt < LISTEN_ATTEMPTS {
                        std::thread::sleep(Duration::from_secs(1));
                    }
                }
            }
        }
        REGISTRY.mark_listener_dead();
    })?;
    let _ = LISTENER.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_display() {
        assert_eq!(Chord::default().to_string(), "Ctrl+F3");
        assert_eq!(Chord::new(FunctionKey::F10).to_string(), "Ctrl+F10");
    }

    #[test]
    fn test_function_key_mapping() {
        assert_eq!(FunctionKey::F3.key(), Key::F3);
        assert_eq!(FunctionKey::F12.key(), Key::F12);
    }
}
