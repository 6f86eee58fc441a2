use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::{
    keys::{registry::KeyId, surface::Surface},
    synth::{factory::VoiceFactory, piano::Piano},
};

/// Map a typed character to its key identifier.
///
/// Letters are case-insensitive; `;` maps to [`KeyId::Semicolon`].
pub fn normalize(c: char) -> Option<KeyId> {
    if c == ';' {
        return Some(KeyId::Semicolon);
    }
    let upper = c.to_ascii_uppercase();
    KeyId::ALL
        .into_iter()
        .find(|id| *id != KeyId::Semicolon && id.symbol() == upper)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down(KeyId),
    Up(KeyId),
}

/// Key action for a terminal key event, if it touches a piano key.
///
/// Auto-repeat arrives as `Down` and is absorbed by the piano.
pub fn translate(event: &KeyEvent) -> Option<KeyAction> {
    let KeyCode::Char(c) = event.code else {
        return None;
    };
    let key = normalize(c)?;
    match event.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(KeyAction::Down(key)),
        KeyEventKind::Release => Some(KeyAction::Up(key)),
    }
}

/// Feeds terminal key events into a piano.
///
/// Terminals that cannot report key-up get releases emulated: a key that has
/// seen no press or repeat for the hold window counts as released. The
/// window has to cover the gap before the first auto-repeat, so emulated
/// releases land late; see [`DEFAULT_HOLD_WINDOW`](crate::config::DEFAULT_HOLD_WINDOW).
#[derive(Debug, Default)]
pub struct KeyboardAdapter {
    emulation: Option<HoldEmulation>,
}

#[derive(Debug)]
struct HoldEmulation {
    window: Duration,
    last_seen: HashMap<KeyId, Instant>,
}

impl KeyboardAdapter {
    /// Adapter for terminals that report releases.
    pub fn new() -> Self {
        Self { emulation: None }
    }

    /// Adapter that synthesizes a release after `window` without repeats.
    pub fn with_emulated_release(window: Duration) -> Self {
        Self {
            emulation: Some(HoldEmulation {
                window,
                last_seen: HashMap::new(),
            }),
        }
    }

    pub fn emulates_release(&self) -> bool {
        self.emulation.is_some()
    }

    pub fn handle<S: Surface, F: VoiceFactory>(
        &mut self,
        event: &KeyEvent,
        piano: &mut Piano<S, F>,
        now: Instant,
    ) {
        match translate(event) {
            Some(KeyAction::Down(key)) => {
                if let Some(emulation) = &mut self.emulation {
                    emulation.last_seen.insert(key, now);
                }
                piano.press_on(key);
            }
            Some(KeyAction::Up(key)) => {
                if let Some(emulation) = &mut self.emulation {
                    emulation.last_seen.remove(&key);
                }
                piano.press_off(key, now);
            }
            None => {}
        }
    }

    /// Release keys whose hold window ran out. No-op without emulation.
    pub fn tick<S: Surface, F: VoiceFactory>(&mut self, piano: &mut Piano<S, F>, now: Instant) {
        let Some(emulation) = &mut self.emulation else {
            return;
        };
        let window = emulation.window;
        emulation.last_seen.retain(|key, seen| {
            if now.saturating_duration_since(*seen) >= window {
                piano.press_off(*key, now);
                false
            } else {
                true
            }
        });
    }
}
