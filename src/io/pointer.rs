use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::{
    keys::{registry::KeyId, surface::Surface},
    synth::{factory::VoiceFactory, piano::Piano},
};

/// Feeds mouse events into a piano.
///
/// A left press on a key element resumes the audio output and plays that
/// key. The release is global: wherever the button comes up, the last
/// clicked key is released. The last clicked key is remembered after the
/// release too, so a stray button-up releases it again.
#[derive(Debug, Default)]
pub struct PointerAdapter {
    clicked: Option<KeyId>,
}

impl PointerAdapter {
    pub fn new() -> Self {
        Self { clicked: None }
    }

    pub fn clicked(&self) -> Option<KeyId> {
        self.clicked
    }

    pub fn handle<S: Surface, F: VoiceFactory>(
        &mut self,
        event: &MouseEvent,
        piano: &mut Piano<S, F>,
        now: Instant,
    ) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(key) = piano.key_at(event.column, event.row) else {
                    return;
                };
                piano.resume_audio();
                piano.press_on(key);
                self.clicked = Some(key);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(key) = self.clicked {
                    piano.press_off(key, now);
                }
            }
            _ => {}
        }
    }
}
