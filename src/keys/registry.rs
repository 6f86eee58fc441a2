use std::collections::BTreeMap;

use crate::{
    keys::surface::{ElementId, Surface},
    pitch::pitch,
};

/// Physical keys the piano responds to.
///
/// `Semicolon` stands for the `;` key, whose character is not usable as a
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyId {
    A,
    W,
    S,
    E,
    D,
    F,
    T,
    G,
    Y,
    H,
    U,
    J,
    K,
    O,
    L,
    P,
    Semicolon,
}

impl KeyId {
    pub const ALL: [KeyId; 17] = [
        KeyId::A,
        KeyId::W,
        KeyId::S,
        KeyId::E,
        KeyId::D,
        KeyId::F,
        KeyId::T,
        KeyId::G,
        KeyId::Y,
        KeyId::H,
        KeyId::U,
        KeyId::J,
        KeyId::K,
        KeyId::O,
        KeyId::L,
        KeyId::P,
        KeyId::Semicolon,
    ];

    pub fn token(self) -> &'static str {
        match self {
            KeyId::A => "A",
            KeyId::W => "W",
            KeyId::S => "S",
            KeyId::E => "E",
            KeyId::D => "D",
            KeyId::F => "F",
            KeyId::T => "T",
            KeyId::G => "G",
            KeyId::Y => "Y",
            KeyId::H => "H",
            KeyId::U => "U",
            KeyId::J => "J",
            KeyId::K => "K",
            KeyId::O => "O",
            KeyId::L => "L",
            KeyId::P => "P",
            KeyId::Semicolon => "semicolon",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.token() == token)
    }

    /// Character printed on the physical key.
    pub fn symbol(self) -> char {
        match self {
            KeyId::Semicolon => ';',
            other => other.token().chars().next().unwrap_or('?'),
        }
    }
}

/// Static description of one playable key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyBinding {
    pub id: KeyId,
    /// Value of the element's `note` attribute.
    pub note_attr: &'static str,
    /// Musical note name, shared across octaves.
    pub note: &'static str,
    /// Semitones from A4.
    pub offset: i8,
}

const fn bind(id: KeyId, note_attr: &'static str, note: &'static str, offset: i8) -> KeyBinding {
    KeyBinding {
        id,
        note_attr,
        note,
        offset,
    }
}

/// Home row plays the white keys from C4 up to E5, the row above the black keys.
pub const DEFAULT_BINDINGS: [KeyBinding; 17] = [
    bind(KeyId::A, "C", "C", -9),
    bind(KeyId::W, "C#", "C#", -8),
    bind(KeyId::S, "D", "D", -7),
    bind(KeyId::E, "D#", "D#", -6),
    bind(KeyId::D, "E", "E", -5),
    bind(KeyId::F, "F", "F", -4),
    bind(KeyId::T, "F#", "F#", -3),
    bind(KeyId::G, "G", "G", -2),
    bind(KeyId::Y, "G#", "G#", -1),
    bind(KeyId::H, "A", "A", 0),
    bind(KeyId::U, "A#", "A#", 1),
    bind(KeyId::J, "B", "B", 2),
    bind(KeyId::K, "C2", "C", 3),
    bind(KeyId::O, "C#2", "C#", 4),
    bind(KeyId::L, "D2", "D", 5),
    bind(KeyId::P, "D#2", "D#", 6),
    bind(KeyId::Semicolon, "E2", "E", 7),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    pub id: KeyId,
    /// On-screen element, if the surface has one for this note.
    pub element: Option<ElementId>,
    pub note: &'static str,
    pub pitch_hz: f32,
}

/// Fixed table of playable keys, resolved against a surface once.
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    keys: BTreeMap<KeyId, Key>,
}

impl KeyRegistry {
    /// Registry of [`DEFAULT_BINDINGS`].
    pub fn build<S: Surface>(surface: &S) -> Self {
        Self::from_bindings(surface, &DEFAULT_BINDINGS)
    }

    /// Registry of `bindings`. Keys whose element is missing from the
    /// surface are kept with no element.
    pub fn from_bindings<S: Surface>(surface: &S, bindings: &[KeyBinding]) -> Self {
        let keys = bindings
            .iter()
            .map(|binding| {
                let element = surface.find_by_note(binding.note_attr);
                if element.is_none() {
                    log::debug!(
                        "no element with note=\"{}\" for key {}",
                        binding.note_attr,
                        binding.id.token()
                    );
                }
                let key = Key {
                    id: binding.id,
                    element,
                    note: binding.note,
                    pitch_hz: pitch(binding.offset as f32),
                };
                (binding.id, key)
            })
            .collect();

        Self { keys }
    }

    pub fn lookup(&self, id: KeyId) -> Option<&Key> {
        self.keys.get(&id)
    }

    pub fn lookup_token(&self, token: &str) -> Option<&Key> {
        KeyId::from_token(token).and_then(|id| self.lookup(id))
    }

    /// Key owning `element`, if any.
    pub fn key_for_element(&self, element: ElementId) -> Option<KeyId> {
        self.keys
            .values()
            .find(|key| key.element == Some(element))
            .map(|key| key.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.keys.values()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::surface::{Bounds, KeyColor, KeyElement, KeyboardSurface};

    #[test]
    fn every_default_key_resolves_on_the_piano_surface() {
        let surface = KeyboardSurface::piano();
        let registry = KeyRegistry::build(&surface);

        assert_eq!(registry.len(), 17);
        assert!(registry.iter().all(|key| key.element.is_some()));
    }

    #[test]
    fn pitches_come_from_offsets() {
        let registry = KeyRegistry::build(&KeyboardSurface::piano());

        let h = registry.lookup(KeyId::H).unwrap();
        assert_eq!(h.note, "A");
        assert!((h.pitch_hz - 440.0).abs() < 1e-3);

        let semi = registry.lookup_token("semicolon").unwrap();
        assert_eq!(semi.note, "E");
        assert!((semi.pitch_hz - 659.255).abs() < 1e-2);
    }

    #[test]
    fn note_labels_repeat_across_octaves() {
        let registry = KeyRegistry::build(&KeyboardSurface::piano());
        let a = registry.lookup(KeyId::A).unwrap();
        let k = registry.lookup(KeyId::K).unwrap();
        assert_eq!(a.note, k.note);
        assert_ne!(a.element, k.element);
        assert!((k.pitch_hz / a.pitch_hz - 2.0).abs() < 1e-4);
    }

    #[test]
    fn missing_elements_are_tolerated() {
        let mut surface = KeyboardSurface::new();
        surface.push(KeyElement::new("A", KeyColor::White, Bounds::default()));
        let registry = KeyRegistry::build(&surface);

        assert_eq!(registry.len(), 17);
        assert_eq!(registry.lookup(KeyId::H).unwrap().element, Some(0));
        assert_eq!(registry.lookup(KeyId::A).unwrap().element, None);
        assert_eq!(registry.key_for_element(0), Some(KeyId::H));
    }

    #[test]
    fn tokens_round_trip() {
        for id in KeyId::ALL {
            assert_eq!(KeyId::from_token(id.token()), Some(id));
        }
        assert_eq!(KeyId::from_token(";"), None);
        assert_eq!(KeyId::Semicolon.symbol(), ';');
        assert_eq!(KeyId::W.symbol(), 'W');
    }

    #[test]
    fn unknown_tokens_are_absent() {
        let registry = KeyRegistry::build(&KeyboardSurface::piano());
        assert!(registry.lookup_token("Z").is_none());
        assert!(registry.lookup_token("").is_none());
    }
}
