//! The on-screen keyboard as a tiny document.
//!
//! Elements carry a `note` attribute and a set of classes. The piano only
//! ever finds elements by attribute equality and toggles the [`PRESSED`]
//! class; how that looks is up to whoever draws the surface.

use std::collections::BTreeSet;

/// Index of an element within its surface.
pub type ElementId = usize;

/// Class marking a key as held down.
pub const PRESSED: &str = "pressed";

/// What the piano needs from a document of key elements.
pub trait Surface {
    /// First element whose `note` attribute equals `note`.
    fn find_by_note(&self, note: &str) -> Option<ElementId>;

    /// Topmost element covering terminal cell (`column`, `row`).
    fn element_at(&self, column: u16, row: u16) -> Option<ElementId>;

    fn add_class(&mut self, element: ElementId, class: &'static str);

    fn remove_class(&mut self, element: ElementId, class: &'static str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColor {
    White,
    Black,
}

/// Cell rectangle relative to the surface origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height)
    }
}

#[derive(Debug, Clone)]
pub struct KeyElement {
    note: String,
    color: KeyColor,
    bounds: Bounds,
    classes: BTreeSet<&'static str>,
}

impl KeyElement {
    pub fn new(note: impl Into<String>, color: KeyColor, bounds: Bounds) -> Self {
        Self {
            note: note.into(),
            color,
            bounds,
            classes: BTreeSet::new(),
        }
    }

    /// The `note` attribute.
    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn color(&self) -> KeyColor {
        self.color
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn is_pressed(&self) -> bool {
        self.has_class(PRESSED)
    }
}

pub const WHITE_KEY_WIDTH: u16 = 6;
pub const WHITE_KEY_HEIGHT: u16 = 9;
pub const BLACK_KEY_WIDTH: u16 = 4;
pub const BLACK_KEY_HEIGHT: u16 = 5;

/// White keys left to right, each paired with the black key to its right.
const PIANO_LAYOUT: [(&str, Option<&str>); 10] = [
    ("C", Some("C#")),
    ("D", Some("D#")),
    ("E", None),
    ("F", Some("F#")),
    ("G", Some("G#")),
    ("A", Some("A#")),
    ("B", None),
    ("C2", Some("C#2")),
    ("D2", Some("D#2")),
    ("E2", None),
];

/// Element store with terminal geometry.
///
/// Later elements are drawn over earlier ones, so hit testing walks the list
/// backwards.
#[derive(Debug, Clone, Default)]
pub struct KeyboardSurface {
    elements: Vec<KeyElement>,
    origin: (u16, u16),
}

impl KeyboardSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ten white keys from C to E2 with their black keys on top.
    pub fn piano() -> Self {
        let mut surface = Self::new();

        for (i, (white, _)) in PIANO_LAYOUT.iter().enumerate() {
            surface.push(KeyElement::new(
                *white,
                KeyColor::White,
                Bounds {
                    x: i as u16 * WHITE_KEY_WIDTH,
                    y: 0,
                    width: WHITE_KEY_WIDTH,
                    height: WHITE_KEY_HEIGHT,
                },
            ));
        }

        for (i, (_, black)) in PIANO_LAYOUT.iter().enumerate() {
            let Some(black) = black else { continue };
            // straddle the boundary with the next white key
            let x = (i as u16 + 1) * WHITE_KEY_WIDTH - BLACK_KEY_WIDTH / 2;
            surface.push(KeyElement::new(
                *black,
                KeyColor::Black,
                Bounds {
                    x,
                    y: 0,
                    width: BLACK_KEY_WIDTH,
                    height: BLACK_KEY_HEIGHT,
                },
            ));
        }

        surface
    }

    pub fn push(&mut self, element: KeyElement) -> ElementId {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn element(&self, id: ElementId) -> Option<&KeyElement> {
        self.elements.get(id)
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &KeyElement)> {
        self.elements.iter().enumerate()
    }

    /// Overall size in cells.
    pub fn size(&self) -> (u16, u16) {
        self.elements.iter().fold((0, 0), |(w, h), el| {
            let b = el.bounds;
            (w.max(b.x + b.width), h.max(b.y + b.height))
        })
    }

    /// Terminal cell where the surface's (0, 0) is drawn.
    pub fn set_origin(&mut self, x: u16, y: u16) {
        self.origin = (x, y);
    }

    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }
}

impl Surface for KeyboardSurface {
    fn find_by_note(&self, note: &str) -> Option<ElementId> {
        self.elements.iter().position(|el| el.note == note)
    }

    fn element_at(&self, column: u16, row: u16) -> Option<ElementId> {
        let (ox, oy) = self.origin;
        let x = column.checked_sub(ox)?;
        let y = row.checked_sub(oy)?;
        self.elements
            .iter()
            .rposition(|el| el.bounds.contains(x, y))
    }

    fn add_class(&mut self, element: ElementId, class: &'static str) {
        if let Some(el) = self.elements.get_mut(element) {
            el.classes.insert(class);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &'static str) {
        if let Some(el) = self.elements.get_mut(element) {
            el.classes.remove(class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|el| el.has_class(class))
    }
}
