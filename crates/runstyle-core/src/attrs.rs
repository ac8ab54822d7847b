//! Style attribute value types.
//!
//! A [`StyleAttrs`] describes how one contiguous range of characters is drawn:
//! optional foreground/background colors plus independent boolean flags. A
//! [`StyleRun`] pairs the attributes with a character count; an ordered list of
//! runs partitions a document into styled ranges.

/// A concrete color, resolvable to RGBA channel values.
///
/// Two colors are equal when their resolved channels are equal, regardless of
/// which variant carries them. `Rgb(r, g, b)` resolves with an opaque alpha, so
/// it equals `Rgba(r, g, b, 255)`.
#[derive(Debug, Clone, Copy)]
pub enum Color {
    /// A direct 8-bit RGB triple.
    Rgb(u8, u8, u8),
    /// An alpha-aware color with straight (unpremultiplied) alpha.
    Rgba(u8, u8, u8, u8),
}

impl Color {
    /// Resolved `(r, g, b, a)` channel values.
    pub fn channels(self) -> (u8, u8, u8, u8) {
        match self {
            Color::Rgb(r, g, b) => (r, g, b, u8::MAX),
            Color::Rgba(r, g, b, a) => (r, g, b, a),
        }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.channels() == other.channels()
    }
}

impl Eq for Color {}

/// Style attributes for a run of characters.
///
/// A `None` color means "use the default", which is distinct from every
/// concrete color: a run with no foreground never equals a run whose
/// foreground happens to match the renderer's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleAttrs {
    /// Foreground color, or `None` for the default.
    pub fg: Option<Color>,
    /// Background color, or `None` for the default.
    pub bg: Option<Color>,
    /// Bold text.
    pub bold: bool,
    /// Italic text.
    pub italic: bool,
    /// Hidden text (occupies space but is not drawn).
    pub hidden: bool,
}

impl StyleAttrs {
    /// Builder: set the foreground color.
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Builder: set the background color.
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Builder: set bold.
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic.
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set hidden.
    pub fn with_hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Check if this is the default (no styling).
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A contiguous range of characters sharing one style.
///
/// Runs carry only a length; a run's position is implied by the runs before it
/// in the owning store. A zero-length run is a transient state and never
/// persists in a [`SpanStore`](crate::SpanStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleRun {
    /// Character count covered by this run.
    pub len: usize,
    /// Attributes shared by every character in the run.
    pub attrs: StyleAttrs,
}

impl StyleRun {
    /// Create a new run.
    pub fn new(len: usize, attrs: StyleAttrs) -> Self {
        Self { len, attrs }
    }

    /// Create a run with default attributes.
    pub fn plain(len: usize) -> Self {
        Self {
            len,
            attrs: StyleAttrs::default(),
        }
    }
}
