//! Drop-zone geometry

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Where a dragged node lands relative to the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    /// Immediately before the target, as its sibling.
    Before,
    /// Immediately after the target, as its sibling.
    After,
    /// As the target's new last child.
    Inside,
}

impl DropPosition {
    /// Returns the lowercase name of this position.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Inside => "inside",
        }
    }
}

impl fmt::Display for DropPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown drop position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drop position '{0}' (expected before, after or inside)")]
pub struct ParsePositionError(String);

impl FromStr for DropPosition {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "inside" => Ok(Self::Inside),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

/// Vertical extent of a rendered drop target.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DropBounds {
    /// Top edge, in the same coordinate space as the pointer.
    pub top: f32,
    /// Height of the target.
    pub height: f32,
}

impl DropBounds {
    pub const fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub const fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Classifies a pointer position over a target into a drop position.
///
/// The target is split into three equal horizontal bands: the top third means
/// [`DropPosition::Before`], the bottom third [`DropPosition::After`] and the
/// middle [`DropPosition::Inside`]. Band edges belong to `Inside`.
///
/// # Example
///
/// ```
/// use arbor_lib::dnd::resolve_drop_zone;
/// use arbor_lib::dnd::DropBounds;
/// use arbor_lib::dnd::DropPosition;
///
/// let bounds = DropBounds::new(0.0, 90.0);
/// assert_eq!(resolve_drop_zone(bounds, 10.0), DropPosition::Before);
/// assert_eq!(resolve_drop_zone(bounds, 45.0), DropPosition::Inside);
/// assert_eq!(resolve_drop_zone(bounds, 80.0), DropPosition::After);
/// ```
pub fn resolve_drop_zone(bounds: DropBounds, pointer_y: f32) -> DropPosition {
    let y = pointer_y - bounds.top;
    if y < bounds.height / 3.0 {
        DropPosition::Before
    } else if y > bounds.height * 2.0 / 3.0 {
        DropPosition::After
    } else {
        DropPosition::Inside
    }
}
