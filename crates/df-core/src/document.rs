//! Document-domain enums shared by the host boundary and the pipeline.
//!
//! All enums serialize in lowercase (via `serde(rename_all = "lowercase")`)
//! and implement `Display` manually for consistent string representation.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction of a search or cursor motion, relative to the document flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the document start.
    Up,
    /// Toward the document end.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

// ---------------------------------------------------------------------------
// MoveUnit
// ---------------------------------------------------------------------------

/// Unit of a relative cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveUnit {
    Character,
    Line,
}

impl fmt::Display for MoveUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Line => write!(f, "line"),
        }
    }
}

// ---------------------------------------------------------------------------
// SelectUnit
// ---------------------------------------------------------------------------

/// Structural unit a selection can cover.
///
/// Not every unit is available in every document: `Cell` requires the cursor
/// to sit inside a table, which a host may not support at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectUnit {
    Line,
    Paragraph,
    Cell,
    Page,
    Document,
}

impl fmt::Display for SelectUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Paragraph => write!(f, "paragraph"),
            Self::Cell => write!(f, "cell"),
            Self::Page => write!(f, "page"),
            Self::Document => write!(f, "document"),
        }
    }
}

// ---------------------------------------------------------------------------
// Landmark
// ---------------------------------------------------------------------------

/// Absolute cursor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Landmark {
    #[serde(rename = "start")]
    DocumentStart,
    #[serde(rename = "end")]
    DocumentEnd,
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DocumentStart => write!(f, "start"),
            Self::DocumentEnd => write!(f, "end"),
        }
    }
}

// ---------------------------------------------------------------------------
// BreakKind
// ---------------------------------------------------------------------------

/// Kind of break an insert command can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    Paragraph,
    Page,
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph => write!(f, "paragraph"),
            Self::Page => write!(f, "page"),
        }
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

/// Paragraph alignment applied by formatting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Accepted spellings, in catalog order.
    pub const CHOICES: &'static [&'static str] = &["left", "center", "right", "justify"];

    /// Parse a lowercase alignment name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Center => write!(f, "center"),
            Self::Right => write!(f, "right"),
            Self::Justify => write!(f, "justify"),
        }
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// RGB color, written `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Parse `#RRGGBB` (leading `#` optional, hex digits case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ---------------------------------------------------------------------------
// TextFormat
// ---------------------------------------------------------------------------

/// A formatting change applied to the active selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// Font family name.
    Font(String),
    /// Font color.
    Color(Color),
    /// Paragraph alignment.
    Alignment(Alignment),
    /// Line spacing in tenths of a line (15 = 1.5 lines).
    LineSpacing(u32),
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Font(name) => write!(f, "font={name}"),
            Self::Color(c) => write!(f, "color={c}"),
            Self::Alignment(a) => write!(f, "align={a}"),
            Self::LineSpacing(n) => write!(f, "spacing={n}"),
        }
    }
}
