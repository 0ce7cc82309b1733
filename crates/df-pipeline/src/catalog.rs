//! The action catalog: the static registry of every action the engine knows.
//!
//! Each entry couples an action id with its command category, the content
//! shape it accepts, and a builder that compiles a validated request into a
//! typed [`CommandKind`]. Building is validation: an id missing from the
//! catalog or content the builder rejects fails the whole build before any
//! document is touched.

use std::fmt;

use df_core::{
    ActionRequest, ActionValue, Alignment, BreakKind, Color, Direction, Error, Landmark, MoveUnit,
    Result, SelectUnit, TextFormat,
};

use crate::command::{
    Category, Command, CommandKind, InsertOp, LocateOp, MixingOp, SelectOp, UpdateOp,
};

// ---------------------------------------------------------------------------
// Content kinds
// ---------------------------------------------------------------------------

/// Shape of the `content` value an action accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Action takes no content; supplying one is a build error.
    None,
    /// Non-empty text.
    Text,
    /// Whole number greater than zero.
    PositiveInt,
    /// One of a fixed set of keywords.
    Choice(&'static [&'static str]),
    /// `#RRGGBB` color value.
    Color,
}

impl ContentKind {
    /// Expectation phrase used in build error messages.
    pub fn expectation(&self) -> String {
        match self {
            Self::None => "no content".to_string(),
            Self::Text => "non-empty text".to_string(),
            Self::PositiveInt => "a positive whole number".to_string(),
            Self::Choice(choices) => format!("one of: {}", choices.join(", ")),
            Self::Color => "a color in #RRGGBB form".to_string(),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Text => write!(f, "text"),
            Self::PositiveInt => write!(f, "positive integer"),
            Self::Choice(choices) => write!(f, "choice of {}", choices.join("|")),
            Self::Color => write!(f, "color"),
        }
    }
}

// ---------------------------------------------------------------------------
// Action specs
// ---------------------------------------------------------------------------

/// One catalog entry.
pub struct ActionSpec {
    /// Stable id used in scenarios and action lists.
    pub id: &'static str,
    /// Human-facing name used in logs and progress output.
    pub display_name: &'static str,
    /// Grouping category.
    pub category: Category,
    /// Content shape this action accepts.
    pub content: ContentKind,
    /// One-line description for `docforge actions`.
    pub description: &'static str,
    /// Compile a content value into the typed payload; `None` means the
    /// value does not fit [`ActionSpec::content`].
    build: fn(&ActionValue) -> Option<CommandKind>,
}

fn text_of(value: &ActionValue) -> Option<String> {
    value
        .as_text()
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn count_of(value: &ActionValue) -> Option<u32> {
    value
        .as_number()
        .filter(|n| (1..=i64::from(u32::MAX)).contains(n))
        .map(|n| n as u32)
}

static BUILTIN: &[ActionSpec] = &[
    ActionSpec {
        id: "search_forward",
        display_name: "Search Forward",
        category: Category::Locate,
        content: ContentKind::Text,
        description: "Find the next occurrence after the cursor and move there",
        build: |v| {
            Some(CommandKind::Locate(LocateOp::Search {
                text: text_of(v)?,
                direction: Direction::Down,
            }))
        },
    },
    ActionSpec {
        id: "search_backward",
        display_name: "Search Backward",
        category: Category::Locate,
        content: ContentKind::Text,
        description: "Find the previous occurrence before the cursor and move there",
        build: |v| {
            Some(CommandKind::Locate(LocateOp::Search {
                text: text_of(v)?,
                direction: Direction::Up,
            }))
        },
    },
    ActionSpec {
        id: "move_down_lines",
        display_name: "Move Down",
        category: Category::Locate,
        content: ContentKind::PositiveInt,
        description: "Move the cursor down by the given number of lines",
        build: |v| {
            Some(CommandKind::Locate(LocateOp::Move {
                unit: MoveUnit::Line,
                direction: Direction::Down,
                count: count_of(v)?,
            }))
        },
    },
    ActionSpec {
        id: "move_up_lines",
        display_name: "Move Up",
        category: Category::Locate,
        content: ContentKind::PositiveInt,
        description: "Move the cursor up by the given number of lines",
        build: |v| {
            Some(CommandKind::Locate(LocateOp::Move {
                unit: MoveUnit::Line,
                direction: Direction::Up,
                count: count_of(v)?,
            }))
        },
    },
    ActionSpec {
        id: "move_right_chars",
        display_name: "Move Right",
        category: Category::Locate,
        content: ContentKind::PositiveInt,
        description: "Move the cursor right by the given number of characters",
        build: |v| {
            Some(CommandKind::Locate(LocateOp::Move {
                unit: MoveUnit::Character,
                direction: Direction::Down,
                count: count_of(v)?,
            }))
        },
    },
    ActionSpec {
        id: "move_left_chars",
        display_name: "Move Left",
        category: Category::Locate,
        content: ContentKind::PositiveInt,
        description: "Move the cursor left by the given number of characters",
        build: |v| {
            Some(CommandKind::Locate(LocateOp::Move {
                unit: MoveUnit::Character,
                direction: Direction::Up,
                count: count_of(v)?,
            }))
        },
    },
    ActionSpec {
        id: "goto_document_start",
        display_name: "Go to Document Start",
        category: Category::Locate,
        content: ContentKind::None,
        description: "Collapse the cursor at the very beginning of the document",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Locate(LocateOp::Jump(Landmark::DocumentStart)))
        },
    },
    ActionSpec {
        id: "goto_document_end",
        display_name: "Go to Document End",
        category: Category::Locate,
        content: ContentKind::None,
        description: "Collapse the cursor at the very end of the document",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Locate(LocateOp::Jump(Landmark::DocumentEnd)))
        },
    },
    ActionSpec {
        id: "insert_text",
        display_name: "Insert Text",
        category: Category::Insert,
        content: ContentKind::Text,
        description: "Insert text at the cursor position",
        build: |v| Some(CommandKind::Insert(InsertOp::Text(text_of(v)?))),
    },
    ActionSpec {
        id: "insert_paragraph",
        display_name: "Insert Paragraph Break",
        category: Category::Insert,
        content: ContentKind::None,
        description: "Start a new paragraph at the cursor position",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Insert(InsertOp::Break(BreakKind::Paragraph)))
        },
    },
    ActionSpec {
        id: "insert_page_break",
        display_name: "Insert Page Break",
        category: Category::Insert,
        content: ContentKind::None,
        description: "Start a new page at the cursor position",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Insert(InsertOp::Break(BreakKind::Page)))
        },
    },
    ActionSpec {
        id: "select_line",
        display_name: "Select Line",
        category: Category::Select,
        content: ContentKind::None,
        description: "Select the line the cursor is on",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Select(SelectOp::Unit(SelectUnit::Line)))
        },
    },
    ActionSpec {
        id: "select_paragraph",
        display_name: "Select Paragraph",
        category: Category::Select,
        content: ContentKind::None,
        description: "Select the paragraph the cursor is in",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Select(SelectOp::Unit(SelectUnit::Paragraph)))
        },
    },
    ActionSpec {
        id: "select_table_cell",
        display_name: "Select Table Cell",
        category: Category::Select,
        content: ContentKind::None,
        description: "Select the table cell the cursor is in, if any",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Select(SelectOp::Unit(SelectUnit::Cell)))
        },
    },
    ActionSpec {
        id: "select_page",
        display_name: "Select Page",
        category: Category::Select,
        content: ContentKind::None,
        description: "Select the page the cursor is on",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Select(SelectOp::Unit(SelectUnit::Page)))
        },
    },
    ActionSpec {
        id: "select_document",
        display_name: "Select Document",
        category: Category::Select,
        content: ContentKind::None,
        description: "Select the entire document",
        build: |v| {
            v.is_empty()
                .then_some(CommandKind::Select(SelectOp::Unit(SelectUnit::Document)))
        },
    },
    ActionSpec {
        id: "search_and_select",
        display_name: "Search and Select",
        category: Category::Select,
        content: ContentKind::Text,
        description: "Find the next occurrence and select the match itself",
        build: |v| {
            Some(CommandKind::Select(SelectOp::Match {
                text: text_of(v)?,
                direction: Direction::Down,
            }))
        },
    },
    ActionSpec {
        id: "select_through",
        display_name: "Select Through",
        category: Category::Select,
        content: ContentKind::Text,
        description: "Extend the selection from the cursor through the next occurrence",
        build: |v| {
            Some(CommandKind::Select(SelectOp::Through {
                text: text_of(v)?,
                direction: Direction::Down,
            }))
        },
    },
    ActionSpec {
        id: "replace_text",
        display_name: "Replace Text",
        category: Category::Update,
        content: ContentKind::Text,
        description: "Replace the active selection with the given text",
        build: |v| Some(CommandKind::Update(UpdateOp::Replace(text_of(v)?))),
    },
    ActionSpec {
        id: "set_font",
        display_name: "Set Font",
        category: Category::Update,
        content: ContentKind::Text,
        description: "Set the font of the active selection",
        build: |v| {
            Some(CommandKind::Update(UpdateOp::Format(TextFormat::Font(
                text_of(v)?,
            ))))
        },
    },
    ActionSpec {
        id: "set_font_color",
        display_name: "Set Font Color",
        category: Category::Update,
        content: ContentKind::Color,
        description: "Set the font color of the active selection",
        build: |v| {
            let color = Color::parse(v.as_text()?)?;
            Some(CommandKind::Update(UpdateOp::Format(TextFormat::Color(
                color,
            ))))
        },
    },
    ActionSpec {
        id: "set_alignment",
        display_name: "Set Alignment",
        category: Category::Update,
        content: ContentKind::Choice(Alignment::CHOICES),
        description: "Set the paragraph alignment of the active selection",
        build: |v| {
            let alignment = Alignment::parse(v.as_text()?)?;
            Some(CommandKind::Update(UpdateOp::Format(
                TextFormat::Alignment(alignment),
            )))
        },
    },
    ActionSpec {
        id: "set_line_spacing",
        display_name: "Set Line Spacing",
        category: Category::Update,
        content: ContentKind::PositiveInt,
        description: "Set the line spacing of the active selection, in tenths",
        build: |v| {
            Some(CommandKind::Update(UpdateOp::Format(
                TextFormat::LineSpacing(count_of(v)?),
            )))
        },
    },
    ActionSpec {
        id: "merge_documents",
        display_name: "Merge Documents",
        category: Category::Mixing,
        content: ContentKind::None,
        description: "Combine every document in the working set into one",
        build: |v| v.is_empty().then_some(CommandKind::Mixing(MixingOp::Merge)),
    },
];

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Lookup surface over the registered actions.
pub struct Catalog {
    specs: &'static [ActionSpec],
}

impl Catalog {
    /// The built-in action set.
    pub fn builtin() -> Self {
        Self { specs: BUILTIN }
    }

    /// Look up a spec by id.
    pub fn get(&self, id: &str) -> Option<&'static ActionSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// All registered specs, in catalog order.
    pub fn specs(&self) -> &'static [ActionSpec] {
        self.specs
    }

    /// Compile one declared request into an executable [`Command`].
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAction`] if the id is not registered,
    /// [`Error::InvalidParameter`] if the content does not fit the action's
    /// declared [`ContentKind`].
    pub fn build(&self, request: &ActionRequest) -> Result<Command> {
        let spec = self
            .get(&request.action_id)
            .ok_or_else(|| Error::unknown_action(&request.action_id))?;

        let kind = (spec.build)(&request.content).ok_or_else(|| {
            Error::invalid_parameter(
                spec.id,
                "content",
                format!("expected {}", spec.content.expectation()),
            )
        })?;

        Ok(Command {
            action_id: spec.id,
            display_name: spec.display_name,
            content: request.content.clone(),
            kind,
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
