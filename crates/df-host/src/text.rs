//! Plain-text implementation of the host boundary.
//!
//! Documents are UTF-8 text files, edited entirely in memory between `open`
//! and `save`. Structure is positional: lines split on `\n`, paragraphs are
//! blank-line-delimited blocks, pages are form-feed-delimited. Formatting
//! has no native representation in plain text, so it is written as inline
//! annotation markers (`[[font=Arial]]...[[/font]]`).

use std::ops::Range;
use std::path::{Path, PathBuf};

use df_core::{BreakKind, Direction, Error, Landmark, MoveUnit, Result, SelectUnit, TextFormat};

use crate::{DocumentHost, DocumentSession};

/// Separator between merged documents and around inserted page breaks: a
/// form feed on its own line.
pub const PAGE_SEPARATOR: &str = "\n\u{000C}\n";

/// The bundled plain-text host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHost;

impl TextHost {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentHost for TextHost {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn DocumentSession>> {
        tracing::debug!(path = %path.display(), "opening document");
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::host("open", format!("{}: {e}", path.display())))?;
        Ok(Box::new(TextSession {
            path: path.to_path_buf(),
            text,
            sel: 0..0,
        }))
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        if inputs.is_empty() {
            return Err(Error::host("merge", "no input documents"));
        }
        tracing::debug!(count = inputs.len(), output = %output.display(), "merging documents");
        let mut parts = Vec::with_capacity(inputs.len());
        for input in inputs {
            let text = std::fs::read_to_string(input)
                .map_err(|e| Error::host("merge", format!("{}: {e}", input.display())))?;
            parts.push(text);
        }
        std::fs::write(output, parts.join(PAGE_SEPARATOR))
            .map_err(|e| Error::host("merge", format!("{}: {e}", output.display())))
    }
}

/// One open plain-text document.
struct TextSession {
    path: PathBuf,
    text: String,
    /// Byte range on char boundaries; `start == end` is the collapsed cursor.
    sel: Range<usize>,
}

impl TextSession {
    fn collapse(&mut self, pos: usize) {
        self.sel = pos..pos;
    }

    /// Start of the line containing `pos`.
    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map_or(0, |i| i + 1)
    }

    /// End of the line containing `pos` (the `\n` itself excluded).
    fn line_end(&self, pos: usize) -> usize {
        self.text[pos..].find('\n').map_or(self.text.len(), |i| pos + i)
    }

    /// Char column of `pos` within its line.
    fn column(&self, pos: usize) -> usize {
        self.text[self.line_start(pos)..pos].chars().count()
    }

    /// Byte offset `col` chars into the line starting at `line_start`,
    /// clamped to the line end.
    fn at_column(&self, line_start: usize, col: usize) -> usize {
        let end = self.line_end(line_start);
        let mut pos = line_start;
        for _ in 0..col {
            match self.text[pos..end].chars().next() {
                Some(c) => pos += c.len_utf8(),
                None => break,
            }
        }
        pos
    }

    /// Range of the block containing `pos` (or the next block when `pos`
    /// sits inside a separator), where blocks are delimited by `sep`.
    /// Separators are excluded from the range.
    fn block_at(&self, pos: usize, sep: &str) -> Range<usize> {
        let len = self.text.len();
        let mut start = 0;
        loop {
            let end = self.text[start..].find(sep).map_or(len, |i| start + i);
            if pos <= end {
                return start..end;
            }
            start = end + sep.len();
            if start >= len {
                return len..len;
            }
        }
    }
}

impl DocumentSession for TextSession {
    fn path(&self) -> &Path {
        &self.path
    }

    fn find(&mut self, text: &str, direction: Direction) -> Result<bool> {
        if text.is_empty() {
            return Ok(false);
        }
        match direction {
            Direction::Down => match self.text[self.sel.end..].find(text) {
                Some(i) => {
                    self.collapse(self.sel.end + i + text.len());
                    Ok(true)
                }
                None => Ok(false),
            },
            Direction::Up => match self.text[..self.sel.start].rfind(text) {
                Some(i) => {
                    self.collapse(i);
                    Ok(true)
                }
                None => Ok(false),
            },
        }
    }

    fn move_cursor(&mut self, unit: MoveUnit, direction: Direction, count: u32) -> Result<()> {
        let mut pos = match direction {
            Direction::Down => self.sel.end,
            Direction::Up => self.sel.start,
        };
        match unit {
            MoveUnit::Character => match direction {
                Direction::Down => {
                    let mut chars = self.text[pos..].chars();
                    for _ in 0..count {
                        match chars.next() {
                            Some(c) => pos += c.len_utf8(),
                            None => break,
                        }
                    }
                }
                Direction::Up => {
                    for _ in 0..count {
                        match self.text[..pos].chars().next_back() {
                            Some(c) => pos -= c.len_utf8(),
                            None => break,
                        }
                    }
                }
            },
            MoveUnit::Line => {
                let col = self.column(pos);
                let mut line_start = self.line_start(pos);
                match direction {
                    Direction::Down => {
                        for _ in 0..count {
                            let end = self.line_end(line_start);
                            if end == self.text.len() {
                                self.collapse(end);
                                return Ok(());
                            }
                            line_start = end + 1;
                        }
                    }
                    Direction::Up => {
                        for _ in 0..count {
                            if line_start == 0 {
                                self.collapse(0);
                                return Ok(());
                            }
                            line_start = self.line_start(line_start - 1);
                        }
                    }
                }
                pos = self.at_column(line_start, col);
            }
        }
        self.collapse(pos);
        Ok(())
    }

    fn jump_to(&mut self, landmark: Landmark) -> Result<()> {
        match landmark {
            Landmark::DocumentStart => self.collapse(0),
            Landmark::DocumentEnd => self.collapse(self.text.len()),
        }
        Ok(())
    }

    fn has_selection(&self) -> bool {
        self.sel.start < self.sel.end
    }

    fn insert_text(&mut self, text: &str) -> Result<()> {
        let at = self.sel.start;
        self.text.insert_str(at, text);
        self.collapse(at + text.len());
        Ok(())
    }

    fn insert_break(&mut self, kind: BreakKind) -> Result<()> {
        match kind {
            BreakKind::Paragraph => self.insert_text("\n\n"),
            BreakKind::Page => self.insert_text(PAGE_SEPARATOR),
        }
    }

    fn select_unit(&mut self, unit: SelectUnit) -> Result<bool> {
        let pos = self.sel.start;
        match unit {
            SelectUnit::Line => {
                let start = self.line_start(pos);
                self.sel = start..self.line_end(start);
                Ok(true)
            }
            SelectUnit::Paragraph => {
                self.sel = self.block_at(pos, "\n\n");
                Ok(true)
            }
            SelectUnit::Page => {
                self.sel = self.block_at(pos, "\u{000C}");
                Ok(true)
            }
            SelectUnit::Document => {
                self.sel = 0..self.text.len();
                Ok(true)
            }
            // Plain text has no tables.
            SelectUnit::Cell => Ok(false),
        }
    }

    fn select_match(&mut self, text: &str, direction: Direction) -> Result<bool> {
        if text.is_empty() {
            return Ok(false);
        }
        let found = match direction {
            Direction::Down => self.text[self.sel.end..].find(text).map(|i| self.sel.end + i),
            Direction::Up => self.text[..self.sel.start].rfind(text),
        };
        match found {
            Some(start) => {
                self.sel = start..start + text.len();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn select_through(&mut self, text: &str, direction: Direction) -> Result<bool> {
        if text.is_empty() {
            return Ok(false);
        }
        match direction {
            Direction::Down => match self.text[self.sel.end..].find(text) {
                Some(i) => {
                    let end = self.sel.end + i + text.len();
                    self.sel = self.sel.start..end;
                    Ok(true)
                }
                None => Ok(false),
            },
            Direction::Up => match self.text[..self.sel.start].rfind(text) {
                Some(i) => {
                    self.sel = i..self.sel.end;
                    Ok(true)
                }
                None => Ok(false),
            },
        }
    }

    fn replace_selection(&mut self, text: &str) -> Result<()> {
        let start = self.sel.start;
        self.text.replace_range(self.sel.clone(), text);
        self.sel = start..start + text.len();
        Ok(())
    }

    fn apply_format(&mut self, format: &TextFormat) -> Result<()> {
        let tag = match format {
            TextFormat::Font(_) => "font",
            TextFormat::Color(_) => "color",
            TextFormat::Alignment(_) => "align",
            TextFormat::LineSpacing(_) => "spacing",
        };
        let open = format!("[[{format}]]");
        let close = format!("[[/{tag}]]");
        let Range { start, end } = self.sel;
        self.text.insert_str(end, &close);
        self.text.insert_str(start, &open);
        // The whole annotated span stays selected, so stacked formats nest.
        self.sel = start..end + open.len() + close.len();
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "saving document");
        std::fs::write(&self.path, &self.text)
            .map_err(|e| Error::host("save", format!("{}: {e}", self.path.display())))
    }

    fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
