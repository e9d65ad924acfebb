// Side-by-side comparison of the original and the inclusive text
use crossterm::{
    cursor::MoveTo,
    event::KeyEvent,
    execute,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::debug_trace;
use crate::highlight::{Highlighter, Segment};
use crate::theme::{colors, InclusivoTheme};
use crate::types::{Change, DocumentSession, Side};
use crate::views::text_editor::TextArea;
use crate::views::{cell_char, render_panel_header, Rect};

pub const ORIGINAL_TITLE: &str = "Documento Original";
pub const INCLUSIVE_TITLE: &str = "Versión Inclusiva (Editable)";

/// A styled piece of one wrapped line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub change_id: Option<String>,
}

pub type Line = Vec<Run>;

/// Wrap segments to `width` columns, keeping each char's change id.
///
/// Explicit newlines always break; long lines are cut hard at the width.
/// Rows match the editor's: a full row always opens the next one, so a line
/// of exactly `width` chars takes two rows.
pub fn layout(segments: &[Segment<'_>], width: usize) -> Vec<Line> {
    let width = width.max(1);
    let mut lines: Vec<Line> = vec![Vec::new()];
    let mut column = 0;

    for segment in segments {
        for c in segment.text.chars() {
            if c == '\n' {
                lines.push(Vec::new());
                column = 0;
                continue;
            }
            let c = cell_char(c);
            let Some(line) = lines.last_mut() else { continue };
            match line.last_mut() {
                Some(run) if run.change_id.as_deref() == segment.change_id => run.text.push(c),
                _ => line.push(Run {
                    text: c.to_string(),
                    change_id: segment.change_id.map(str::to_string),
                }),
            }
            column += 1;
            if column == width {
                lines.push(Vec::new());
                column = 0;
            }
        }
    }
    lines
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EditMode {
    Highlighted,
    Editing,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    StartedEditing,
    StoppedEditing,
    MovedCursor,
}

struct Pane {
    side: Side,
    area: Rect,
    lines: Vec<Line>,
    scroll: usize,
}

impl Pane {
    fn new(side: Side) -> Self {
        Self {
            side,
            area: Rect::default(),
            lines: Vec::new(),
            scroll: 0,
        }
    }

    // One column of padding on each side, header on top
    fn content(&self) -> Rect {
        Rect::new(
            self.area.x.saturating_add(1),
            self.area.y.saturating_add(1),
            self.area.width.saturating_sub(2),
            self.area.height.saturating_sub(1),
        )
    }

    fn relayout(&mut self, highlighter: &Highlighter, text: &str) {
        let segments = highlighter.segments(text, self.side);
        self.lines = layout(&segments, self.content().width as usize);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.content().height as usize)
    }

    fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll as isize + delta;
        self.scroll = (target.max(0) as usize).min(self.max_scroll());
    }

    fn change_at(&self, column: u16, row: u16) -> Option<&str> {
        let content = self.content();
        if !content.contains(column, row) {
            return None;
        }
        let line = self.lines.get(self.scroll + (row - content.y) as usize)?;
        let x = (column - content.x) as usize;
        let mut start = 0;
        for run in line {
            let end = start + run.text.chars().count();
            if x < end {
                return run.change_id.as_deref();
            }
            start = end;
        }
        None
    }

    fn first_line_of(&self, id: &str) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.iter().any(|run| run.change_id.as_deref() == Some(id)))
    }

    fn center_on(&mut self, id: &str) {
        if let Some(line) = self.first_line_of(id) {
            let half = self.content().height as usize / 2;
            self.scroll = line.saturating_sub(half).min(self.max_scroll());
        }
    }

    fn render_lines<W: Write>(&self, out: &mut W, active: Option<&str>) -> io::Result<()> {
        let content = self.content();
        for y in 0..content.height {
            execute!(out, MoveTo(content.x, content.y + y))?;
            let mut used = 0;
            if let Some(line) = self.lines.get(self.scroll + y as usize) {
                for run in line {
                    match run.change_id.as_deref() {
                        Some(id) if Some(id) == active => execute!(
                            out,
                            SetBackgroundColor(colors::ACTIVE_BG),
                            SetForegroundColor(colors::ACTIVE_FG),
                            Print(&run.text),
                            ResetColor
                        )?,
                        Some(_) => execute!(
                            out,
                            SetBackgroundColor(colors::CHANGE_BG),
                            SetForegroundColor(colors::CHANGE_FG),
                            Print(&run.text),
                            ResetColor
                        )?,
                        None => execute!(
                            out,
                            SetForegroundColor(InclusivoTheme::text_secondary()),
                            Print(&run.text),
                            ResetColor
                        )?,
                    }
                    used += run.text.chars().count();
                }
            }
            write!(out, "{:pad$}", "", pad = (content.width as usize).saturating_sub(used))?;
        }
        Ok(())
    }
}

/// Two panes, cross-highlighting and the editable right side.
pub struct ComparisonView {
    changes: Vec<Change>,
    highlighter: Highlighter,
    original_text: String,
    modified_text: String,
    original: Pane,
    inclusive: Pane,
    editor: TextArea,
    mode: EditMode,
    active: Option<String>,
    area: Rect,
}

impl ComparisonView {
    pub fn new(session: &DocumentSession, area: Rect) -> Self {
        let mut view = Self {
            changes: session.changes.clone(),
            highlighter: Highlighter::new(&session.changes),
            original_text: session.original_text.clone(),
            modified_text: session.modified_text.clone(),
            original: Pane::new(Side::Original),
            inclusive: Pane::new(Side::Inclusive),
            editor: TextArea::new(&session.modified_text),
            mode: EditMode::Highlighted,
            active: None,
            area: Rect::default(),
        };
        view.set_area(area);
        view
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn modified_text(&self) -> &str {
        &self.modified_text
    }

    pub fn scroll(&self, side: Side) -> usize {
        match side {
            Side::Original => self.original.scroll,
            Side::Inclusive => self.inclusive.scroll,
        }
    }

    pub fn lines(&self, side: Side) -> &[Line] {
        match side {
            Side::Original => &self.original.lines,
            Side::Inclusive => &self.inclusive.lines,
        }
    }

    /// Lay the panes out in `area`; a no-op when nothing moved
    pub fn set_area(&mut self, area: Rect) {
        if area == self.area && !self.original.lines.is_empty() {
            return;
        }
        self.area = area;
        let left = area.width / 2;
        self.original.area = Rect::new(area.x, area.y, left, area.height);
        self.inclusive.area = Rect::new(
            area.x + left + 1,
            area.y,
            area.width.saturating_sub(left + 1),
            area.height,
        );
        self.original.relayout(&self.highlighter, &self.original_text);
        self.inclusive.relayout(&self.highlighter, &self.modified_text);
    }

    /// Pick up the session's text again; ignored while the user is typing
    pub fn sync(&mut self, modified_text: &str) {
        if self.mode == EditMode::Editing || modified_text == self.modified_text {
            return;
        }
        self.modified_text = modified_text.to_string();
        self.editor.set_text(modified_text);
        self.inclusive.relayout(&self.highlighter, &self.modified_text);
    }

    /// Mouse moved to (column, row). Returns true when the active change changed.
    pub fn hover(&mut self, column: u16, row: u16) -> bool {
        let under = self
            .original
            .change_at(column, row)
            .or_else(|| match self.mode {
                EditMode::Highlighted => self.inclusive.change_at(column, row),
                EditMode::Editing => None,
            })
            .map(str::to_string);

        if under == self.active {
            return false;
        }
        self.activate(under);
        true
    }

    fn activate(&mut self, id: Option<String>) {
        if let Some(id) = &id {
            debug_trace!("Activating {}", id);
            self.original.center_on(id);
            if self.mode == EditMode::Highlighted {
                self.inclusive.center_on(id);
            }
        }
        self.active = id;
    }

    /// Step the active change forward or back through the change list
    pub fn cycle(&mut self, forward: bool) {
        if self.changes.is_empty() {
            return;
        }
        let count = self.changes.len();
        let current = self
            .active
            .as_deref()
            .and_then(|id| self.changes.iter().position(|c| c.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        let id = self.changes[next].id.clone();
        self.activate(Some(id));
    }

    pub fn click(&mut self, column: u16, row: u16) -> ClickOutcome {
        let editor_area = self.inclusive.content();
        match self.mode {
            EditMode::Highlighted if self.inclusive.area.contains(column, row) => {
                self.start_editing();
                if editor_area.contains(column, row) {
                    self.editor.click((column - editor_area.x) as usize, (row - editor_area.y) as usize);
                }
                ClickOutcome::StartedEditing
            }
            EditMode::Editing if editor_area.contains(column, row) => {
                self.editor.click((column - editor_area.x) as usize, (row - editor_area.y) as usize);
                ClickOutcome::MovedCursor
            }
            EditMode::Editing if self.original.area.contains(column, row) => {
                self.stop_editing();
                ClickOutcome::StoppedEditing
            }
            _ => ClickOutcome::Ignored,
        }
    }

    pub fn start_editing(&mut self) {
        if self.mode == EditMode::Editing {
            return;
        }
        debug_trace!("Editing inclusive text");
        self.editor.set_text(&self.modified_text);
        self.editor.resize(self.inclusive.content().width as usize);
        // Both wrap the same way, so the editor opens on the rows that were showing
        self.editor.set_scroll(self.inclusive.scroll);
        self.editor.keep_cursor_in_view(self.inclusive.content().height as usize);
        self.active = None;
        self.mode = EditMode::Editing;
    }

    /// Leave the editor and highlight the edited text against the same changes
    pub fn stop_editing(&mut self) {
        if self.mode == EditMode::Highlighted {
            return;
        }
        self.modified_text = self.editor.text();
        self.inclusive.relayout(&self.highlighter, &self.modified_text);
        self.mode = EditMode::Highlighted;
    }

    /// Forward a key to the editor. Returns the new text when it changed.
    pub fn edit_key(&mut self, key: KeyEvent) -> Option<String> {
        if self.mode != EditMode::Editing || !self.editor.handle_key(key) {
            return None;
        }
        self.modified_text = self.editor.text();
        Some(self.modified_text.clone())
    }

    /// Wheel scrolling for whichever pane is under the mouse
    pub fn scroll_at(&mut self, column: u16, row: u16, delta: isize) {
        if self.original.area.contains(column, row) {
            self.original.scroll_by(delta);
        } else if self.inclusive.area.contains(column, row) && self.mode == EditMode::Highlighted {
            self.inclusive.scroll_by(delta);
        }
    }

    pub fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let editing = self.mode == EditMode::Editing;
        render_panel_header(out, self.original.area, ORIGINAL_TITLE, colors::HEADER_ORIGINAL, !editing)?;
        let (title, color) = if editing {
            (format!("{} - editando (Esc para terminar)", INCLUSIVE_TITLE), colors::HEADER_EDITING)
        } else {
            (INCLUSIVE_TITLE.to_string(), colors::HEADER_INCLUSIVE)
        };
        render_panel_header(out, self.inclusive.area, &title, color, editing)?;

        // Gutter between the panes
        let gutter = self.original.area.x + self.original.area.width;
        for y in self.area.y..self.area.y + self.area.height {
            execute!(
                out,
                MoveTo(gutter, y),
                SetForegroundColor(InclusivoTheme::text_dim()),
                Print("│"),
                ResetColor
            )?;
        }

        let active = self.active.as_deref();
        self.original.render_lines(out, active)?;
        if editing {
            self.editor.render(out, self.inclusive.content())?;
        } else {
            self.inclusive.render_lines(out, active)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{apply_changes, assign_ids};
    use crate::types::Suggestion;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn session(original: &str, pairs: &[(&str, &str)]) -> DocumentSession {
        let changes = assign_ids(pairs.iter().map(|(o, i)| Suggestion::new(*o, *i)).collect());
        DocumentSession {
            file_name: "informe.pdf".into(),
            original_text: original.into(),
            modified_text: apply_changes(original, &changes),
            changes,
        }
    }

    // 80x11 area: each pane is 40 wide (38 of text) with 10 content rows
    fn view(session: &DocumentSession) -> ComparisonView {
        ComparisonView::new(session, Rect::new(0, 0, 81, 11))
    }

    fn line_text(line: &Line) -> String {
        line.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn layout_wraps_and_keeps_change_ids() {
        let segments = [
            Segment::plain("ab"),
            Segment { text: "cdef", change_id: Some("change-0") },
            Segment::plain("g\nh"),
        ];
        let lines = layout(&segments, 3);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["abc", "def", "g", "h"]);
        assert_eq!(lines[0][1], Run { text: "c".into(), change_id: Some("change-0".into()) });
        assert_eq!(lines[1][0].change_id.as_deref(), Some("change-0"));
        assert_eq!(lines[1].len(), 1);
    }

    #[test]
    fn full_rows_match_the_editor() {
        let lines = layout(&[Segment::plain("abc\r\tdef")], 4);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["abc ", " def", ""]);

        let mut editor = TextArea::new("abcd");
        editor.resize(4);
        assert_eq!(layout(&[Segment::plain("abcd")], 4).len(), 2);
        assert_eq!(editor.cursor_position(), (1, 0));
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(layout(&[], 10), vec![Vec::<Run>::new()]);
    }

    #[test]
    fn hover_activates_the_change_on_both_sides() {
        let session = session("El ingeniero debe revisar.", &[("El ingeniero", "La persona ingeniera")]);
        let mut view = view(&session);

        // First content row of the left pane starts at column 1
        assert!(view.hover(3, 1));
        assert_eq!(view.active(), Some("change-0"));

        // Right pane, same change
        assert!(!view.hover(43, 1));
        assert_eq!(view.active(), Some("change-0"));

        // Plain text clears it
        assert!(view.hover(20, 1));
        assert_eq!(view.active(), None);
    }

    #[test]
    fn activation_centres_the_first_occurrence() {
        let mut original = "linea\n".repeat(30);
        original.push_str("los alumnos\n");
        original.push_str(&"linea\n".repeat(30));
        let session = session(&original, &[("los alumnos", "el alumnado")]);
        let mut view = view(&session);

        view.cycle(true);
        assert_eq!(view.active(), Some("change-0"));
        // Line 30 with 10 visible rows sits 5 rows down
        assert_eq!(view.scroll(Side::Original), 25);
        assert_eq!(view.scroll(Side::Inclusive), 25);
    }

    #[test]
    fn cycle_wraps_around() {
        let session = session("uno dos tres", &[("uno", "1"), ("dos", "2")]);
        let mut view = view(&session);
        view.cycle(false);
        assert_eq!(view.active(), Some("change-1"));
        view.cycle(true);
        assert_eq!(view.active(), Some("change-0"));
        view.cycle(true);
        assert_eq!(view.active(), Some("change-1"));
    }

    #[test]
    fn click_right_pane_starts_editing_and_left_stops() {
        let session = session("El ingeniero", &[("El ingeniero", "La persona ingeniera")]);
        let mut view = view(&session);

        assert_eq!(view.click(50, 3), ClickOutcome::StartedEditing);
        assert_eq!(view.mode(), EditMode::Editing);
        assert_eq!(view.click(50, 1), ClickOutcome::MovedCursor);
        assert_eq!(view.click(5, 5), ClickOutcome::StoppedEditing);
        assert_eq!(view.mode(), EditMode::Highlighted);
    }

    #[test]
    fn click_after_centring_edits_the_row_on_screen() {
        let original: Vec<String> = (0..40)
            .map(|i| if i == 30 { "los alumnos".to_string() } else { format!("linea {:02}", i) })
            .collect();
        let session = session(&original.join("\n"), &[("los alumnos", "el alumnado")]);
        let mut view = view(&session);

        view.cycle(true);
        assert_eq!(view.scroll(Side::Inclusive), 25);

        // First content row of the right pane
        assert_eq!(view.click(42, 1), ClickOutcome::StartedEditing);
        assert_eq!(view.editor.scroll(), 25);
        let at_cursor: String = view.editor.text().chars().skip(view.editor.cursor()).take(8).collect();
        assert_eq!(at_cursor, "linea 25");
    }

    #[test]
    fn edit_key_after_scrolling_keeps_the_view() {
        let original: Vec<String> = (0..40).map(|i| format!("linea {:02}", i)).collect();
        let session = session(&original.join("\n"), &[]);
        let mut view = view(&session);

        view.scroll_at(50, 5, 12);
        view.start_editing();
        assert_eq!(view.editor.scroll(), 12);
        let at_cursor: String = view.editor.text().chars().skip(view.editor.cursor()).take(8).collect();
        assert_eq!(at_cursor, "linea 12");
    }

    #[test]
    fn edits_propagate_and_rehighlight_on_exit() {
        let session = session("El ingeniero", &[("El ingeniero", "La persona ingeniera")]);
        let mut view = view(&session);
        view.start_editing();

        let text = view.edit_key(KeyEvent::new(KeyCode::Char('.'), KeyModifiers::NONE));
        assert_eq!(text.as_deref(), Some("La persona ingeniera."));
        assert_eq!(view.edit_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)), None);

        view.stop_editing();
        let right = view.lines(Side::Inclusive);
        assert_eq!(line_text(&right[0]), "La persona ingeniera.");
        assert_eq!(right[0][0].change_id.as_deref(), Some("change-0"));
    }

    #[test]
    fn sync_is_ignored_while_editing() {
        let session = session("El ingeniero", &[("El ingeniero", "La persona ingeniera")]);
        let mut view = view(&session);
        view.start_editing();
        view.sync("otra cosa");
        assert_eq!(view.modified_text(), "La persona ingeniera");

        view.stop_editing();
        view.sync("otra cosa");
        assert_eq!(view.modified_text(), "otra cosa");
        assert!(view.lines(Side::Inclusive)[0].iter().all(|r| r.change_id.is_none()));
    }

    #[test]
    fn hover_on_editor_does_not_activate() {
        let session = session("El ingeniero", &[("El ingeniero", "La persona ingeniera")]);
        let mut view = view(&session);
        view.start_editing();
        assert!(!view.hover(43, 1));
        assert_eq!(view.active(), None);
    }

    #[test]
    fn render_writes_both_titles() {
        let session = session("El ingeniero", &[("El ingeniero", "La persona ingeniera")]);
        let mut view = view(&session);
        let mut out = Vec::new();
        view.render(&mut out).unwrap();
        let screen = String::from_utf8_lossy(&out);
        assert!(screen.contains(ORIGINAL_TITLE));
        assert!(screen.contains(INCLUSIVE_TITLE));
        assert!(screen.contains("La persona ingeniera"));
    }
}
