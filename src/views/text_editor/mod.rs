// Plain multi-line text area used while editing the inclusive text
//
// COORDINATES
// ===========
// The buffer is a flat Vec<char> and the cursor is a char index into it
// (0..=len). Lines are split on '\n' and then hard-wrapped to the viewport
// width into "visual rows". A logical line of n chars always produces
// n / width + 1 rows, so a cursor sitting right after a full row lands at
// column 0 of the next one instead of off the edge.

use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::theme::colors;
use crate::views::{cell_char, Rect};

const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct VisualRow {
    start: usize,
    len: usize,
}

pub struct TextArea {
    buffer: Vec<char>,
    cursor: usize,
    width: usize,
    scroll_y: usize,
}

impl TextArea {
    pub fn new(text: &str) -> Self {
        let buffer: Vec<char> = text.chars().collect();
        Self {
            cursor: buffer.len(),
            buffer,
            width: DEFAULT_WIDTH,
            scroll_y: 0,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Replace the contents, keeping the cursor where it was when possible
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.chars().collect();
        self.cursor = self.cursor.min(self.buffer.len());
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.buffer.len());
    }

    pub fn resize(&mut self, width: usize) {
        self.width = width.max(1);
    }

    pub fn scroll(&self) -> usize {
        self.scroll_y
    }

    pub fn set_scroll(&mut self, scroll_y: usize) {
        self.scroll_y = scroll_y.min(self.visual_rows().len().saturating_sub(1));
    }

    /// Put the cursor on the top visible row if it is scrolled out of view
    pub fn keep_cursor_in_view(&mut self, height: usize) {
        let rows = self.visual_rows();
        let (row, _) = self.cursor_position_in(&rows);
        if row < self.scroll_y || row >= self.scroll_y + height.max(1) {
            if let Some(top) = rows.get(self.scroll_y) {
                self.cursor = top.start;
            }
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.len());
    }

    pub fn move_up(&mut self) {
        let rows = self.visual_rows();
        let (row, col) = self.cursor_position_in(&rows);
        if row > 0 {
            self.cursor = Self::index_at(&rows, row - 1, col);
        }
    }

    pub fn move_down(&mut self) {
        let rows = self.visual_rows();
        let (row, col) = self.cursor_position_in(&rows);
        if row + 1 < rows.len() {
            self.cursor = Self::index_at(&rows, row + 1, col);
        }
    }

    pub fn move_home(&mut self) {
        let rows = self.visual_rows();
        let (row, _) = self.cursor_position_in(&rows);
        self.cursor = rows[row].start;
    }

    pub fn move_end(&mut self) {
        let rows = self.visual_rows();
        let (row, _) = self.cursor_position_in(&rows);
        self.cursor = rows[row].start + rows[row].len;
    }

    /// Apply an editing key. Returns true when the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Tab => {
                self.insert_char('\t');
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                false
            }
            KeyCode::Right => {
                self.move_right();
                false
            }
            KeyCode::Up => {
                self.move_up();
                false
            }
            KeyCode::Down => {
                self.move_down();
                false
            }
            KeyCode::Home => {
                self.move_home();
                false
            }
            KeyCode::End => {
                self.move_end();
                false
            }
            _ => false,
        }
    }

    /// (visual row, column) of the cursor at the current width
    pub fn cursor_position(&self) -> (usize, usize) {
        self.cursor_position_in(&self.visual_rows())
    }

    /// Place the cursor at a cell relative to the top-left of the viewport
    pub fn click(&mut self, column: usize, row: usize) {
        let rows = self.visual_rows();
        let row = self.scroll_y + row;
        self.cursor = if row < rows.len() {
            Self::index_at(&rows, row, column)
        } else {
            self.buffer.len()
        };
    }

    fn visual_rows(&self) -> Vec<VisualRow> {
        let width = self.width.max(1);
        let mut rows = Vec::new();
        let mut line_start = 0;
        for line in self.buffer.split(|&c| c == '\n') {
            let len = line.len();
            for i in 0..=len / width {
                let start = i * width;
                rows.push(VisualRow {
                    start: line_start + start,
                    len: (len - start).min(width),
                });
            }
            line_start += len + 1;
        }
        rows
    }

    fn cursor_position_in(&self, rows: &[VisualRow]) -> (usize, usize) {
        let width = self.width.max(1);
        rows.iter()
            .position(|r| {
                r.start <= self.cursor && self.cursor - r.start < width && self.cursor <= r.start + r.len
            })
            .map(|row| (row, self.cursor - rows[row].start))
            .unwrap_or((rows.len().saturating_sub(1), 0))
    }

    fn index_at(rows: &[VisualRow], row: usize, col: usize) -> usize {
        let r = rows[row];
        r.start + col.min(r.len)
    }

    fn ensure_cursor_visible(&mut self, height: usize) {
        let (row, _) = self.cursor_position();
        if row < self.scroll_y {
            self.scroll_y = row;
        } else if height > 0 && row >= self.scroll_y + height {
            self.scroll_y = row + 1 - height;
        }
    }

    pub fn render<W: Write>(&mut self, out: &mut W, area: Rect) -> io::Result<()> {
        self.resize(area.width as usize);
        self.ensure_cursor_visible(area.height as usize);

        let rows = self.visual_rows();
        let (cursor_row, cursor_col) = self.cursor_position_in(&rows);
        let width = area.width as usize;

        for y in 0..area.height {
            let row_idx = self.scroll_y + y as usize;
            execute!(out, MoveTo(area.x, area.y + y))?;

            let Some(row) = rows.get(row_idx) else {
                write!(out, "{:width$}", "", width = width)?;
                continue;
            };

            let text: String = self.buffer[row.start..row.start + row.len]
                .iter()
                .map(|&c| cell_char(c))
                .collect();

            if row_idx == cursor_row {
                let before: String = text.chars().take(cursor_col).collect();
                let at = text.chars().nth(cursor_col).unwrap_or(' ');
                let after: String = text.chars().skip(cursor_col + 1).collect();
                write!(out, "{}", before)?;
                execute!(
                    out,
                    SetBackgroundColor(colors::CURSOR_BG),
                    SetForegroundColor(colors::CURSOR_FG),
                    Print(at),
                    ResetColor
                )?;
                write!(out, "{}", after)?;
                let used = row.len.max(cursor_col + 1);
                write!(out, "{:pad$}", "", pad = width.saturating_sub(used))?;
            } else {
                write!(out, "{:<width$}", text, width = width)?;
            }
        }
        Ok(())
    }
}
