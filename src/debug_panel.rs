// Full-screen view of the debug log buffer
use crossterm::{
    cursor::MoveTo,
    event::{MouseEvent, MouseEventKind},
    execute,
    style::{ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::logging::debug_logs;
use crate::theme::InclusivoTheme;
use crate::views::Rect;

pub struct DebugPanel {
    pub logs: Vec<String>,
    pub scroll_offset: usize,
    // Stick to the newest entry until the user scrolls up
    pub follow: bool,
    pub last_bounds: Option<Rect>,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugPanel {
    pub fn new() -> Self {
        Self {
            logs: Vec::new(),
            scroll_offset: 0,
            follow: true,
            last_bounds: None,
        }
    }

    /// Pull the current contents of the global log
    pub fn refresh(&mut self) {
        self.logs = debug_logs();
    }

    fn visible_rows(&self) -> usize {
        self.last_bounds.map(|b| b.height as usize).unwrap_or(10).max(1)
    }

    fn max_scroll(&self) -> usize {
        self.logs.len().saturating_sub(self.visible_rows())
    }

    pub fn render<W: Write>(&mut self, out: &mut W, area: Rect) -> io::Result<()> {
        self.last_bounds = Some(area);
        if self.follow {
            self.scroll_offset = self.max_scroll();
        }
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());

        for y in 0..area.height {
            execute!(out, MoveTo(area.x, area.y + y))?;
            let display: String = self
                .logs
                .get(self.scroll_offset + y as usize)
                .map(|log| log.chars().take(area.width as usize).collect())
                .unwrap_or_default();

            let color = if display.contains("ERROR:") {
                InclusivoTheme::error()
            } else if display.contains("WARN:") {
                InclusivoTheme::accent_open_file()
            } else {
                InclusivoTheme::text_secondary()
            };
            execute!(out, SetForegroundColor(color))?;
            write!(out, "{:<width$}", display, width = area.width as usize)?;
            execute!(out, ResetColor)?;
        }
        Ok(())
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = (self.scroll_offset + lines).min(self.max_scroll());
        self.follow = self.scroll_offset == self.max_scroll();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let Some(bounds) = self.last_bounds else {
            return false;
        };
        if !bounds.contains(mouse.column, mouse.row) {
            return false;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_up(3);
                true
            }
            MouseEventKind::ScrollDown => {
                self.scroll_down(3);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel_with(count: usize) -> DebugPanel {
        let mut panel = DebugPanel::new();
        panel.logs = (0..count).map(|i| format!("[00:00:00.000] entry {}", i)).collect();
        panel.last_bounds = Some(Rect::new(0, 1, 80, 10));
        panel
    }

    #[test]
    fn follows_the_tail_until_scrolled_up() {
        let mut panel = panel_with(50);
        let mut out = Vec::new();
        panel.render(&mut out, Rect::new(0, 1, 80, 10)).unwrap();
        assert_eq!(panel.scroll_offset, 40);

        panel.scroll_up(5);
        assert!(!panel.follow);
        panel.logs.push("new".into());
        panel.render(&mut out, Rect::new(0, 1, 80, 10)).unwrap();
        assert_eq!(panel.scroll_offset, 35);
    }

    #[test]
    fn scrolling_to_the_bottom_resumes_following() {
        let mut panel = panel_with(50);
        panel.scroll_offset = 30;
        panel.follow = false;
        panel.scroll_down(100);
        assert_eq!(panel.scroll_offset, 40);
        assert!(panel.follow);
    }
}
