//! Cursor movement, scrolling, and page operations.
//!
//! All motions normalize their count with `max(count, 1)` and clamp to the
//! grid instead of failing. Row geometry treats an empty buffer as holding a
//! single virtual cell so the cursor always has somewhere to rest.

use super::Window;

impl<S> Window<S> {
    /// Move up by whole rows, keeping the column.
    pub fn cursor_up(&mut self, count: u64) {
        let count = count.max(1);
        self.cursor -= count.min(self.cursor / self.width) * self.width;
        self.scroll_to_cursor_up();
    }

    /// Move down by whole rows, keeping the column; stops at the last byte
    /// when the final row is partial.
    pub fn cursor_down(&mut self, count: u64) {
        let count = count.max(1);
        let last = self.clamped_len() - 1;
        let rows_below = (last / self.width).saturating_sub(self.cursor / self.width);
        let step = count.min(rows_below) * self.width;
        self.cursor += step.min(last.saturating_sub(self.cursor));
        self.scroll_to_cursor_down();
    }

    /// Move left within the current row.
    pub fn cursor_left(&mut self, count: u64) {
        self.cursor -= count.max(1).min(self.cursor % self.width);
    }

    /// Move right within the current row, clamped to the last byte.
    pub fn cursor_right(&mut self, count: u64) {
        let count = count.max(1);
        let in_row = self.width - 1 - self.cursor % self.width;
        let to_end = (self.clamped_len() - 1).saturating_sub(self.cursor);
        self.cursor += count.min(in_row).min(to_end);
    }

    /// Move backward across row edges.
    pub fn cursor_prev(&mut self, count: u64) {
        self.cursor -= count.max(1).min(self.cursor);
        self.scroll_to_cursor_up();
    }

    /// Move forward across row edges, clamped to the last byte.
    pub fn cursor_next(&mut self, count: u64) {
        let count = count.max(1);
        self.cursor += count.min((self.clamped_len() - 1).saturating_sub(self.cursor));
        self.scroll_to_cursor_down();
    }

    /// Move to the first cell of the current row.
    pub fn cursor_head(&mut self) {
        self.cursor -= self.cursor % self.width;
    }

    /// Move to the last cell of the row `count - 1` rows below, clamped to
    /// the last byte.
    pub fn cursor_end(&mut self, count: u64) {
        let count = count.max(1);
        self.cursor =
            ((self.cursor / self.width + count) * self.width - 1).min(self.clamped_len() - 1);
        self.scroll_to_cursor_down();
    }

    /// Scroll the viewport up by `count` rows without losing the cursor: a
    /// cursor that falls below the viewport is pulled to its last row.
    pub fn scroll_up(&mut self, count: u64) {
        let count = count.max(1);
        self.offset -= count.min(self.offset / self.width) * self.width;
        let view = self.height * self.width;
        if self.cursor >= self.offset + view {
            self.cursor -= ((self.cursor - self.offset - view) / self.width + 1) * self.width;
        }
    }

    /// Scroll the viewport down by `count` rows, clamped so the last page
    /// stays reachable; a cursor above the viewport is pulled to its first
    /// row.
    pub fn scroll_down(&mut self, count: u64) {
        let count = count.max(1);
        self.offset = (self.offset + count * self.width).min(self.max_offset());
        if self.cursor < self.offset {
            let pull = (self.offset - self.cursor).div_ceil(self.width) * self.width;
            self.cursor += pull.min((self.clamped_len() - 1).saturating_sub(self.cursor));
        }
    }

    /// Page up by `height - 2` rows (one screen with two rows of overlap).
    pub fn page_up(&mut self) {
        self.page_up_rows(self.height.saturating_sub(2));
    }

    /// Page down by `height - 2` rows.
    pub fn page_down(&mut self) {
        self.page_down_rows(self.height.saturating_sub(2));
    }

    /// Half-screen page up.
    pub fn page_up_half(&mut self) {
        self.page_up_rows((self.height / 2).max(1));
    }

    /// Half-screen page down.
    pub fn page_down_half(&mut self) {
        self.page_down_rows((self.height / 2).max(1));
    }

    /// Jump to the first page with the cursor on the first cell.
    pub fn page_top(&mut self) {
        self.offset = 0;
        self.cursor = 0;
    }

    /// Jump to the last page with the cursor on the first cell of the last
    /// row.
    pub fn page_end(&mut self) {
        self.offset = self.max_offset();
        self.cursor = (self.clamped_len().div_ceil(self.width) - 1) * self.width;
    }

    fn page_up_rows(&mut self, rows: u64) {
        self.offset = self.offset.saturating_sub(rows * self.width);
        if self.offset == 0 {
            self.cursor = 0;
        } else if self.cursor >= self.offset + self.height * self.width {
            self.cursor = self.offset + (self.height - 1) * self.width;
        }
    }

    fn page_down_rows(&mut self, rows: u64) {
        let last = self.max_offset();
        self.offset = (self.offset + rows * self.width).min(last);
        if self.cursor < self.offset {
            self.cursor = self.offset;
        } else if self.offset == last {
            self.cursor = (self.clamped_len().div_ceil(self.width) - 1) * self.width;
        }
    }

    /// Largest viewport offset that still shows the end of the buffer.
    fn max_offset(&self) -> u64 {
        self.clamped_len()
            .div_ceil(self.width)
            .saturating_sub(self.height)
            * self.width
    }
}
