//! Window/cursor engine for the hex editor core.
//!
//! A `Window` owns one [`EditableBuffer`] and translates motion and editing
//! intents into buffer operations over a fixed-width hex grid. The engine is
//! decomposed into focused submodules:
//! * `motion` - cursor movement, scrolling, and page operations
//! * `jump`   - jump-to-literal and the jump-back stack
//! * `edit`   - byte edits and the nibble insertion state machine
//!
//! Every operation is total: counts normalize to at least one and positions
//! clamp to the buffer instead of failing. The only fallible paths are the
//! ones that touch the backing source (`new`, `state`), which propagate
//! source I/O errors.
//!
//! Invariants (hold after every public call):
//! * `offset % width == 0`;
//! * `offset <= cursor < offset + height * width` whenever the buffer is
//!   non-empty;
//! * `cursor <= max(length - 1, 0)` outside of append/extending states; while
//!   appending at the end the cached `length` is pre-grown by one so the
//!   cursor can rest on the terminal cell (`extending`), and `exit_insert`
//!   rolls the placeholder back.

mod edit;
mod jump;
mod motion;

use anyhow::{Context, Result, ensure};
use core_buffer::EditableBuffer;
use core_state::WindowState;
use std::io::{Read, Seek, SeekFrom};

pub use core_state::Mode;

/// One editing window over a byte source.
pub struct Window<S> {
    buffer: EditableBuffer<S>,
    name: String,
    height: u64,
    width: u64,
    offset: u64,
    cursor: u64,
    length: u64,
    stack: Vec<(u64, u64)>,
    append: bool,
    replace_byte: bool,
    extending: bool,
    pending: bool,
    pending_byte: u8,
}

impl<S: Read + Seek> Window<S> {
    /// Bind a window to a byte source. The source length is discovered with a
    /// seek to its end; `height` and `width` are the viewport rows and bytes
    /// per row and must both be positive.
    pub fn new(source: S, name: impl Into<String>, height: u64, width: u64) -> Result<Self> {
        ensure!(height > 0, "window height must be positive");
        ensure!(width > 0, "window width must be positive");
        let buffer = EditableBuffer::new(source).context("binding byte source")?;
        let length = buffer.len();
        Ok(Self {
            buffer,
            name: name.into(),
            height,
            width,
            offset: 0,
            cursor: 0,
            length,
            stack: Vec::new(),
            append: false,
            replace_byte: false,
            extending: false,
            pending: false,
            pending_byte: 0,
        })
    }

    /// Snapshot the visible viewport for a renderer. Performs one seek and
    /// one read of `height * width` bytes starting at `offset`; the returned
    /// byte vector is always full-size with zero padding past `size`.
    pub fn state(&mut self) -> Result<WindowState> {
        let want = (self.height * self.width) as usize;
        let (size, bytes) = self.read_bytes(self.offset, want)?;
        Ok(WindowState {
            name: self.name.clone(),
            width: self.width,
            offset: self.offset,
            cursor: self.cursor,
            bytes,
            size,
            length: self.length,
            pending: self.pending,
            pending_byte: self.pending_byte,
            edited_indices: self.buffer.edited_indices(),
        })
    }

    /// Seek and read `len` bytes at `pos` into a fresh zero-filled vector.
    /// Returns the real byte count alongside the full-size vector.
    fn read_bytes(&mut self, pos: u64, len: usize) -> Result<(usize, Vec<u8>)> {
        let mut bytes = vec![0u8; len];
        self.buffer
            .seek(SeekFrom::Start(pos))
            .context("seeking buffer")?;
        let n = self
            .buffer
            .read(&mut bytes)
            .context("reading buffer window")?;
        Ok((n, bytes))
    }
}

impl<S> Window<S> {
    /// Cached logical length, floored at one for grid math on empty buffers.
    fn clamped_len(&self) -> u64 {
        self.length.max(1)
    }

    /// Pull the viewport down when the cursor moved below it.
    fn scroll_to_cursor_down(&mut self) {
        if self.cursor >= self.offset + self.height * self.width {
            self.offset =
                (self.cursor - self.height * self.width + self.width) / self.width * self.width;
        }
    }

    /// Pull the viewport up when the cursor moved above it.
    fn scroll_to_cursor_up(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor / self.width * self.width;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical offset of the edit cursor.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Logical offset of the top-left viewport cell.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Logical length as the window accounts it (pre-grown by one while
    /// appending at the end).
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Depth of the jump-back stack.
    pub fn jump_depth(&self) -> usize {
        self.stack.len()
    }
}
