//! Segmented editable buffer over a read-only byte source.
//!
//! `EditableBuffer` wraps a seekable source (a file, a cursor over memory)
//! and layers byte-granular edits on top of it without rewriting the source.
//! Storage is an ordered list of run-ranges: spans still served by the source
//! plus overlay spans owning the edited bytes. Inserting, replacing, and
//! deleting splits or shrinks the affected range and shifts the ranges to its
//! right; reads stitch consecutive ranges back together behind the standard
//! `std::io::Read`/`std::io::Seek` interface.
//!
//! Length accounting follows the editing model rather than raw content:
//! `len()` starts at the source length, grows by one per insert, shrinks by
//! one per in-bounds delete, and is untouched by `replace`. A replace past
//! the end makes the written byte readable without growing `len()`; the
//! window layer accounts for that growth itself while appending.
//!
//! Edits record which logical positions are overlay-backed;
//! [`EditableBuffer::edited_indices`] reports them as coalesced half-open
//! intervals so a renderer can highlight modified cells.

mod range;

use range::{Backing, RunRange};
use std::io::{self, Read, Seek, SeekFrom};

/// Editable overlay over an exclusively owned byte source.
///
/// The source is only ever read; all mutation lives in overlay ranges. The
/// sequential read position (`index`) may legally sit past the end, where
/// reads return `Ok(0)`.
pub struct EditableBuffer<S> {
    source: S,
    ranges: Vec<RunRange>,
    index: u64,
    length: u64,
}

impl<S: Read + Seek> EditableBuffer<S> {
    /// Wrap a source, discovering its length with a seek to the end.
    pub fn new(mut source: S) -> io::Result<Self> {
        let length = source.seek(SeekFrom::End(0))?;
        let ranges = if length > 0 {
            vec![RunRange::source(0, length, 0)]
        } else {
            Vec::new()
        };
        Ok(Self {
            source,
            ranges,
            index: 0,
            length,
        })
    }
}

impl<S> EditableBuffer<S> {
    /// Reported length of the buffer. Tracks inserts and deletes; `replace`
    /// never changes it.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Overlay coverage as a flat boundary list `[s0, e0, s1, e1, ..]` of
    /// half-open intervals, sorted and non-touching. Adjacent overlay ranges
    /// report as one interval.
    pub fn edited_indices(&self) -> Vec<u64> {
        let mut out: Vec<u64> = Vec::new();
        for r in &self.ranges {
            if !r.is_overlay() {
                continue;
            }
            match out.last_mut() {
                Some(end) if *end == r.min => *end = r.max,
                _ => {
                    out.push(r.min);
                    out.push(r.max);
                }
            }
        }
        out
    }

    /// Insert `b` at logical position `at`, shifting everything at and after
    /// `at` one position right. Grows `len()` by one. An insert past the end
    /// of stored content plants the overlay at its raw offset; reads stitch
    /// over the stored discontinuity.
    pub fn insert(&mut self, at: u64, b: u8) {
        match self.locate(at) {
            Some(ri) => {
                let min = self.ranges[ri].min;
                let max = self.ranges[ri].max;
                let tail = match &mut self.ranges[ri].backing {
                    Backing::Overlay { bytes } => {
                        bytes.insert((at - min) as usize, b);
                        self.ranges[ri].max += 1;
                        ri + 1
                    }
                    Backing::Source { diff } => {
                        let diff = *diff;
                        let mut parts: Vec<RunRange> = Vec::with_capacity(3);
                        if at > min {
                            parts.push(RunRange::source(min, at, diff));
                        }
                        parts.push(RunRange::overlay_byte(at, b));
                        if at < max {
                            // the split-off right half is already shifted
                            parts.push(RunRange::source(at + 1, max + 1, diff - 1));
                        }
                        let n = parts.len();
                        self.ranges.splice(ri..=ri, parts);
                        ri + n
                    }
                };
                for r in &mut self.ranges[tail..] {
                    r.shift_right();
                }
            }
            None => {
                let ins = self
                    .ranges
                    .iter()
                    .position(|r| r.min > at)
                    .unwrap_or(self.ranges.len());
                self.ranges.insert(ins, RunRange::overlay_byte(at, b));
            }
        }
        self.length += 1;
    }

    /// Write `b` at logical position `at` without moving anything. Within
    /// existing content the touched range is split and the byte becomes (or
    /// joins) an overlay; past the end the overlay is planted at its raw
    /// offset. `len()` is never changed.
    pub fn replace(&mut self, at: u64, b: u8) {
        match self.locate(at) {
            Some(ri) => {
                let min = self.ranges[ri].min;
                let max = self.ranges[ri].max;
                if let Backing::Overlay { bytes } = &mut self.ranges[ri].backing {
                    bytes[(at - min) as usize] = b;
                    return;
                }
                let Backing::Source { diff } = &self.ranges[ri].backing else {
                    unreachable!("overlay handled above");
                };
                let diff = *diff;
                let joins_prev = at == min
                    && ri > 0
                    && self.ranges[ri - 1].is_overlay()
                    && self.ranges[ri - 1].max == min;
                let joins_next = at + 1 == max
                    && ri + 1 < self.ranges.len()
                    && self.ranges[ri + 1].is_overlay()
                    && self.ranges[ri + 1].min == max;
                if joins_prev {
                    if let Backing::Overlay { bytes } = &mut self.ranges[ri - 1].backing {
                        bytes.push(b);
                    }
                    self.ranges[ri - 1].max += 1;
                    // the source range gives up its first byte
                    self.ranges[ri].min += 1;
                    if self.ranges[ri].is_empty() {
                        self.ranges.remove(ri);
                    }
                } else if joins_next {
                    if let Backing::Overlay { bytes } = &mut self.ranges[ri + 1].backing {
                        bytes.insert(0, b);
                    }
                    self.ranges[ri + 1].min -= 1;
                    self.ranges[ri].max -= 1;
                    if self.ranges[ri].is_empty() {
                        self.ranges.remove(ri);
                    }
                } else {
                    let mut parts: Vec<RunRange> = Vec::with_capacity(3);
                    if at > min {
                        parts.push(RunRange::source(min, at, diff));
                    }
                    parts.push(RunRange::overlay_byte(at, b));
                    if at + 1 < max {
                        parts.push(RunRange::source(at + 1, max, diff));
                    }
                    self.ranges.splice(ri..=ri, parts);
                }
            }
            None => {
                let ins = self
                    .ranges
                    .iter()
                    .position(|r| r.min > at)
                    .unwrap_or(self.ranges.len());
                self.ranges.insert(ins, RunRange::overlay_byte(at, b));
            }
        }
    }

    /// Remove the byte at logical position `at`, shifting everything after it
    /// one position left. No-op when `at` is outside stored content. `len()`
    /// shrinks only for in-bounds deletes.
    pub fn delete(&mut self, at: u64) {
        let Some(ri) = self.locate(at) else {
            return;
        };
        let min = self.ranges[ri].min;
        let max = self.ranges[ri].max;
        let tail = if self.ranges[ri].is_overlay() {
            if let Backing::Overlay { bytes } = &mut self.ranges[ri].backing {
                bytes.remove((at - min) as usize);
            }
            self.ranges[ri].max -= 1;
            if self.ranges[ri].is_empty() {
                self.ranges.remove(ri);
                ri
            } else {
                ri + 1
            }
        } else {
            let Backing::Source { diff } = &self.ranges[ri].backing else {
                unreachable!("overlay handled above");
            };
            let diff = *diff;
            if at == min {
                // what remains starts one byte later in the source
                self.ranges[ri] = RunRange::source(min, max - 1, diff + 1);
                if self.ranges[ri].is_empty() {
                    self.ranges.remove(ri);
                    ri
                } else {
                    ri + 1
                }
            } else if at + 1 == max {
                self.ranges[ri].max -= 1;
                ri + 1
            } else {
                let parts = [
                    RunRange::source(min, at, diff),
                    RunRange::source(at, max - 1, diff + 1),
                ];
                self.ranges.splice(ri..=ri, parts);
                ri + 2
            }
        };
        for r in &mut self.ranges[tail..] {
            r.shift_left();
        }
        self.coalesce_sources();
        if at < self.length {
            self.length -= 1;
        }
    }

    /// First range covering `pos` by stored bounds.
    fn locate(&self, pos: u64) -> Option<usize> {
        self.ranges.iter().position(|r| r.min <= pos && pos < r.max)
    }

    /// Merge adjacent source ranges that map to consecutive source bytes.
    /// Overlay ranges only merge through the explicit insert/replace rules,
    /// which keeps the range list aligned with distinct edit clusters.
    fn coalesce_sources(&mut self) {
        let mut i = 0;
        while i + 1 < self.ranges.len() {
            let touching = self.ranges[i].max == self.ranges[i + 1].min;
            let same_diff = match (&self.ranges[i].backing, &self.ranges[i + 1].backing) {
                (Backing::Source { diff: a }, Backing::Source { diff: b }) => a == b,
                _ => false,
            };
            if touching && same_diff {
                self.ranges[i].max = self.ranges[i + 1].max;
                self.ranges.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }
}

impl<S: Read + Seek> Read for EditableBuffer<S> {
    /// Fill `dst` from the sequential read position, concatenating
    /// contributions from consecutive run-ranges in one call. Returns `Ok(0)`
    /// once content is exhausted; source errors propagate.
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0usize;
        let mut cum = 0u64;
        for ri in 0..self.ranges.len() {
            if filled == dst.len() {
                break;
            }
            let width = self.ranges[ri].width();
            let end = cum + width;
            let pos = self.index + filled as u64;
            if pos >= end {
                cum = end;
                continue;
            }
            // content is addressed by concatenation order, so offsets within
            // a range are relative to the cumulative start, not stored `min`
            let off = pos - cum;
            let want = (width - off).min((dst.len() - filled) as u64) as usize;
            match &self.ranges[ri].backing {
                Backing::Overlay { bytes } => {
                    let o = off as usize;
                    dst[filled..filled + want].copy_from_slice(&bytes[o..o + want]);
                    filled += want;
                }
                Backing::Source { diff } => {
                    let src = (self.ranges[ri].min as i64 + off as i64 + diff) as u64;
                    self.source.seek(SeekFrom::Start(src))?;
                    let mut got = 0usize;
                    while got < want {
                        let n = self.source.read(&mut dst[filled + got..filled + want])?;
                        if n == 0 {
                            break;
                        }
                        got += n;
                    }
                    filled += got;
                    if got < want {
                        // source shorter than its range claims; stop here
                        break;
                    }
                }
            }
            cum = end;
        }
        self.index += filled as u64;
        Ok(filled)
    }
}

impl<S: Read + Seek> Seek for EditableBuffer<S> {
    /// Resolve the target against `len()`. Seeking past the end is legal and
    /// later reads there return `Ok(0)`; a negative resolved position is
    /// `ErrorKind::InvalidInput`.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => n as i128,
            SeekFrom::Current(d) => self.index as i128 + d as i128,
            SeekFrom::End(d) => self.length as i128 + d as i128,
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek to a negative position",
            ));
        }
        self.index = target as u64;
        Ok(self.index)
    }
}
