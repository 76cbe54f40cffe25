//! Run-range bookkeeping for the segmented buffer.
//!
//! A run-range is one contiguous logical span `[min, max)` drawn from a
//! single backing: either the read-only source (shifted by a signed `diff`)
//! or a small owned byte sequence (an overlay). The buffer keeps an ordered
//! list of these; edits split, shrink, and occasionally merge them.
//!
//! Invariants maintained by the owning buffer:
//! * ranges are non-empty (`min < max`) and ordered by `min`;
//! * a range never mixes backings;
//! * overlay storage length always equals `max - min`, so the owned byte for
//!   logical `p` is `bytes[p - min]`.

use smallvec::SmallVec;

/// Inline capacity for overlay bytes. Single-byte edits are the common case;
/// a cluster outgrows the inline storage only after several adjacent edits.
pub(crate) type OverlayBytes = SmallVec<[u8; 8]>;

/// Backing of one contiguous logical span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Backing {
    /// Logical position `p` reads the source at `p + diff`.
    Source { diff: i64 },
    /// The range owns its bytes.
    Overlay { bytes: OverlayBytes },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunRange {
    pub(crate) min: u64,
    pub(crate) max: u64,
    pub(crate) backing: Backing,
}

impl RunRange {
    pub(crate) fn source(min: u64, max: u64, diff: i64) -> Self {
        Self {
            min,
            max,
            backing: Backing::Source { diff },
        }
    }

    pub(crate) fn overlay(min: u64, bytes: OverlayBytes) -> Self {
        let max = min + bytes.len() as u64;
        Self {
            min,
            max,
            backing: Backing::Overlay { bytes },
        }
    }

    pub(crate) fn overlay_byte(min: u64, b: u8) -> Self {
        let mut bytes = OverlayBytes::new();
        bytes.push(b);
        Self::overlay(min, bytes)
    }

    pub(crate) fn width(&self) -> u64 {
        self.max - self.min
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    pub(crate) fn is_overlay(&self) -> bool {
        matches!(self.backing, Backing::Overlay { .. })
    }

    /// Shift one position right after an insert earlier in the buffer.
    /// Source ranges compensate in `diff` so the mapped source byte is
    /// unchanged; overlay bytes travel with the range.
    pub(crate) fn shift_right(&mut self) {
        self.min += 1;
        self.max += 1;
        if let Backing::Source { diff } = &mut self.backing {
            *diff -= 1;
        }
    }

    /// Shift one position left after a delete earlier in the buffer.
    pub(crate) fn shift_left(&mut self) {
        self.min -= 1;
        self.max -= 1;
        if let Backing::Source { diff } = &mut self.backing {
            *diff += 1;
        }
    }
}
