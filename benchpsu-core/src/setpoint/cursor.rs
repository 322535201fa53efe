//! Edit cursor over the editable digit columns

use crate::input::Direction;

use super::columns::{EditableColumn, EDITABLE_COLUMNS};

/// Position of the edit cursor
///
/// Stored as an index into [`EDITABLE_COLUMNS`], so it can only ever sit
/// on an editable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    slot: usize,
}

impl Cursor {
    /// Leftmost editable column (voltage thousands digit)
    pub const FIRST: Self = Self { slot: 0 };

    /// Rightmost editable column (current units digit)
    pub const LAST: Self = Self {
        slot: EDITABLE_COLUMNS.len() - 1,
    };

    /// Cursor on the given display column, if that column is editable
    #[cfg(test)]
    pub(crate) fn at_column(column: u8) -> Option<Self> {
        EDITABLE_COLUMNS
            .iter()
            .position(|entry| entry.column == column)
            .map(|slot| Self { slot })
    }

    /// The editable entry under the cursor
    pub fn entry(&self) -> &'static EditableColumn {
        &EDITABLE_COLUMNS[self.slot]
    }

    /// Display column under the cursor
    pub fn column(&self) -> u8 {
        self.entry().column
    }

    /// Move to the neighbouring editable column
    ///
    /// Saturates at the first and last editable column. Returns true if
    /// the cursor moved.
    pub fn move_cursor(&mut self, direction: Direction) -> bool {
        let slot = match direction {
            Direction::Left => self.slot.saturating_sub(1),
            Direction::Right => (self.slot + 1).min(Self::LAST.slot),
        };
        let moved = slot != self.slot;
        self.slot = slot;
        moved
    }
}
