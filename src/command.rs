//! Reversible grid mutations and the linear undo/redo history.
//!
//! Every change to cell values, column widths and row heights goes through a
//! [`Command`]. Each variant carries both the old and the new state so it can
//! be applied and reverted any number of times.

use crate::types::Sheet;

/// A single reversible mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    EditCell {
        row: usize,
        col: usize,
        old_value: String,
        new_value: String,
    },
    ResizeColumn {
        col: usize,
        old_width: f64,
        new_width: f64,
    },
    ResizeRow {
        row: usize,
        old_height: f64,
        new_height: f64,
    },
}

impl Command {
    /// Write the new state into the sheet.
    ///
    /// Targets outside the sheet are ignored.
    pub fn apply(&self, sheet: &mut Sheet) {
        match self {
            Self::EditCell {
                row,
                col,
                new_value,
                ..
            } => {
                if let Some(cell) = sheet.cell_mut(*row, *col) {
                    cell.value.clone_from(new_value);
                }
            }
            Self::ResizeColumn { col, new_width, .. } => {
                if let Some(column) = sheet.columns.get_mut(*col) {
                    column.width = *new_width;
                }
            }
            Self::ResizeRow {
                row, new_height, ..
            } => {
                if let Some(r) = sheet.rows.get_mut(*row) {
                    r.height = *new_height;
                }
            }
        }
    }

    /// Restore the old state.
    pub fn revert(&self, sheet: &mut Sheet) {
        match self {
            Self::EditCell {
                row,
                col,
                old_value,
                ..
            } => {
                if let Some(cell) = sheet.cell_mut(*row, *col) {
                    cell.value.clone_from(old_value);
                }
            }
            Self::ResizeColumn { col, old_width, .. } => {
                if let Some(column) = sheet.columns.get_mut(*col) {
                    column.width = *old_width;
                }
            }
            Self::ResizeRow {
                row, old_height, ..
            } => {
                if let Some(r) = sheet.rows.get_mut(*row) {
                    r.height = *old_height;
                }
            }
        }
    }

    /// Short human-readable label, used for logging.
    pub fn label(&self) -> String {
        match self {
            Self::EditCell { row, col, .. } => {
                format!("edit {}", crate::cell_ref::cell_ref(*row, *col))
            }
            Self::ResizeColumn {
                col,
                old_width,
                new_width,
            } => format!(
                "resize column {} {old_width}->{new_width}",
                crate::cell_ref::excel_column_name(*col)
            ),
            Self::ResizeRow {
                row,
                old_height,
                new_height,
            } => format!("resize row {} {old_height}->{new_height}", row + 1),
        }
    }
}

/// Undo and redo stacks.
///
/// Pushing a new command discards the redo stack (no branching history).
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `command`, record it for undo and clear the redo stack.
    pub fn push(&mut self, command: Command, sheet: &mut Sheet) {
        command.apply(sheet);
        log::debug!("command: {}", command.label());
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Revert the most recent command. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, sheet: &mut Sheet) -> bool {
        let Some(command) = self.undo_stack.pop() else {
            return false;
        };
        command.revert(sheet);
        log::debug!("undo: {}", command.label());
        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone command. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, sheet: &mut Sheet) -> bool {
        let Some(command) = self.redo_stack.pop() else {
            return false;
        };
        command.apply(sheet);
        log::debug!("redo: {}", command.label());
        self.undo_stack.push(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet::new(3, 3, 100.0, 24.0)
    }

    fn edit(row: usize, col: usize, old: &str, new: &str) -> Command {
        Command::EditCell {
            row,
            col,
            old_value: old.to_string(),
            new_value: new.to_string(),
        }
    }

    #[test]
    fn push_applies_immediately() {
        let mut sheet = sheet();
        let mut history = History::new();
        history.push(edit(0, 0, "", "5"), &mut sheet);
        assert_eq!(sheet.value(0, 0), "5");
        assert_eq!(history.undo_len(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_redo_round_trip() {
        let mut sheet = sheet();
        let mut history = History::new();
        history.push(edit(1, 1, "", "a"), &mut sheet);
        history.push(
            Command::ResizeColumn {
                col: 2,
                old_width: 100.0,
                new_width: 140.0,
            },
            &mut sheet,
        );
        history.push(
            Command::ResizeRow {
                row: 0,
                old_height: 24.0,
                new_height: 40.0,
            },
            &mut sheet,
        );
        let after = sheet.clone();

        while history.undo(&mut sheet) {}
        assert_eq!(sheet, self::sheet());
        assert_eq!(history.redo_len(), 3);

        while history.redo(&mut sheet) {}
        assert_eq!(sheet, after);
    }

    #[test]
    fn push_after_undo_clears_redo() {
        let mut sheet = sheet();
        let mut history = History::new();
        history.push(edit(0, 0, "", "1"), &mut sheet);
        assert!(history.undo(&mut sheet));
        assert!(history.can_redo());

        history.push(edit(0, 1, "", "2"), &mut sheet);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut sheet));
        assert_eq!(sheet.value(0, 0), "");
        assert_eq!(sheet.value(0, 1), "2");
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut sheet = sheet();
        let mut history = History::new();
        assert!(!history.undo(&mut sheet));
        assert!(!history.redo(&mut sheet));
        assert_eq!(sheet, self::sheet());
    }

    #[test]
    fn out_of_range_targets_are_ignored() {
        let mut sheet = sheet();
        edit(9, 9, "", "x").apply(&mut sheet);
        Command::ResizeColumn {
            col: 9,
            old_width: 1.0,
            new_width: 2.0,
        }
        .revert(&mut sheet);
        assert_eq!(sheet, self::sheet());
    }

    #[test]
    fn labels() {
        assert_eq!(edit(2, 1, "", "x").label(), "edit B3");
        let resize = Command::ResizeRow {
            row: 4,
            old_height: 24.0,
            new_height: 30.0,
        };
        assert_eq!(resize.label(), "resize row 5 24->30");
    }
}
