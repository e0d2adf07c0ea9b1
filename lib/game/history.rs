use crate::chess::GameState;
use derive_more::{Display, Error};
use std::mem::replace;

/// The reason why the [`History`] could not be navigated.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
pub enum HistoryError {
    #[display(fmt = "undo and redo are disabled in remote games")]
    Disabled,
    #[display(fmt = "there is nothing to go back to")]
    Empty,
}

/// Full snapshots of past and undone states.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct History {
    undo: Vec<GameState>,
    redo: Vec<GameState>,
}

impl History {
    /// Records the state as it was before a new move, forgetting whatever had been undone.
    pub fn push(&mut self, state: GameState) {
        self.undo.push(state);
        self.redo.clear();
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// How many states may be undone.
    #[inline(always)]
    pub fn undoable(&self) -> usize {
        self.undo.len()
    }

    /// How many states may be redone.
    #[inline(always)]
    pub fn redoable(&self) -> usize {
        self.redo.len()
    }

    /// Restores the previous state in place of the current one.
    pub fn undo(&mut self, current: &mut GameState) -> Result<(), HistoryError> {
        let prev = self.undo.pop().ok_or(HistoryError::Empty)?;
        self.redo.push(replace(current, prev));
        Ok(())
    }

    /// Restores the last undone state in place of the current one.
    pub fn redo(&mut self, current: &mut GameState) -> Result<(), HistoryError> {
        let next = self.redo.pop().ok_or(HistoryError::Empty)?;
        self.undo.push(replace(current, next));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn undo_restores_the_pushed_state(a: GameState, b: GameState) {
        let mut history = History::default();
        history.push(a.clone());

        let mut current = b.clone();
        assert_eq!(history.undo(&mut current), Ok(()));
        assert_eq!(current, a);
        assert_eq!(history.redoable(), 1);

        assert_eq!(history.redo(&mut current), Ok(()));
        assert_eq!(current, b);
        assert_eq!(history.undoable(), 1);
    }

    #[proptest]
    fn pushing_clears_redo(a: GameState, b: GameState, c: GameState) {
        let mut history = History::default();
        history.push(a);

        let mut current = b;
        history.undo(&mut current)?;
        history.push(c);
        assert_eq!(history.redoable(), 0);
        assert_eq!(history.redo(&mut current), Err(HistoryError::Empty));
    }

    #[proptest]
    fn undo_fails_if_empty(s: GameState) {
        let mut current = s.clone();
        assert_eq!(History::default().undo(&mut current), Err(HistoryError::Empty));
        assert_eq!(current, s);
    }

    #[proptest]
    fn clear_forgets_everything(a: GameState, b: GameState) {
        let mut history = History::default();
        history.push(a);
        history.push(b);
        history.clear();
        assert_eq!(history, History::default());
    }
}
