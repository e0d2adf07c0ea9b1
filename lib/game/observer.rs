use crate::chess::GameState;

/// Trait for types that want to be told about local changes to the game.
#[cfg_attr(test, mockall::automock)]
pub trait Observer {
    /// Called after the state changed due to a local action.
    fn on_commit(&mut self, state: &GameState);
}

impl Observer for () {
    #[inline(always)]
    fn on_commit(&mut self, _: &GameState) {}
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    #[inline(always)]
    fn on_commit(&mut self, state: &GameState) {
        (**self).on_commit(state)
    }
}
