use crate::chess::Color;
use crate::game::Seat;
use crate::sync::{Room, RoomId, StateDocument};
use async_trait::async_trait;
use derive_more::{Display, Error};
use tokio::sync::watch;

/// The reason why a [`Store`] operation failed.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
pub enum StoreError {
    #[display(fmt = "room `{_0}` already exists")]
    RoomExists(#[error(not(source))] RoomId),
    #[display(fmt = "room `{_0}` not found")]
    RoomNotFound(#[error(not(source))] RoomId),
}

/// Trait for shared storage of [`Room`]s.
#[async_trait]
pub trait Store: Send + Sync {
    /// The reason why an operation failed.
    type Error: From<StoreError> + Send;

    /// Reads a room, if it exists.
    async fn load(&self, id: RoomId) -> Result<Option<Room>, Self::Error>;

    /// Overwrites a room, creating it if necessary.
    async fn save(&self, id: RoomId, room: Room) -> Result<(), Self::Error>;

    /// Watches a room, including rooms that don't exist yet.
    async fn subscribe(&self, id: RoomId) -> Result<watch::Receiver<Option<Room>>, Self::Error>;

    /// Opens a new room.
    async fn create(&self, id: RoomId, creator: &str, side: Color) -> Result<(), Self::Error> {
        if self.load(id).await?.is_some() {
            return Err(StoreError::RoomExists(id).into());
        }

        self.save(id, Room::new(creator, side)).await
    }

    /// Seats a participant in an existing room, see [`Room::join`].
    async fn join(&self, id: RoomId, uid: &str, wanted: Option<Color>) -> Result<Seat, Self::Error> {
        let mut room = self.load(id).await?.ok_or(StoreError::RoomNotFound(id))?;
        let seat = room.join(uid, wanted);
        self.save(id, room).await?;
        Ok(seat)
    }

    /// Frees whatever side a participant holds, see [`Room::leave`].
    async fn leave(&self, id: RoomId, uid: &str) -> Result<(), Self::Error> {
        if let Some(mut room) = self.load(id).await? {
            room.leave(uid);
            self.save(id, room).await?;
        }

        Ok(())
    }

    /// Publishes a new game state, see [`Room::push`].
    async fn push(&self, id: RoomId, state: StateDocument) -> Result<(), Self::Error> {
        let mut room = self.load(id).await?.ok_or(StoreError::RoomNotFound(id))?;
        room.push(state);
        self.save(id, room).await
    }
}
