use crate::sync::{Room, RoomId, Store, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{watch, Mutex};
use tracing::instrument;

/// A [`Store`] that keeps rooms in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<RoomId, watch::Sender<Option<Room>>>>,
}

#[async_trait]
impl Store for MemoryStore {
    type Error = StoreError;

    #[instrument(level = "trace", skip(self), err)]
    async fn load(&self, id: RoomId) -> Result<Option<Room>, Self::Error> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.get(&id).and_then(|tx| tx.borrow().clone()))
    }

    #[instrument(level = "trace", skip(self, room), err)]
    async fn save(&self, id: RoomId, room: Room) -> Result<(), Self::Error> {
        let mut rooms = self.rooms.lock().await;

        match rooms.get(&id) {
            Some(tx) => {
                tx.send_replace(Some(room));
            }

            None => {
                rooms.insert(id, watch::channel(Some(room)).0);
            }
        }

        Ok(())
    }

    #[instrument(level = "trace", skip(self), err)]
    async fn subscribe(&self, id: RoomId) -> Result<watch::Receiver<Option<Room>>, Self::Error> {
        let mut rooms = self.rooms.lock().await;
        let tx = rooms.entry(id).or_insert_with(|| watch::channel(None).0);
        Ok(tx.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Color, GameState};
    use crate::game::Seat;
    use crate::sync::{StateDocument, Status};

    #[tokio::test]
    async fn created_room_can_be_loaded() -> anyhow::Result<()> {
        let store = MemoryStore::default();
        let id = RoomId::random();
        assert_eq!(store.load(id).await?, None);

        store.create(id, "alice", Color::White).await?;
        let room = store.load(id).await?.unwrap();
        assert_eq!(room.seat("alice"), Seat::White);
        Ok(())
    }

    #[tokio::test]
    async fn rooms_cannot_be_created_twice() -> anyhow::Result<()> {
        let store = MemoryStore::default();
        let id = RoomId::random();
        store.create(id, "alice", Color::White).await?;
        assert_eq!(
            store.create(id, "bob", Color::Black).await,
            Err(StoreError::RoomExists(id))
        );

        Ok(())
    }

    #[tokio::test]
    async fn joining_a_missing_room_fails() {
        let store = MemoryStore::default();
        let id = RoomId::random();
        assert_eq!(
            store.join(id, "bob", None).await,
            Err(StoreError::RoomNotFound(id))
        );
    }

    #[tokio::test]
    async fn join_and_leave_update_the_players() -> anyhow::Result<()> {
        let store = MemoryStore::default();
        let id = RoomId::random();
        store.create(id, "alice", Color::White).await?;

        assert_eq!(store.join(id, "bob", None).await?, Seat::Black);
        assert_eq!(store.load(id).await?.unwrap().seat("bob"), Seat::Black);

        store.leave(id, "bob").await?;
        assert_eq!(store.load(id).await?.unwrap().seat("bob"), Seat::Spectator);
        Ok(())
    }

    #[tokio::test]
    async fn subscribers_see_pushed_states() -> anyhow::Result<()> {
        let store = MemoryStore::default();
        let id = RoomId::random();
        let mut updates = store.subscribe(id).await?;
        assert_eq!(*updates.borrow_and_update(), None);

        store.create(id, "alice", Color::White).await?;
        updates.changed().await?;
        assert_eq!(updates.borrow_and_update().as_ref().map(|r| r.status), Some(Status::Lobby));

        let doc = StateDocument::from(&GameState::default());
        store.push(id, doc.clone()).await?;
        updates.changed().await?;

        let room = updates.borrow_and_update().clone().unwrap();
        assert_eq!(room.status, Status::Live);
        assert_eq!(room.state, Some(doc));
        Ok(())
    }
}
