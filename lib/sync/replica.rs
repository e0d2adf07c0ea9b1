use crate::chess::GameState;
use crate::game::{Mode, Observer, Seat, Session};
use crate::sync::{Options, Room, RoomId, StateDocument, Store};
use std::{fmt::Display, sync::Arc};
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Replicates a [`Session`] through a [`Room`].
///
/// Commits are forwarded to a background task that pushes them to the [`Store`]. Commits that
/// arrive within the debounce window of one another are coalesced into a single push of the
/// latest state.
#[derive(Debug)]
pub struct Replica {
    id: RoomId,
    uid: String,
    outbox: mpsc::UnboundedSender<GameState>,
}

impl Replica {
    /// Starts replicating to the room `id` on behalf of the participant `uid`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S>(store: Arc<S>, id: RoomId, uid: &str, options: Options) -> Self
    where
        S: Store + 'static,
        S::Error: Display,
    {
        let (outbox, inbox) = mpsc::unbounded_channel();
        tokio::spawn(push(store, id, options, inbox));

        Replica {
            id,
            uid: uid.into(),
            outbox,
        }
    }

    /// The room being replicated.
    #[inline(always)]
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// The participant on whose behalf the session is replicated.
    #[inline(always)]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Reconciles the session with the latest version of its room.
    #[instrument(level = "debug", skip(session, room), fields(room = %session.observer().id))]
    pub fn receive(session: &mut Session<Self>, room: &Room) {
        let seat = room.seat(session.observer().uid());
        if session.mode() != Mode::Remote(seat) {
            info!(%seat, "seated");
            session.set_mode(Mode::Remote(seat));
        }

        match &room.state {
            None if seat == Seat::White => {
                info!("initializing the room");
                session.reset();
            }

            None => debug!("waiting for the game to start"),

            Some(doc) => match GameState::try_from(doc.clone()) {
                Ok(state) if &state == session.state() => {}
                Ok(state) => session.replace(state),
                Err(e) => warn!(error = %e, "discarding invalid game state"),
            },
        }
    }

    /// Reconciles the session with every version of the room, until the subscription closes.
    pub async fn follow(session: &mut Session<Self>, mut updates: watch::Receiver<Option<Room>>) {
        loop {
            let room = updates.borrow_and_update().clone();

            if let Some(room) = room {
                Self::receive(session, &room);
            }

            if updates.changed().await.is_err() {
                break;
            }
        }
    }
}

impl Observer for Replica {
    fn on_commit(&mut self, state: &GameState) {
        if self.outbox.send(state.clone()).is_err() {
            error!(room = %self.id, "the replica is no longer pushing");
        }
    }
}

async fn push<S>(
    store: Arc<S>,
    id: RoomId,
    options: Options,
    mut inbox: mpsc::UnboundedReceiver<GameState>,
) where
    S: Store,
    S::Error: Display,
{
    while let Some(mut state) = inbox.recv().await {
        sleep(options.debounce).await;

        while let Ok(newer) = inbox.try_recv() {
            state = newer;
        }

        match store.push(id, StateDocument::from(&state)).await {
            Ok(()) => debug!(room = %id, "pushed game state"),
            Err(e) => error!(room = %id, error = %e, "failed to push game state"),
        }
    }
}
