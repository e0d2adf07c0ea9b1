use crate::chess::Color;
use crate::game::Seat;
use crate::sync::StateDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a game has started in a [`Room`].
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Waiting for the first move.
    #[default]
    Lobby,
    /// The game state has been pushed at least once.
    Live,
}

/// The participants holding each color, by user id.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct Players {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black: Option<String>,
}

impl Players {
    fn get_mut(&mut self, c: Color) -> &mut Option<String> {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// The shared document two players meet in.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub players: Players,
    #[serde(default)]
    pub state: Option<StateDocument>,
}

impl Room {
    /// Opens a room, seating its creator on the given side.
    pub fn new(creator: &str, side: Color) -> Self {
        let now = Utc::now();
        let mut players = Players::default();
        *players.get_mut(side) = Some(creator.into());

        Room {
            created_at: now,
            updated_at: now,
            status: Status::Lobby,
            players,
            state: None,
        }
    }

    /// Where a participant sits.
    pub fn seat(&self, uid: &str) -> Seat {
        if self.players.white.as_deref() == Some(uid) {
            Seat::White
        } else if self.players.black.as_deref() == Some(uid) {
            Seat::Black
        } else {
            Seat::Spectator
        }
    }

    /// Seats a participant, on the side they want if free, otherwise on any free side.
    ///
    /// Participants that want a side that is taken become spectators,
    /// while those already seated keep their seat.
    pub fn join(&mut self, uid: &str, wanted: Option<Color>) -> Seat {
        self.updated_at = Utc::now();

        if let seat @ (Seat::White | Seat::Black) = self.seat(uid) {
            return seat;
        }

        let side = match wanted {
            Some(c) => Some(c),
            None if self.players.white.is_none() => Some(Color::White),
            None if self.players.black.is_none() => Some(Color::Black),
            None => None,
        };

        let Some(side) = side else {
            return Seat::Spectator;
        };

        let holder = self.players.get_mut(side);
        if holder.is_none() {
            *holder = Some(uid.into());
        }

        if holder.as_deref() == Some(uid) {
            side.into()
        } else {
            Seat::Spectator
        }
    }

    /// Frees whatever side a participant holds.
    pub fn leave(&mut self, uid: &str) {
        for side in [Color::White, Color::Black] {
            let holder = self.players.get_mut(side);
            if holder.as_deref() == Some(uid) {
                *holder = None;
            }
        }

        self.updated_at = Utc::now();
    }

    /// Publishes a new game state.
    pub fn push(&mut self, state: StateDocument) {
        self.state = Some(state);
        self.status = Status::Live;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::GameState;
    use test_strategy::proptest;

    #[proptest]
    fn creator_holds_the_chosen_side(side: Color) {
        let room = Room::new("alice", side);
        assert_eq!(room.seat("alice"), side.into());
        assert_eq!(room.status, Status::Lobby);
        assert_eq!(room.state, None);
    }

    #[test]
    fn joining_without_preference_takes_the_free_side() {
        let mut room = Room::new("alice", Color::White);
        assert_eq!(room.join("bob", None), Seat::Black);
        assert_eq!(room.join("carol", None), Seat::Spectator);
        assert_eq!(room.players.white.as_deref(), Some("alice"));
        assert_eq!(room.players.black.as_deref(), Some("bob"));
    }

    #[test]
    fn joining_without_preference_prefers_white() {
        let mut room = Room::new("alice", Color::Black);
        assert_eq!(room.join("bob", None), Seat::White);
    }

    #[proptest]
    fn joining_a_taken_side_demotes_to_spectator(side: Color) {
        let mut room = Room::new("alice", side);
        assert_eq!(room.join("bob", Some(side)), Seat::Spectator);
        assert_eq!(room.seat("alice"), side.into());
    }

    #[proptest]
    fn rejoining_keeps_the_seat(side: Color, wanted: Option<Color>) {
        let mut room = Room::new("alice", side);
        assert_eq!(room.join("alice", wanted), side.into());
        assert_eq!(room.players.white.is_some(), side == Color::White);
        assert_eq!(room.players.black.is_some(), side == Color::Black);
    }

    #[proptest]
    fn leaving_frees_the_side(side: Color) {
        let mut room = Room::new("alice", side);
        room.leave("alice");
        assert_eq!(room.seat("alice"), Seat::Spectator);
        assert_eq!(room.join("bob", Some(side)), side.into());
    }

    #[test]
    fn pushing_makes_the_room_live() {
        let mut room = Room::new("alice", Color::White);
        let before = room.updated_at;
        room.push(StateDocument::from(&GameState::default()));
        assert_eq!(room.status, Status::Live);
        assert!(room.state.is_some());
        assert!(room.updated_at >= before);
    }

    #[test]
    fn room_is_serialized_with_millisecond_timestamps() {
        let room = Room::new("alice", Color::White);
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["createdAt"], room.created_at.timestamp_millis());
        assert_eq!(json["status"], "lobby");
        assert_eq!(json["players"]["white"], "alice");
        assert!(json["players"].get("black").is_none());
        assert!(json["state"].is_null());
    }

    #[test]
    fn room_without_players_or_state_is_parsed() {
        let json = serde_json::json!({
            "createdAt": 1_700_000_000_000i64,
            "updatedAt": 1_700_000_000_500i64,
            "status": "live",
        });

        let room: Room = serde_json::from_value(json).unwrap();
        assert_eq!(room.status, Status::Live);
        assert_eq!(room.players, Players::default());
        assert_eq!(room.state, None);
        assert_eq!(room.updated_at.timestamp_millis(), 1_700_000_000_500);
    }
}
