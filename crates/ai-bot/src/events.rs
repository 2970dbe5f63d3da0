use ai_nav::NodePoint;

use crate::game::PlayerId;

/// Game-side events the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new map finished loading.
    MapLoad,
    /// The bot entered the arena.
    JoinGame,
    PlayerEnter { player: PlayerId },
    FreqAndShipChange {
        player: PlayerId,
        frequency: u16,
        ship: u8,
    },
    /// Door tiles changed state; the map already reflects the change.
    DoorToggle { points: Vec<NodePoint> },
    BrickPlaced { points: Vec<NodePoint> },
    BrickCleared { points: Vec<NodePoint> },
    LoginResponse { success: bool },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::MapLoad => "map_load",
            GameEvent::JoinGame => "join_game",
            GameEvent::PlayerEnter { .. } => "player_enter",
            GameEvent::FreqAndShipChange { .. } => "freq_and_ship_change",
            GameEvent::DoorToggle { .. } => "door_toggle",
            GameEvent::BrickPlaced { .. } => "brick_placed",
            GameEvent::BrickCleared { .. } => "brick_cleared",
            GameEvent::LoginResponse { .. } => "login_response",
        }
    }
}
