#![allow(dead_code)]

use ai_bot::{ArenaSettings, Game, MineCounts, Player, PlayerId, ShipState};
use ai_core::Tick;
use ai_nav::{ArenaMap, Vec2};

pub const SELF_ID: PlayerId = 1;

pub struct TestGame {
    pub map: ArenaMap,
    pub tick: Tick,
    pub players: Vec<Player>,
    pub ship: ShipState,
    pub settings: ArenaSettings,
    pub mines: MineCounts,
    pub ship_requests: Vec<u8>,
    pub arena_joins: Vec<String>,
}

impl TestGame {
    pub fn new() -> Self {
        let mut me = Player::new(SELF_ID, "bot", 0);
        me.position = Vec2::new(10.5, 10.5);
        Self {
            map: ArenaMap::new(),
            tick: Tick::new(1),
            players: vec![me],
            ship: ShipState::default(),
            settings: ArenaSettings::default(),
            mines: MineCounts::default(),
            ship_requests: Vec::new(),
            arena_joins: Vec::new(),
        }
    }

    pub fn me_mut(&mut self) -> &mut Player {
        self.players
            .iter_mut()
            .find(|p| p.id == SELF_ID)
            .expect("self player")
    }

    pub fn advance(&mut self, ticks: u32) {
        self.tick = self.tick.wrapping_add(ticks);
    }
}

impl Game for TestGame {
    type Map = ArenaMap;

    fn map(&self) -> &ArenaMap {
        &self.map
    }

    fn tick(&self) -> Tick {
        self.tick
    }

    fn self_player(&self) -> Option<&Player> {
        self.player(SELF_ID)
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn ship(&self) -> &ShipState {
        &self.ship
    }

    fn settings(&self) -> &ArenaSettings {
        &self.settings
    }

    fn mine_counts(&self, _player: &Player, _position: Vec2) -> MineCounts {
        self.mines
    }

    fn send_ship_request(&mut self, ship: u8) {
        self.ship_requests.push(ship);
    }

    fn send_arena_join(&mut self, arena: &str) {
        self.arena_joins.push(arena.to_owned());
    }
}
