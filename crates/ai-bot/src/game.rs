//! Collaborator surface the bot needs from the game client.
//!
//! The host implements [`Game`] over its own connection, player list and map;
//! nothing here does I/O.

use ai_core::Tick;
use ai_nav::{Path, TileMap, Vec2};

pub type PlayerId = u16;

/// Ship index used for spectators.
pub const SPECTATOR_SHIP: u8 = 8;
pub const SHIP_COUNT: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub frequency: u16,
    pub ship: u8,
    pub position: Vec2,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, ship: u8) -> Self {
        Self {
            id,
            name: name.into(),
            frequency: 0,
            ship,
            position: Vec2::ZERO,
        }
    }

    pub fn in_ship(&self) -> bool {
        self.ship < SPECTATOR_SHIP
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponType {
    None,
    Bullet,
    BouncingBullet,
    Bomb,
    ProximityBomb,
    Repel,
    Decoy,
    Burst,
    Thor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShipItemType {
    Repel,
    Burst,
    Decoy,
    Thor,
    Brick,
    Rocket,
    Portal,
}

/// Bit set of ship capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShipCapability(pub u32);

impl ShipCapability {
    pub const STEALTH: ShipCapability = ShipCapability(1 << 0);
    pub const CLOAKING: ShipCapability = ShipCapability(1 << 1);
    pub const XRADAR: ShipCapability = ShipCapability(1 << 2);
    pub const ANTIWARP: ShipCapability = ShipCapability(1 << 3);
    pub const MULTIFIRE: ShipCapability = ShipCapability(1 << 4);
    pub const PROXIMITY: ShipCapability = ShipCapability(1 << 5);
    pub const BOUNCING_BULLETS: ShipCapability = ShipCapability(1 << 6);

    pub const fn empty() -> Self {
        ShipCapability(0)
    }

    /// `true` if any bit of `other` is present.
    pub const fn intersects(self, other: ShipCapability) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn union(self, other: ShipCapability) -> Self {
        ShipCapability(self.0 | other.0)
    }
}

impl core::ops::BitOr for ShipCapability {
    type Output = ShipCapability;

    fn bitor(self, rhs: ShipCapability) -> ShipCapability {
        self.union(rhs)
    }
}

/// Live state of the bot's own ship.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShipState {
    pub next_bullet_tick: Tick,
    pub next_bomb_tick: Tick,
    pub next_repel_tick: Tick,
    pub capability: ShipCapability,
    pub multifire: bool,
    pub guns: u32,
    pub bombs: u32,
    pub repels: u32,
    pub bursts: u32,
    pub decoys: u32,
    pub thors: u32,
    pub bricks: u32,
    pub rockets: u32,
    pub portals: u32,
    /// Seconds left on the placed portal; zero when none is placed.
    pub portal_time: f32,
    pub portal_location: Vec2,
}

impl ShipState {
    pub fn item_count(&self, item: ShipItemType) -> u32 {
        match item {
            ShipItemType::Repel => self.repels,
            ShipItemType::Burst => self.bursts,
            ShipItemType::Decoy => self.decoys,
            ShipItemType::Thor => self.thors,
            ShipItemType::Brick => self.bricks,
            ShipItemType::Rocket => self.rockets,
            ShipItemType::Portal => self.portals,
        }
    }

    /// Tick at which `weapon` may fire again, if it has a cooldown.
    pub fn cooldown_tick(&self, weapon: WeaponType) -> Option<Tick> {
        match weapon {
            WeaponType::Bullet | WeaponType::BouncingBullet => Some(self.next_bullet_tick),
            WeaponType::Bomb
            | WeaponType::ProximityBomb
            | WeaponType::Thor
            | WeaponType::Burst
            | WeaponType::Decoy => Some(self.next_bomb_tick),
            WeaponType::Repel => Some(self.next_repel_tick),
            WeaponType::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipSettings {
    /// Collision radius in tiles. Supported up to `ai_nav::MAX_FOOTPRINT / 2`;
    /// wider footprints drop edges and log a warning on rebuild.
    pub radius: f32,
    pub max_mines: u32,
}

impl Default for ShipSettings {
    fn default() -> Self {
        Self {
            radius: 14.0 / 16.0,
            max_mines: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaSettings {
    pub ships: [ShipSettings; SHIP_COUNT],
    pub team_max_mines: u32,
    /// Repel reach in pixels.
    pub repel_distance: u32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            ships: [ShipSettings::default(); SHIP_COUNT],
            team_max_mines: 0,
            repel_distance: 0,
        }
    }
}

impl ArenaSettings {
    /// Radius used for navigation. Spectators fit in a single tile.
    pub fn ship_radius(&self, ship: u8) -> f32 {
        self.ships
            .get(ship as usize)
            .map(|s| s.radius)
            .unwrap_or(0.5)
    }
}

/// Mines near a position, as counted by the game's weapon list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MineCounts {
    pub own: u32,
    pub team: u32,
    /// A mine already sits on the queried tile.
    pub at_position: bool,
}

pub trait Game {
    type Map: TileMap;

    fn map(&self) -> &Self::Map;

    /// Current wrapping game tick.
    fn tick(&self) -> Tick;

    fn self_player(&self) -> Option<&Player>;

    fn player(&self, id: PlayerId) -> Option<&Player>;

    fn ship(&self) -> &ShipState;

    fn settings(&self) -> &ArenaSettings;

    fn mine_counts(&self, player: &Player, position: Vec2) -> MineCounts;

    fn send_ship_request(&mut self, ship: u8);

    fn send_arena_join(&mut self, arena: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InputAction {
    Left,
    Right,
    Forward,
    Backward,
    Afterburner,
    Bomb,
    Bullet,
    Mine,
    Thor,
    Burst,
    Multifire,
    Antiwarp,
    Stealth,
    Cloak,
    XRadar,
    Repel,
    Warp,
    Portal,
    Decoy,
    Rocket,
    Brick,
    Attach,
}

/// Discrete input for one tick, one bit per [`InputAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub actions: u32,
}

impl InputState {
    const MOVEMENT: u32 = (1 << InputAction::Left as u32)
        | (1 << InputAction::Right as u32)
        | (1 << InputAction::Forward as u32)
        | (1 << InputAction::Backward as u32)
        | (1 << InputAction::Afterburner as u32);

    pub fn clear(&mut self) {
        self.actions = 0;
    }

    /// Keeps movement bits and drops everything else.
    pub fn clear_weapons(&mut self) {
        self.actions &= Self::MOVEMENT;
    }

    pub fn set(&mut self, action: InputAction, down: bool) {
        let bit = 1u32 << action as u32;
        if down {
            self.actions |= bit;
        } else {
            self.actions &= !bit;
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions & (1 << action as u32) != 0
    }
}

/// Turns the current path into a desired movement vector.
pub trait Steering {
    fn steer(&mut self, position: Vec2, path: &Path, dt: f32) -> Vec2;
}

/// Turns a desired movement vector into input bits.
pub trait Actuator {
    fn actuate(&mut self, player: &Player, desired: Vec2, dt: f32, input: &mut InputState);
}

/// Seeks the next waypoint not yet reached.
#[derive(Debug, Clone, Copy)]
pub struct SeekSteering {
    pub arrival_distance: f32,
}

impl Default for SeekSteering {
    fn default() -> Self {
        Self {
            arrival_distance: 0.5,
        }
    }
}

impl Steering for SeekSteering {
    fn steer(&mut self, position: Vec2, path: &Path, _dt: f32) -> Vec2 {
        match path.next_index(position, self.arrival_distance) {
            Some(index) => (path.points()[index] - position).normalized(),
            None => Vec2::ZERO,
        }
    }
}

/// Leaves input untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullActuator;

impl Actuator for NullActuator {
    fn actuate(&mut self, _player: &Player, _desired: Vec2, _dt: f32, _input: &mut InputState) {}
}
