//! Bot controller for a tile-arena game client.
//!
//! [`Controller`] owns a [`Bot`] (game handle plus grid navigation), its
//! blackboard and the active behavior tree. The host feeds it [`GameEvent`]s
//! and calls [`Controller::update`] once per tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod game;
pub mod nodes;
pub mod observer;

pub use agent::{Bot, Navigation};
pub use config::BotConfig;
pub use controller::Controller;
pub use error::ConfigError;
pub use events::GameEvent;
pub use game::{
    Actuator, ArenaSettings, Game, InputAction, InputState, MineCounts, NullActuator, Player,
    PlayerId, SeekSteering, ShipCapability, ShipItemType, ShipSettings, ShipState, Steering,
    WeaponType, SHIP_COUNT, SPECTATOR_SHIP,
};
pub use observer::{BehaviorObserver, LoggingObserver, RecordingObserver};
