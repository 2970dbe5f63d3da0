//! Behavior leaves that query the game or drive navigation.

pub mod path;
pub mod ship;

pub use path::{GoToPosition, PathEmptyQuery};
pub use ship::{
    RepelDistanceQuery, ShipCapabilityQuery, ShipItemCountQuery, ShipItemCountThreshold,
    ShipMineCapableQuery, ShipMultifireQuery, ShipPortalPositionQuery, ShipQuery, ShipRequest,
    ShipWeaponCapabilityQuery, ShipWeaponCooldownQuery, LAST_SHIP_REQUEST_KEY,
    SHIP_REQUEST_INTERVAL_KEY,
};
