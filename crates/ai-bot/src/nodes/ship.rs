use ai_bt::{interval_allows, BehaviorNode, BtStatus, ExecuteContext};
use ai_core::{Blackboard, Tick};
use ai_tools::{emit, TraceEvent};

use crate::agent::Bot;
use crate::config::default_ship_request_interval;
use crate::game::{
    Game, Player, PlayerId, ShipCapability, ShipItemType, WeaponType, SPECTATOR_SHIP,
};

/// Blackboard key holding the `Tick` of the last ship change request.
pub const LAST_SHIP_REQUEST_KEY: &str = "last_ship_request_tick";

/// Blackboard key holding the request interval (`u32` ticks) used by
/// [`ShipRequest`] nodes without an explicit interval.
pub const SHIP_REQUEST_INTERVAL_KEY: &str = "ship_request_interval";

/// Ship index given inline or read (as `i32`) from the blackboard.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShipSource {
    Fixed(i32),
    Key(String),
}

impl ShipSource {
    fn resolve(&self, bb: &Blackboard) -> Option<i32> {
        match self {
            ShipSource::Fixed(ship) => Some(*ship),
            ShipSource::Key(key) => bb.value::<i32>(key),
        }
    }
}

fn self_in_ship<G: Game>(game: &G) -> Option<&Player> {
    game.self_player().filter(|p| p.in_ship())
}

/// Succeeds when a player is in the given ship.
///
/// The player is the bot itself unless a blackboard key holding a
/// [`PlayerId`] is given. Ships outside `0..=8` never match.
#[derive(Debug, Clone)]
pub struct ShipQuery {
    player_key: Option<String>,
    ship: ShipSource,
}

impl ShipQuery {
    pub fn new(ship: i32) -> Self {
        Self {
            player_key: None,
            ship: ShipSource::Fixed(ship),
        }
    }

    pub fn from_key(ship_key: impl Into<String>) -> Self {
        Self {
            player_key: None,
            ship: ShipSource::Key(ship_key.into()),
        }
    }

    pub fn for_player(mut self, player_key: impl Into<String>) -> Self {
        self.player_key = Some(player_key.into());
        self
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let game = &ctx.agent.game;
        let player = match &self.player_key {
            Some(key) => match ctx.blackboard.value::<PlayerId>(key) {
                Some(id) => game.player(id),
                None => return BtStatus::Failure,
            },
            None => game.self_player(),
        };
        let Some(player) = player else {
            return BtStatus::Failure;
        };
        let Some(ship) = self.ship.resolve(ctx.blackboard) else {
            return BtStatus::Failure;
        };
        if !(0..=SPECTATOR_SHIP as i32).contains(&ship) {
            return BtStatus::Failure;
        }
        BtStatus::from_bool(player.ship as i32 == ship)
    }
}

/// Asks the server for a ship change, at most once per interval.
///
/// The interval is the one given with [`ShipRequest::with_interval`], else
/// the value under [`SHIP_REQUEST_INTERVAL_KEY`], else 300 ticks. Succeeds once the bot is in the requested ship and stays `Running` while
/// waiting, whether or not a request went out this tick.
#[derive(Debug, Clone)]
pub struct ShipRequest {
    ship: ShipSource,
    interval: Option<u32>,
}

impl ShipRequest {
    pub fn new(ship: i32) -> Self {
        Self {
            ship: ShipSource::Fixed(ship),
            interval: None,
        }
    }

    pub fn from_key(ship_key: impl Into<String>) -> Self {
        Self {
            ship: ShipSource::Key(ship_key.into()),
            interval: None,
        }
    }

    pub fn with_interval(mut self, ticks: u32) -> Self {
        self.interval = Some(ticks);
        self
    }

    fn interval(&self, bb: &Blackboard) -> u32 {
        self.interval
            .or_else(|| bb.value::<u32>(SHIP_REQUEST_INTERVAL_KEY))
            .unwrap_or_else(default_ship_request_interval)
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipRequest {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let Some(current) = ctx.agent.game.self_player().map(|p| p.ship) else {
            return BtStatus::Failure;
        };
        let Some(requested) = self.ship.resolve(ctx.blackboard) else {
            return BtStatus::Failure;
        };
        if current as i32 == requested {
            return BtStatus::Success;
        }
        let Ok(requested) = u8::try_from(requested) else {
            return BtStatus::Failure;
        };
        if requested > SPECTATOR_SHIP {
            return BtStatus::Failure;
        }

        let now = ctx.now();
        let interval = self.interval(ctx.blackboard);
        if interval_allows(ctx.blackboard, LAST_SHIP_REQUEST_KEY, now, interval) {
            tracing::info!(ship = requested, "Sending ship request");
            ctx.agent.game.send_ship_request(requested);
            ctx.blackboard.set(LAST_SHIP_REQUEST_KEY, now);
            emit(
                ctx.blackboard,
                TraceEvent::new(now, "ship.request").with_a(requested as i64),
            );
        }

        BtStatus::Running
    }
}

/// Succeeds while the weapon is still cooling down.
#[derive(Debug, Clone, Copy)]
pub struct ShipWeaponCooldownQuery {
    weapon: WeaponType,
}

impl ShipWeaponCooldownQuery {
    pub fn new(weapon: WeaponType) -> Self {
        Self { weapon }
    }

    fn on_cooldown<G: Game>(&self, bot: &Bot<G>, now: Tick) -> bool {
        match bot.game.ship().cooldown_tick(self.weapon) {
            Some(ready) => ready.is_after(now),
            None => false,
        }
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipWeaponCooldownQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        BtStatus::from_bool(self.on_cooldown(ctx.agent, ctx.now()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShipCapabilityQuery {
    capability: ShipCapability,
}

impl ShipCapabilityQuery {
    pub fn new(capability: ShipCapability) -> Self {
        Self { capability }
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipCapabilityQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let game = &ctx.agent.game;
        if self_in_ship(game).is_none() {
            return BtStatus::Failure;
        }
        BtStatus::from_bool(game.ship().capability.intersects(self.capability))
    }
}

/// Succeeds when the ship carries at least `count` of an item.
#[derive(Debug, Clone, Copy)]
pub struct ShipItemCountThreshold {
    item: ShipItemType,
    count: u32,
}

impl ShipItemCountThreshold {
    pub fn new(item: ShipItemType, count: u32) -> Self {
        Self { item, count }
    }

    pub fn any(item: ShipItemType) -> Self {
        Self::new(item, 1)
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipItemCountThreshold {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        BtStatus::from_bool(ctx.agent.game.ship().item_count(self.item) >= self.count)
    }
}

/// Writes the item count (`u32`) to the blackboard.
#[derive(Debug, Clone)]
pub struct ShipItemCountQuery {
    item: ShipItemType,
    output_key: String,
}

impl ShipItemCountQuery {
    pub fn new(item: ShipItemType, output_key: impl Into<String>) -> Self {
        Self {
            item,
            output_key: output_key.into(),
        }
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipItemCountQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let count = ctx.agent.game.ship().item_count(self.item);
        ctx.blackboard.set(self.output_key.clone(), count);
        BtStatus::Success
    }
}

/// Succeeds when the ship has a weapon at `level` or better.
#[derive(Debug, Clone, Copy)]
pub struct ShipWeaponCapabilityQuery {
    weapon: WeaponType,
    level: u32,
}

impl ShipWeaponCapabilityQuery {
    pub fn new(weapon: WeaponType, level: u32) -> Self {
        Self { weapon, level }
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipWeaponCapabilityQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let game = &ctx.agent.game;
        if self_in_ship(game).is_none() {
            return BtStatus::Failure;
        }

        let ship = game.ship();
        let level = self.level;
        let capable = match self.weapon {
            WeaponType::Bullet => ship.guns >= level,
            WeaponType::BouncingBullet => {
                ship.capability.intersects(ShipCapability::BOUNCING_BULLETS) && ship.guns >= level
            }
            WeaponType::Bomb => ship.bombs >= level,
            WeaponType::ProximityBomb => {
                ship.capability.intersects(ShipCapability::PROXIMITY) && ship.bombs >= level
            }
            WeaponType::Repel => ship.repels >= level,
            WeaponType::Decoy => ship.decoys >= level,
            WeaponType::Burst => ship.bursts >= level,
            WeaponType::Thor => ship.thors >= level,
            WeaponType::None => false,
        };
        BtStatus::from_bool(capable)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShipMultifireQuery;

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipMultifireQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let game = &ctx.agent.game;
        if self_in_ship(game).is_none() {
            return BtStatus::Failure;
        }
        BtStatus::from_bool(game.ship().multifire)
    }
}

/// Succeeds when a mine could be laid right now.
///
/// Fails while bombs are cooling down, when the own or team mine limit is
/// reached, or when a mine already sits on the bot's tile.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipMineCapableQuery;

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipMineCapableQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let now = ctx.now();
        let bot = &*ctx.agent;
        let Some(me) = self_in_ship(&bot.game) else {
            return BtStatus::Failure;
        };

        if ShipWeaponCooldownQuery::new(WeaponType::Bomb).on_cooldown(bot, now) {
            return BtStatus::Failure;
        }

        let settings = bot.game.settings();
        let own_max = settings
            .ships
            .get(me.ship as usize)
            .map(|s| s.max_mines)
            .unwrap_or(0);
        let counts = bot.game.mine_counts(me, me.position);

        let blocked = counts.at_position
            || counts.own >= own_max
            || counts.team >= settings.team_max_mines;
        BtStatus::from_bool(!blocked)
    }
}

/// Writes the repel reach in tiles (`f32`) to the blackboard.
#[derive(Debug, Clone)]
pub struct RepelDistanceQuery {
    output_key: String,
}

impl RepelDistanceQuery {
    pub fn new(output_key: impl Into<String>) -> Self {
        Self {
            output_key: output_key.into(),
        }
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for RepelDistanceQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let game = &ctx.agent.game;
        if self_in_ship(game).is_none() {
            return BtStatus::Failure;
        }
        let distance = game.settings().repel_distance as f32 / 16.0;
        ctx.blackboard.set(self.output_key.clone(), distance);
        BtStatus::Success
    }
}

/// Succeeds while a portal is placed, optionally writing its location.
#[derive(Debug, Clone, Default)]
pub struct ShipPortalPositionQuery {
    output_key: Option<String>,
}

impl ShipPortalPositionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(output_key: impl Into<String>) -> Self {
        Self {
            output_key: Some(output_key.into()),
        }
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for ShipPortalPositionQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let ship = ctx.agent.game.ship();
        if ship.portal_time <= 0.0 {
            return BtStatus::Failure;
        }
        if let Some(key) = &self.output_key {
            ctx.blackboard.set(key.clone(), ship.portal_location);
        }
        BtStatus::Success
    }
}
