use ai_bt::{BehaviorNode, BehaviorRepository, BtStatus, ExecuteContext};
use ai_core::{BbScope, Blackboard, TickContext};
use ai_nav::NodePoint;
use ai_tools::{emit, TraceEvent, TraceLog, TRACE_LOG};

use crate::agent::Bot;
use crate::config::BotConfig;
use crate::error::Result;
use crate::events::GameEvent;
use crate::game::{
    Actuator, Game, InputState, NullActuator, PlayerId, SeekSteering, Steering, SPECTATOR_SHIP,
};
use crate::nodes::SHIP_REQUEST_INTERVAL_KEY;
use crate::observer::{BehaviorObserver, LoggingObserver};

/// Drives one bot: keeps the navigation grid current, ticks the active
/// behavior tree and forwards the current path to steering and actuation.
///
/// Everything runs synchronously on the caller's thread; events are handled
/// immediately as they are passed in.
pub struct Controller<G: Game + 'static> {
    bot: Bot<G>,
    blackboard: Blackboard,
    tree: Option<Box<dyn BehaviorNode<Bot<G>>>>,
    behavior_name: String,
    behaviors: BehaviorRepository<Bot<G>>,
    observers: Vec<Box<dyn BehaviorObserver>>,
    config: BotConfig,
    steering: Box<dyn Steering>,
    actuator: Box<dyn Actuator>,
    last_status: Option<BtStatus>,
}

impl<G: Game + 'static> Controller<G> {
    pub fn new(game: G, config: BotConfig) -> Result<Self> {
        config.validate()?;

        let mut blackboard = Blackboard::new();
        blackboard.set(SHIP_REQUEST_INTERVAL_KEY, config.ship_request_interval_ticks);
        if config.trace_capacity > 0 {
            blackboard.set(TRACE_LOG, TraceLog::with_capacity(config.trace_capacity));
        }

        Ok(Self {
            bot: Bot::new(game, config.effective_door_method()),
            blackboard,
            tree: None,
            behavior_name: String::new(),
            behaviors: BehaviorRepository::new(),
            observers: vec![Box::new(LoggingObserver)],
            config,
            steering: Box::new(SeekSteering::default()),
            actuator: Box::new(NullActuator),
            last_status: None,
        })
    }

    pub fn with_steering(mut self, steering: Box<dyn Steering>) -> Self {
        self.steering = steering;
        self
    }

    pub fn with_actuator(mut self, actuator: Box<dyn Actuator>) -> Self {
        self.actuator = actuator;
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn BehaviorObserver>) {
        self.observers.push(observer);
    }

    pub fn bot(&self) -> &Bot<G> {
        &self.bot
    }

    pub fn bot_mut(&mut self) -> &mut Bot<G> {
        &mut self.bot
    }

    pub fn game(&self) -> &G {
        &self.bot.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.bot.game
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn behaviors(&self) -> &BehaviorRepository<Bot<G>> {
        &self.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut BehaviorRepository<Bot<G>> {
        &mut self.behaviors
    }

    pub fn behavior_name(&self) -> &str {
        &self.behavior_name
    }

    pub fn has_behavior(&self) -> bool {
        self.tree.is_some()
    }

    /// Status returned by the tree on the last update that ran it.
    pub fn last_status(&self) -> Option<BtStatus> {
        self.last_status
    }

    pub fn trace_log(&self) -> Option<&TraceLog> {
        self.blackboard.get::<TraceLog>(TRACE_LOG)
    }

    /// Runs one tick.
    ///
    /// Input is always cleared. Nothing else runs until the game reports the
    /// bot's own player.
    pub fn update(&mut self, dt: f32, input: &mut InputState) {
        input.clear();
        let Some(ship) = self.bot.game.self_player().map(|p| p.ship) else {
            return;
        };

        let radius = self.bot.game.settings().ship_radius(ship);
        if self.bot.nav.needs_rebuild(radius) {
            self.rebuild_nav(radius);
        }

        let tick = self.bot.game.tick();

        if let Some(tree) = self.tree.as_mut() {
            let mut ctx = ExecuteContext::new(
                TickContext::new(tick, dt),
                &mut self.bot,
                &mut self.blackboard,
            );
            self.last_status = Some(tree.execute(&mut ctx));
        }

        let Some(me) = self.bot.game.self_player() else {
            return;
        };
        let desired = self
            .steering
            .steer(me.position, self.bot.nav.current_path(), dt);
        self.actuator.actuate(me, desired, dt, input);
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        tracing::debug!(event = event.name(), "Handling game event");

        match event {
            GameEvent::MapLoad => {
                self.bot.nav.invalidate();
                self.bot
                    .nav
                    .set_door_method(self.config.effective_door_method());
                let radius = self.current_radius();
                self.rebuild_nav(radius);
            }
            GameEvent::JoinGame => {
                self.blackboard.clear_scope(BbScope::Arena);
            }
            GameEvent::PlayerEnter { player } => {
                if self.is_self(*player) {
                    self.blackboard.clear_scope(BbScope::Arena);
                }
            }
            GameEvent::FreqAndShipChange { player, .. } => {
                if self.is_self(*player) {
                    let cleared = self.blackboard.clear_scope(BbScope::Ship);
                    self.bot.nav.clear_path();
                    tracing::debug!(cleared, "Cleared ship-scoped values");
                }
            }
            GameEvent::DoorToggle { points }
            | GameEvent::BrickPlaced { points }
            | GameEvent::BrickCleared { points } => {
                self.patch_nav(points);
            }
            GameEvent::LoginResponse { success } => {
                if !*success {
                    tracing::debug!("Login failed; keeping current behavior");
                    return;
                }
                if let Some(arena) = self.config.default_arena.clone() {
                    tracing::info!(arena = %arena, "Joining default arena");
                    self.bot.game.send_arena_join(&arena);
                }
                if let Some(name) = self.config.default_behavior.clone() {
                    self.select_behavior(&name);
                }
            }
        }
    }

    /// Swaps in `tree` as the active behavior, then notifies observers with
    /// the previous and new names.
    pub fn set_behavior(&mut self, name: impl Into<String>, tree: Box<dyn BehaviorNode<Bot<G>>>) {
        let name = name.into();
        let previous = std::mem::replace(&mut self.behavior_name, name);
        self.tree = Some(tree);
        self.last_status = None;

        let tick = self.bot.game.tick();
        emit(
            &mut self.blackboard,
            TraceEvent::new(tick, "bt.change").with_label(self.behavior_name.clone()),
        );

        for observer in self.observers.iter_mut() {
            observer.on_behavior_change(&previous, &self.behavior_name);
        }
    }

    /// Builds `name` from the repository and activates it.
    ///
    /// Returns `false` (keeping the current tree) if no such behavior exists.
    pub fn select_behavior(&mut self, name: &str) -> bool {
        match self.behaviors.build(name) {
            Some(tree) => {
                self.set_behavior(name, tree);
                true
            }
            None => {
                tracing::warn!(behavior = name, "Unknown behavior");
                false
            }
        }
    }

    fn is_self(&self, player: PlayerId) -> bool {
        self.bot
            .game
            .self_player()
            .is_some_and(|me| me.id == player)
    }

    fn current_radius(&self) -> f32 {
        let ship = self
            .bot
            .game
            .self_player()
            .map(|p| p.ship)
            .unwrap_or(SPECTATOR_SHIP);
        self.bot.game.settings().ship_radius(ship)
    }

    fn rebuild_nav(&mut self, radius: f32) {
        let traversable = self.bot.nav.rebuild(self.bot.game.map(), radius);
        let regions = self.bot.nav.regions().region_count();
        tracing::info!(radius, traversable, regions, "Navigation grid rebuilt");

        let tick = self.bot.game.tick();
        emit(
            &mut self.blackboard,
            TraceEvent::new(tick, "nav.rebuild")
                .with_a(traversable as i64)
                .with_b(regions as i64),
        );
    }

    fn patch_nav(&mut self, points: &[NodePoint]) {
        if !self.config.enable_dynamic_path {
            return;
        }
        let cells = self.bot.nav.patch(self.bot.game.map(), points);
        if cells == 0 {
            return;
        }
        tracing::trace!(points = points.len(), cells, "Navigation grid patched");

        let tick = self.bot.game.tick();
        emit(
            &mut self.blackboard,
            TraceEvent::new(tick, "nav.patch")
                .with_a(points.len() as i64)
                .with_b(cells as i64),
        );
    }
}
