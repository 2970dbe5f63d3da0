use ai_bt::{BehaviorNode, BtStatus, ExecuteContext};
use ai_nav::{NodePoint, Vec2};
use ai_tools::{emit, TraceEvent};

use crate::agent::Bot;
use crate::game::Game;

/// Plans a path from the bot to the `Vec2` stored under `key` and makes it
/// the current path.
///
/// The search is skipped while the current path already ends on the target
/// cell. Fails (and clears the current path) when no route exists.
#[derive(Debug, Clone)]
pub struct GoToPosition {
    key: String,
}

impl GoToPosition {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl<G: Game + 'static> BehaviorNode<Bot<G>> for GoToPosition {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        let Some(target) = ctx.blackboard.value::<Vec2>(&self.key) else {
            return BtStatus::Failure;
        };
        let Some(from) = ctx.agent.game.self_player().map(|p| p.position) else {
            return BtStatus::Failure;
        };
        let Some(goal_center) = NodePoint::from_world(target).map(NodePoint::center) else {
            return BtStatus::Failure;
        };

        let current = ctx.agent.nav.current_path();
        if !current.is_empty() && current.last() == Some(goal_center) {
            return BtStatus::Success;
        }

        let now = ctx.now();
        let path = ctx.agent.find_path(from, target);
        if path.is_empty() {
            tracing::debug!(?from, ?target, "No path to target");
            ctx.agent.nav.clear_path();
            emit(ctx.blackboard, TraceEvent::new(now, "path.none").with_label(self.key.clone()));
            return BtStatus::Failure;
        }

        emit(
            ctx.blackboard,
            TraceEvent::new(now, "path.found")
                .with_a(path.step_count() as i64)
                .with_label(self.key.clone()),
        );
        ctx.agent.nav.set_current_path(path);
        BtStatus::Success
    }
}

/// Succeeds when the bot has no current path.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathEmptyQuery;

impl<G: Game + 'static> BehaviorNode<Bot<G>> for PathEmptyQuery {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, Bot<G>>) -> BtStatus {
        BtStatus::from_bool(ctx.agent.nav.current_path().is_empty())
    }
}
