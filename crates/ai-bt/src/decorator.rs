use ai_core::Tick;

use crate::bt::{interval_allows, BehaviorNode, BtStatus, ExecuteContext, NodeKind};

/// Swaps `Success` and `Failure`; `Running` passes through.
pub struct Inverter<A: 'static> {
    child: Box<dyn BehaviorNode<A>>,
}

impl<A: 'static> Inverter<A> {
    pub fn new(child: Box<dyn BehaviorNode<A>>) -> Self {
        Self { child }
    }
}

impl<A: 'static> BehaviorNode<A> for Inverter<A> {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        match self.child.execute(ctx) {
            BtStatus::Success => BtStatus::Failure,
            BtStatus::Failure => BtStatus::Success,
            BtStatus::Running => BtStatus::Running,
        }
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Reports `Success` whenever the child finishes, whatever its result.
pub struct Succeeder<A: 'static> {
    child: Box<dyn BehaviorNode<A>>,
}

impl<A: 'static> Succeeder<A> {
    pub fn new(child: Box<dyn BehaviorNode<A>>) -> Self {
        Self { child }
    }
}

impl<A: 'static> BehaviorNode<A> for Succeeder<A> {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        match self.child.execute(ctx) {
            BtStatus::Running => BtStatus::Running,
            _ => BtStatus::Success,
        }
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

/// Runs the child until it has succeeded `times` times, at most once per
/// tick. A child failure resets the count and fails.
///
/// Once complete it keeps returning `Success` without running the child
/// until reset.
pub struct Repeat<A: 'static> {
    child: Box<dyn BehaviorNode<A>>,
    times: u32,
    done: u32,
}

impl<A: 'static> Repeat<A> {
    pub fn new(times: u32, child: Box<dyn BehaviorNode<A>>) -> Self {
        Self {
            child,
            times,
            done: 0,
        }
    }

    pub fn completed(&self) -> u32 {
        self.done
    }
}

impl<A: 'static> BehaviorNode<A> for Repeat<A> {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        if self.done >= self.times {
            return BtStatus::Success;
        }

        match self.child.execute(ctx) {
            BtStatus::Running => BtStatus::Running,
            BtStatus::Failure => {
                self.reset();
                BtStatus::Failure
            }
            BtStatus::Success => {
                self.done += 1;
                self.child.reset();
                if self.done >= self.times {
                    BtStatus::Success
                } else {
                    BtStatus::Running
                }
            }
        }
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn reset(&mut self) {
        self.done = 0;
        self.child.reset();
    }
}

/// Gates the child behind a tick interval stored in the blackboard.
///
/// Fails without running the child while the interval has not elapsed since
/// the last recorded `Tick` under `key`. The tick is recorded when the child
/// succeeds.
pub struct Cooldown<A: 'static> {
    child: Box<dyn BehaviorNode<A>>,
    key: String,
    interval: u32,
}

impl<A: 'static> Cooldown<A> {
    pub fn new(key: impl Into<String>, interval: u32, child: Box<dyn BehaviorNode<A>>) -> Self {
        Self {
            child,
            key: key.into(),
            interval,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<A: 'static> BehaviorNode<A> for Cooldown<A> {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        let now: Tick = ctx.now();
        if !interval_allows(ctx.blackboard, &self.key, now, self.interval) {
            return BtStatus::Failure;
        }

        let status = self.child.execute(ctx);
        if status == BtStatus::Success {
            ctx.blackboard.set(self.key.clone(), now);
        }
        status
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Decorator
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}
