use ai_core::{Blackboard, Tick, TickContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }

    pub fn is_done(self) -> bool {
        self != BtStatus::Running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Composite,
    Decorator,
    Leaf,
}

/// Everything a node may touch during one tick. Built fresh by the caller on
/// every tick and never stored.
pub struct ExecuteContext<'a, A> {
    pub tick: TickContext,
    pub agent: &'a mut A,
    pub blackboard: &'a mut Blackboard,
}

impl<'a, A> ExecuteContext<'a, A> {
    pub fn new(tick: TickContext, agent: &'a mut A, blackboard: &'a mut Blackboard) -> Self {
        Self {
            tick,
            agent,
            blackboard,
        }
    }

    pub fn now(&self) -> Tick {
        self.tick.tick
    }
}

/// A node in a behavior tree.
///
/// `execute` runs synchronously and returns within the tick; anything that
/// spans ticks keeps its progress in the blackboard (or in the node) and
/// reports `Running` until done.
pub trait BehaviorNode<A>: 'static {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus;

    fn kind(&self) -> NodeKind {
        NodeKind::Leaf
    }

    /// Drops per-node progress. Called when a parent abandons this branch.
    fn reset(&mut self) {}
}

/// `true` when no tick is stored under `key`, or at least `interval` ticks
/// have passed since the stored one (wraparound safe).
pub fn interval_allows(blackboard: &Blackboard, key: &str, now: Tick, interval: u32) -> bool {
    match blackboard.value::<Tick>(key) {
        None => true,
        Some(last) => now.is_at_or_after(last.wrapping_add(interval)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_gate_without_record_allows() {
        let bb = Blackboard::new();
        assert!(interval_allows(&bb, "last", Tick::new(5), 300));
    }

    #[test]
    fn interval_gate_blocks_until_interval_elapses() {
        let mut bb = Blackboard::new();
        let t = Tick::new(1_000);
        bb.set("last", t);

        assert!(!interval_allows(&bb, "last", t, 300));
        assert!(!interval_allows(&bb, "last", t.wrapping_add(1), 300));
        assert!(!interval_allows(&bb, "last", t.wrapping_add(299), 300));
        assert!(interval_allows(&bb, "last", t.wrapping_add(300), 300));
        assert!(interval_allows(&bb, "last", t.wrapping_add(5_000), 300));
    }

    #[test]
    fn interval_gate_is_wraparound_safe() {
        let mut bb = Blackboard::new();
        let t = Tick::new(Tick::MASK - 100);
        bb.set("last", t);

        let almost = t.wrapping_add(299);
        assert!(almost.value() < t.value());
        assert!(!interval_allows(&bb, "last", almost, 300));
        assert!(interval_allows(&bb, "last", t.wrapping_add(300), 300));
    }
}
