use std::marker::PhantomData;

use ai_core::Blackboard;

use crate::bt::{BehaviorNode, BtStatus, ExecuteContext};

/// Read-only predicate over the agent and blackboard.
pub struct Condition<A, F> {
    cond: F,
    _agent: PhantomData<fn(&A)>,
}

impl<A, F> Condition<A, F>
where
    F: FnMut(&A, &Blackboard) -> bool,
{
    pub fn new(cond: F) -> Self {
        Self {
            cond,
            _agent: PhantomData,
        }
    }
}

impl<A, F> BehaviorNode<A> for Condition<A, F>
where
    A: 'static,
    F: FnMut(&A, &Blackboard) -> bool + 'static,
{
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        BtStatus::from_bool((self.cond)(&*ctx.agent, &*ctx.blackboard))
    }
}

/// Leaf that runs a closure with full access to the execution context.
pub struct Task<A, F> {
    run: F,
    _agent: PhantomData<fn(&A)>,
}

impl<A, F> Task<A, F>
where
    F: FnMut(&mut ExecuteContext<'_, A>) -> BtStatus,
{
    pub fn new(run: F) -> Self {
        Self {
            run,
            _agent: PhantomData,
        }
    }
}

impl<A, F> BehaviorNode<A> for Task<A, F>
where
    A: 'static,
    F: FnMut(&mut ExecuteContext<'_, A>) -> BtStatus + 'static,
{
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        (self.run)(ctx)
    }
}

/// Succeeds when the blackboard holds any value under `key`.
pub struct HasKey {
    key: String,
}

impl HasKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl<A: 'static> BehaviorNode<A> for HasKey {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        BtStatus::from_bool(ctx.blackboard.has(&self.key))
    }
}
