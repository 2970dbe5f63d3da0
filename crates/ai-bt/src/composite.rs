use crate::bt::{BehaviorNode, BtStatus, ExecuteContext, NodeKind};

/// Re-evaluates every child from the first on each tick and stops at the
/// first `Failure` or `Running`.
///
/// When the running child moves, the previously running one is reset so it
/// does not resume stale progress later.
pub struct Sequence<A: 'static> {
    children: Vec<Box<dyn BehaviorNode<A>>>,
    running: Option<usize>,
}

impl<A: 'static> Sequence<A> {
    pub fn new(children: Vec<Box<dyn BehaviorNode<A>>>) -> Self {
        Self {
            children,
            running: None,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<A: 'static> BehaviorNode<A> for Sequence<A> {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        for i in 0..self.children.len() {
            match self.children[i].execute(ctx) {
                BtStatus::Success => continue,
                BtStatus::Failure => {
                    self.reset();
                    return BtStatus::Failure;
                }
                BtStatus::Running => {
                    track_running(&mut self.children, &mut self.running, i);
                    return BtStatus::Running;
                }
            }
        }

        self.reset();
        BtStatus::Success
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn reset(&mut self) {
        self.running = None;
        for child in self.children.iter_mut() {
            child.reset();
        }
    }
}

/// Re-evaluates every child from the first on each tick and stops at the
/// first `Success` or `Running`.
pub struct Selector<A: 'static> {
    children: Vec<Box<dyn BehaviorNode<A>>>,
    running: Option<usize>,
}

impl<A: 'static> Selector<A> {
    pub fn new(children: Vec<Box<dyn BehaviorNode<A>>>) -> Self {
        Self {
            children,
            running: None,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<A: 'static> BehaviorNode<A> for Selector<A> {
    fn execute(&mut self, ctx: &mut ExecuteContext<'_, A>) -> BtStatus {
        for i in 0..self.children.len() {
            match self.children[i].execute(ctx) {
                BtStatus::Failure => continue,
                BtStatus::Success => {
                    self.reset();
                    return BtStatus::Success;
                }
                BtStatus::Running => {
                    track_running(&mut self.children, &mut self.running, i);
                    return BtStatus::Running;
                }
            }
        }

        self.reset();
        BtStatus::Failure
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Composite
    }

    fn reset(&mut self) {
        self.running = None;
        for child in self.children.iter_mut() {
            child.reset();
        }
    }
}

fn track_running<A: 'static>(
    children: &mut [Box<dyn BehaviorNode<A>>],
    running: &mut Option<usize>,
    index: usize,
) {
    if *running == Some(index) {
        return;
    }
    // Only a later child loses its progress when an earlier one takes over.
    if let Some(prev) = running.replace(index) {
        if prev > index {
            children[prev].reset();
        }
    }
}
