use std::cell::Cell;
use std::rc::Rc;

use ai_bt::{BehaviorNode, BtStatus, ExecuteContext, NodeKind, Selector, Sequence, Task};
use ai_core::{Blackboard, Tick, TickContext};

#[derive(Default)]
struct Agent {
    log: Vec<&'static str>,
}

fn scripted(name: &'static str, status: BtStatus) -> Box<dyn BehaviorNode<Agent>> {
    Box::new(Task::new(move |ctx: &mut ExecuteContext<'_, Agent>| {
        ctx.agent.log.push(name);
        status
    }))
}

fn run(root: &mut dyn BehaviorNode<Agent>, agent: &mut Agent, bb: &mut Blackboard, tick: u32) -> BtStatus {
    let mut ctx = ExecuteContext::new(TickContext::new(Tick::new(tick), 0.016), agent, bb);
    root.execute(&mut ctx)
}

#[test]
fn sequence_stops_at_running_child() {
    let mut root = Sequence::new(vec![
        scripted("a", BtStatus::Success),
        scripted("b", BtStatus::Running),
        scripted("c", BtStatus::Success),
    ]);
    let mut agent = Agent::default();
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut root, &mut agent, &mut bb, 1), BtStatus::Running);
    assert_eq!(agent.log, vec!["a", "b"]);
    assert_eq!(root.kind(), NodeKind::Composite);
}

#[test]
fn sequence_fails_fast() {
    let mut root = Sequence::new(vec![
        scripted("a", BtStatus::Failure),
        scripted("b", BtStatus::Success),
    ]);
    let mut agent = Agent::default();
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut root, &mut agent, &mut bb, 1), BtStatus::Failure);
    assert_eq!(agent.log, vec!["a"]);
}

#[test]
fn selector_returns_first_success() {
    let mut root = Selector::new(vec![
        scripted("a", BtStatus::Failure),
        scripted("b", BtStatus::Success),
        scripted("c", BtStatus::Success),
    ]);
    let mut agent = Agent::default();
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut root, &mut agent, &mut bb, 1), BtStatus::Success);
    assert_eq!(agent.log, vec!["a", "b"]);
}

#[test]
fn empty_composites_have_neutral_results() {
    let mut agent = Agent::default();
    let mut bb = Blackboard::new();

    let mut seq = Sequence::<Agent>::new(Vec::new());
    let mut sel = Selector::<Agent>::new(Vec::new());
    assert_eq!(run(&mut seq, &mut agent, &mut bb, 1), BtStatus::Success);
    assert_eq!(run(&mut sel, &mut agent, &mut bb, 1), BtStatus::Failure);
}

struct CountsResets {
    resets: Rc<Cell<u32>>,
    status: Rc<Cell<BtStatus>>,
}

impl BehaviorNode<Agent> for CountsResets {
    fn execute(&mut self, _ctx: &mut ExecuteContext<'_, Agent>) -> BtStatus {
        self.status.get()
    }

    fn reset(&mut self) {
        self.resets.set(self.resets.get() + 1);
    }
}

#[test]
fn selector_resets_preempted_running_child() {
    let resets = Rc::new(Cell::new(0));
    let first = Rc::new(Cell::new(BtStatus::Failure));
    let mut root = Selector::new(vec![
        Box::new(CountsResets {
            resets: Rc::new(Cell::new(0)),
            status: first.clone(),
        }) as Box<dyn BehaviorNode<Agent>>,
        Box::new(CountsResets {
            resets: resets.clone(),
            status: Rc::new(Cell::new(BtStatus::Running)),
        }),
    ]);
    let mut agent = Agent::default();
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut root, &mut agent, &mut bb, 1), BtStatus::Running);
    assert_eq!(resets.get(), 0);

    // A higher priority branch starts running and takes over.
    first.set(BtStatus::Running);
    assert_eq!(run(&mut root, &mut agent, &mut bb, 2), BtStatus::Running);
    assert_eq!(resets.get(), 1);
}

#[test]
fn sequence_resets_only_children_after_the_running_one() {
    let first_resets = Rc::new(Cell::new(0));
    let second_resets = Rc::new(Cell::new(0));
    let first = Rc::new(Cell::new(BtStatus::Running));
    let mut root = Sequence::new(vec![
        Box::new(CountsResets {
            resets: first_resets.clone(),
            status: first.clone(),
        }) as Box<dyn BehaviorNode<Agent>>,
        Box::new(CountsResets {
            resets: second_resets.clone(),
            status: Rc::new(Cell::new(BtStatus::Running)),
        }),
    ]);
    let mut agent = Agent::default();
    let mut bb = Blackboard::new();

    assert_eq!(run(&mut root, &mut agent, &mut bb, 1), BtStatus::Running);

    // Moving on to a later child keeps the earlier one's state.
    first.set(BtStatus::Success);
    assert_eq!(run(&mut root, &mut agent, &mut bb, 2), BtStatus::Running);
    assert_eq!(first_resets.get(), 0);

    // An earlier child running again abandons the later one.
    first.set(BtStatus::Running);
    assert_eq!(run(&mut root, &mut agent, &mut bb, 3), BtStatus::Running);
    assert_eq!(second_resets.get(), 1);
    assert_eq!(first_resets.get(), 0);
}
