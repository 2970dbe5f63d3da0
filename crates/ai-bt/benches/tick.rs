use ai_bt::{BehaviorNode, Condition, Cooldown, ExecuteContext, Selector, Sequence, Task, BtStatus};
use ai_core::{Blackboard, Tick, TickContext};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[derive(Default)]
struct Agent {
    fired: u64,
}

fn always_true(_agent: &Agent, _bb: &Blackboard) -> bool {
    true
}

fn bench_bt_tick(c: &mut Criterion) {
    let conditions = (0..32)
        .map(|_| Box::new(Condition::new(always_true)) as Box<dyn BehaviorNode<Agent>>)
        .collect::<Vec<_>>();

    let fire = Task::new(|ctx: &mut ExecuteContext<'_, Agent>| {
        ctx.agent.fired += 1;
        BtStatus::Success
    });

    let mut root = Selector::new(vec![
        Box::new(Cooldown::new("last_fire", 100, Box::new(fire))) as Box<dyn BehaviorNode<Agent>>,
        Box::new(Sequence::new(conditions)),
    ]);

    let mut agent = Agent::default();
    let mut bb = Blackboard::new();
    let mut tick = Tick::new(0);
    c.bench_function("ai-bt/tick(conditions=32)", |b| {
        b.iter(|| {
            let mut ctx = ExecuteContext::new(TickContext::new(tick, 0.016), &mut agent, &mut bb);
            black_box(root.execute(&mut ctx));
            tick = tick.wrapping_add(1);
        })
    });
    black_box(agent.fired);
}

criterion_group!(benches, bench_bt_tick);
criterion_main!(benches);
