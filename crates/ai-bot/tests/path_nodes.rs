mod common;

use ai_bot::nodes::{GoToPosition, PathEmptyQuery};
use ai_bot::Bot;
use ai_bt::{BehaviorNode, BtStatus, ExecuteContext};
use ai_core::{Blackboard, TickContext};
use ai_nav::{tiles, DoorSolidMethod, NodePoint, Vec2};
use ai_tools::{TraceLog, TRACE_LOG};
use common::TestGame;

fn run<N: BehaviorNode<Bot<TestGame>>>(node: &mut N, bot: &mut Bot<TestGame>, bb: &mut Blackboard) -> BtStatus {
    let tick = bot.game.tick;
    let mut ctx = ExecuteContext::new(TickContext::new(tick, 0.016), bot, bb);
    node.execute(&mut ctx)
}

fn built_bot(game: TestGame) -> Bot<TestGame> {
    let mut bot = Bot::new(game, DoorSolidMethod::Dynamic);
    bot.nav.rebuild(&bot.game.map, 0.5);
    bot
}

#[test]
fn go_to_position_sets_current_path() {
    let mut bot = built_bot(TestGame::new());
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::with_capacity(8));

    assert_eq!(run(&mut PathEmptyQuery, &mut bot, &mut bb), BtStatus::Success);

    let mut go = GoToPosition::new("target");
    assert_eq!(run(&mut go, &mut bot, &mut bb), BtStatus::Failure);

    bb.set("target", Vec2::new(20.2, 20.7));
    assert_eq!(run(&mut go, &mut bot, &mut bb), BtStatus::Success);

    let path = bot.nav.current_path();
    assert_eq!(path.step_count(), 10);
    assert_eq!(path.first(), Some(Vec2::new(10.5, 10.5)));
    assert_eq!(path.last(), Some(Vec2::new(20.5, 20.5)));
    assert_eq!(run(&mut PathEmptyQuery, &mut bot, &mut bb), BtStatus::Failure);

    // Same target cell: reuses the path without searching again.
    assert_eq!(run(&mut go, &mut bot, &mut bb), BtStatus::Success);
    let log = bb.get::<TraceLog>(TRACE_LOG).expect("log");
    assert_eq!(log.with_tag("path.found").count(), 1);
}

#[test]
fn go_to_position_fails_for_enclosed_target() {
    let mut game = TestGame::new();
    game.map.outline(
        NodePoint::new(40, 40),
        NodePoint::new(44, 44),
        tiles::WALL_FIRST,
    );
    let mut bot = built_bot(game);
    let mut bb = Blackboard::new();
    bb.set(TRACE_LOG, TraceLog::with_capacity(8));

    bb.set("target", Vec2::new(12.5, 10.5));
    let mut go = GoToPosition::new("target");
    assert_eq!(run(&mut go, &mut bot, &mut bb), BtStatus::Success);
    assert!(!bot.nav.current_path().is_empty());

    bb.set("target", Vec2::new(42.5, 42.5));
    assert_eq!(run(&mut go, &mut bot, &mut bb), BtStatus::Failure);
    assert!(bot.nav.current_path().is_empty());

    let log = bb.get::<TraceLog>(TRACE_LOG).expect("log");
    assert_eq!(log.with_tag("path.none").count(), 1);
}

#[test]
fn search_is_skipped_before_the_grid_is_built() {
    let mut bot = Bot::new(TestGame::new(), DoorSolidMethod::Dynamic);
    let mut bb = Blackboard::new();
    bb.set("target", Vec2::new(12.5, 10.5));

    assert_eq!(
        run(&mut GoToPosition::new("target"), &mut bot, &mut bb),
        BtStatus::Failure
    );
}
