//! Tree-walking interpreter for compiled programs.
//!
//! Walks continuation links through the program arena, driving engine calls
//! for every action and evaluating conditions in place for the control-flow
//! nodes. The walk halts the moment the engine reports a terminal state or
//! the run is cancelled; no sibling continuation or remaining loop
//! iteration executes after that.

use blokrun_data::{ActionKind, ConditionKind};
use blokrun_script::{Condition, Node, NodeId, Program};
use log::debug;

use crate::engine::{Engine, JUMP_CELLS};
use crate::frames::FrameSink;
use crate::world::Terminal;

/// Result of one interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost(String),
    /// The walk ran off the end of the tree with no terminal flag set.
    /// The caller decides what that means (see the runner).
    Completed,
    /// The hosting context cancelled the run mid-flight.
    Cancelled,
}

/// Execute a program against an engine. The program is consumed read-only;
/// only engine state changes.
pub fn execute<S: FrameSink>(program: &Program, engine: &mut Engine<S>) -> Outcome {
    match program.node(program.root()) {
        Node::Character { who, body } => {
            engine.bind_character(*who);
            run_chain(program, engine, *body);
        },
        // the parser only roots programs at Character nodes
        _ => unreachable!("program root is always a Character node"),
    }
    if engine.is_cancelled() {
        return Outcome::Cancelled;
    }
    match engine.world().terminal() {
        Some(Terminal::Won) => Outcome::Won,
        Some(Terminal::Lost(reason)) => Outcome::Lost(reason.clone()),
        None => Outcome::Completed,
    }
}

/// Walk a continuation chain starting at `head` until it ends or the engine
/// halts.
fn run_chain<S: FrameSink>(program: &Program, engine: &mut Engine<S>, head: Option<NodeId>) {
    let mut cursor = head;
    while let Some(id) = cursor {
        if engine.halted() {
            return;
        }
        cursor = match program.node(id) {
            Node::Action { kind, next } => {
                if !run_action(engine, *kind) {
                    return;
                }
                *next
            },
            Node::Repeat { count, body, next } => {
                debug!("repeat x{count}");
                for _ in 0..*count {
                    if engine.halted() {
                        break;
                    }
                    run_chain(program, engine, *body);
                }
                *next
            },
            Node::While { cond, body, next } => {
                while !engine.halted() && eval(engine, *cond) {
                    run_chain(program, engine, *body);
                }
                *next
            },
            Node::If { cond, body, next } => {
                if eval(engine, *cond) {
                    run_chain(program, engine, *body);
                }
                *next
            },
            // never nested; guaranteed by the parser
            Node::Character { .. } => unreachable!("Character node inside a body"),
        };
    }
}

/// Run one action. Returns whether the walk may continue to the next node.
fn run_action<S: FrameSink>(engine: &mut Engine<S>, kind: ActionKind) -> bool {
    match kind {
        ActionKind::Move => {
            engine.advance();
            engine.check_state();
            !engine.halted()
        },
        ActionKind::Jump => {
            engine.pre_check_state();
            engine.jump(JUMP_CELLS);
            engine.check_state();
            !engine.halted()
        },
        // continue iff the pickup succeeded
        ActionKind::Grab => engine.grab(),
        ActionKind::Speak => {
            engine.speak();
            true
        },
        ActionKind::Use(item) => {
            engine.use_item(item);
            !engine.halted()
        },
    }
}

fn eval<S: FrameSink>(engine: &Engine<S>, cond: Condition) -> bool {
    match cond.kind {
        ConditionKind::IsInFront => engine.is_in_front(cond.entity),
        ConditionKind::IsOn => engine.is_on(cond.entity),
        ConditionKind::Possess => engine.possess(cond.entity),
    }
}
