//! End-to-end runs: classify, parse, and interpret whole programs against
//! maps, observing the animation through a recording frame sink.

use std::sync::{Arc, Mutex};

use blokrun_data::MapDef;
use blokrun_engine::engine::{FRAMES_PER_CELL, JUMP_CELLS, MSG_LOST_DEFAULT, MSG_LOST_GRAB, MSG_WON};
use blokrun_engine::{CancelToken, CompileRunError, Frame, FrameSink, RunOutcome, compile_and_run};
use blokrun_script::ParseError;

/// Captures every frame through a shared handle, so the sink can be moved
/// into the runner while the test keeps reading.
#[derive(Clone, Default)]
struct RecordingFrames {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl RecordingFrames {
    fn count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    fn airborne_count(&self) -> usize {
        self.frames.lock().unwrap().iter().filter(|f| f.airborne).count()
    }
}

impl FrameSink for RecordingFrames {
    fn frame(&mut self, frame: &Frame) {
        self.frames.lock().unwrap().push(frame.clone());
    }
}

/// Cancels the shared token after a fixed number of frames, simulating the
/// hosting context tearing down mid-animation.
struct CancellingFrames {
    token: CancelToken,
    after: usize,
    seen: usize,
}

impl FrameSink for CancellingFrames {
    fn frame(&mut self, _frame: &Frame) {
        self.seen += 1;
        if self.seen >= self.after {
            self.token.cancel();
        }
    }
}

fn map_of(symbols: &[&str]) -> MapDef {
    MapDef {
        name: "test".into(),
        theme: "foret".into(),
        cells: symbols.iter().map(ToString::to_string).collect(),
    }
}

fn frames_per_cell() -> usize {
    FRAMES_PER_CELL as usize
}

#[test]
fn single_move_onto_the_finish_wins() {
    let sink = RecordingFrames::default();
    let outcome = compile_and_run(&["bart", "avancer"], &map_of(&["e", "W"]), sink.clone(), CancelToken::new());
    assert_eq!(outcome, Ok(RunOutcome::Won(MSG_WON.into())));
    assert_eq!(sink.count(), frames_per_cell());
}

#[test]
fn repeat_issues_exactly_three_jumps() {
    let sink = RecordingFrames::default();
    let outcome = compile_and_run(
        &["bart", "repeter", "3", "sauter", "fin"],
        &map_of(&["e", "e", "e", "e", "e", "e", "e"]),
        sink.clone(),
        CancelToken::new(),
    );
    // no finish anywhere: fall-through is the default loss
    assert_eq!(outcome, Ok(RunOutcome::Lost(MSG_LOST_DEFAULT.into())));
    assert_eq!(sink.airborne_count(), 3 * JUMP_CELLS * frames_per_cell());
}

#[test]
fn jump_short_of_the_finish_is_reported_as_a_loss() {
    let outcome = compile_and_run(
        &["bart", "sauter"],
        &map_of(&["e", "e", "e", "e"]),
        blokrun_engine::NullFrames,
        CancelToken::new(),
    );
    assert_eq!(outcome, Ok(RunOutcome::Lost(MSG_LOST_DEFAULT.into())));
}

#[test]
fn missing_repeat_count_fails_without_any_engine_call() {
    let sink = RecordingFrames::default();
    let outcome = compile_and_run(
        &["bart", "repeter", "sauter", "fin"],
        &map_of(&["e", "W"]),
        sink.clone(),
        CancelToken::new(),
    );
    assert_eq!(outcome, Err(CompileRunError::Parse(ParseError::MissingRepeatCount)));
    assert_eq!(sink.count(), 0);
}

#[test]
fn skipped_if_body_leaves_the_map_untouched() {
    // no bush in front: the machete step never runs, nothing animates
    let sink = RecordingFrames::default();
    let outcome = compile_and_run(
        &["bart", "si", "est devant", "buisson", "machette", "fin"],
        &map_of(&["e", "e", "e"]),
        sink.clone(),
        CancelToken::new(),
    );
    assert_eq!(outcome, Ok(RunOutcome::Lost(MSG_LOST_DEFAULT.into())));
    assert_eq!(sink.count(), 0);
}

#[test]
fn halt_on_terminal_stops_all_animation() {
    let sink = RecordingFrames::default();
    let outcome = compile_and_run(
        &["bart", "avancer", "avancer", "avancer"],
        &map_of(&["e", "W", "e", "e"]),
        sink.clone(),
        CancelToken::new(),
    );
    assert_eq!(outcome, Ok(RunOutcome::Won(MSG_WON.into())));
    // only the first move animated
    assert_eq!(sink.count(), frames_per_cell());
}

#[test]
fn failed_grab_loses_and_stops_the_program() {
    let sink = RecordingFrames::default();
    let outcome = compile_and_run(
        &["bart", "ramasser", "avancer"],
        &map_of(&["e", "W"]),
        sink.clone(),
        CancelToken::new(),
    );
    assert_eq!(outcome, Ok(RunOutcome::Lost(MSG_LOST_GRAB.into())));
    assert_eq!(sink.count(), 0);
}

#[test]
fn successful_grab_feeds_the_possess_condition() {
    let words = [
        "bart", "ramasser", "tant que", "possede", "cle", "avancer", "fin",
    ];
    // the while body never clears the inventory: it loops until a terminal
    // state, here the finish two cells away
    let outcome = compile_and_run(
        &words,
        &map_of(&["cle", "e", "W"]),
        blokrun_engine::NullFrames,
        CancelToken::new(),
    );
    assert_eq!(outcome, Ok(RunOutcome::Won(MSG_WON.into())));
}

#[test]
fn cancellation_mid_animation_freezes_the_walk() {
    let token = CancelToken::new();
    let sink = CancellingFrames {
        token: token.clone(),
        after: 5,
        seen: 0,
    };
    let outcome = compile_and_run(
        &["bart", "avancer", "avancer"],
        &map_of(&["e", "e", "W"]),
        sink,
        token,
    );
    // cancelled inside the first move: no cell completed, no loss recorded
    assert_eq!(outcome, Ok(RunOutcome::Cancelled));
}

#[test]
fn nested_program_clears_obstacles_and_wins() {
    let words = [
        "bart", "ramasser", "si", "est devant", "buisson", "machette", "fin", "avancer", "avancer", "sauter",
        "avancer", "avancer",
    ];
    let outcome = compile_and_run(
        &words,
        &map_of(&["machette", "buisson", "e", "flaque", "e", "e", "W"]),
        blokrun_engine::NullFrames,
        CancelToken::new(),
    );
    assert_eq!(outcome, Ok(RunOutcome::Won(MSG_WON.into())));
}
