//! Caller-facing compile-and-run entry point.
//!
//! All-or-nothing: the token stream is classified and parsed completely
//! before any engine state exists; a parse failure therefore never touches
//! the simulation. Map decoding happens after the parse but before the
//! first engine call.

use blokrun_data::{Cell, MapDef, MapError};
use blokrun_script::{ParseError, parse_fragments};
use log::info;
use thiserror::Error;

use crate::cancel::CancelToken;
use crate::engine::{Engine, MSG_LOST_DEFAULT, MSG_WON};
use crate::frames::FrameSink;
use crate::interpreter::{Outcome, execute};
use crate::world::World;

/// Static failures surfaced before execution begins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileRunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Map(#[from] MapError),
}

/// Terminal report for a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Won(String),
    Lost(String),
    /// Torn down by the hosting context; nothing to report to the player.
    Cancelled,
}

/// Compile a recognized fragment list and run it against a map.
///
/// A walk that ends with no terminal flag counts as a win only if the
/// character stands on the finish cell, and as a loss with the default
/// message otherwise.
///
/// # Errors
/// Returns [`CompileRunError`] for parse or map-decoding failures; both are
/// raised before any engine interaction.
pub fn compile_and_run<S, F>(
    fragments: &[F],
    map: &MapDef,
    frames: S,
    cancel: CancelToken,
) -> Result<RunOutcome, CompileRunError>
where
    S: FrameSink,
    F: AsRef<str>,
{
    let program = parse_fragments(fragments)?;
    info!(
        "program compiled: {} nodes for '{}' on map '{}'",
        program.len(),
        program.character().keyword(),
        map.name
    );
    let world = World::from_map(map)?;
    let mut engine = Engine::new(world, frames, cancel);
    let outcome = match execute(&program, &mut engine) {
        Outcome::Won => RunOutcome::Won(MSG_WON.to_string()),
        Outcome::Lost(reason) => RunOutcome::Lost(reason),
        Outcome::Cancelled => RunOutcome::Cancelled,
        Outcome::Completed => {
            if engine.world().current_cell() == Cell::Finish {
                RunOutcome::Won(MSG_WON.to_string())
            } else {
                RunOutcome::Lost(MSG_LOST_DEFAULT.to_string())
            }
        },
    };
    info!("run finished: {outcome:?}");
    Ok(outcome)
}
