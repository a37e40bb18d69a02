//! Shared data model for blokrun content.
//!
//! The vocabulary here is the closed set of keywords the card scanner can
//! recognize, and the map model is the linear strip of cells a program runs
//! against. Both are consumed by `blokrun_script` (compiler) and
//! `blokrun_engine` (simulation).

pub mod map;
pub mod vocab;

pub use map::{Cell, MapError, MapDef, builtin_map};
pub use vocab::{ActionKind, Character, ConditionKind, Entity, Environment, InstructionKind, Item, TERMINATOR};
