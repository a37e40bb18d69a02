//! blokrun_script: compiler from scanned keyword cards to a program tree.
//!
//! The optical recognition step (external) produces a flat list of text
//! fragments. This crate classifies each fragment into a [`Token`], then
//! parses the token list with a recursive-descent grammar into an immutable
//! arena [`Program`] the engine's interpreter walks:
//!
//! - `Program    := Character Body`
//! - `Body       := Step*`
//! - `Step       := Action | Item | 'repeter' N Body 'fin'`
//! - `           |  'tant que' Condition Body 'fin' | 'si' Condition Body 'fin'`
//! - `Condition  := ConditionPhrase EntityName`
//!
//! Classification is a pure lookup; parsing is total and deterministic and
//! fails with a descriptive [`ParseError`] on any grammar violation. Nothing
//! here touches the engine — a program either compiles completely or not at
//! all.

pub mod ast;
pub mod parser;
pub mod token;

pub use ast::{Condition, Node, NodeId, Program};
pub use parser::{ParseError, parse_fragments, parse_tokens};
pub use token::{Token, classify, classify_fragments};

use thiserror::Error;

/// Errors from serializing a compiled program.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("serializing program: {0}")]
    Ron(#[from] ron::Error),
}

/// Render a compiled program as pretty-printed RON, the engine's native
/// serialization format.
///
/// # Errors
/// Returns an error if RON serialization fails.
pub fn compile_to_ron(program: &Program) -> Result<String, CompileError> {
    let pretty = ron::ser::PrettyConfig::new();
    Ok(ron::ser::to_string_pretty(program, pretty)?)
}
