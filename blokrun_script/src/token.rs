//! Token classification.
//!
//! Maps each recognized text fragment to its semantic category. One fragment
//! is one token; multi-word phrases ("tant que", "est devant") arrive as a
//! single fragment from the recognizer. Unrecognized fragments are kept and
//! passed through for the parser to reject with a useful message.

use blokrun_data::{ActionKind, Character, ConditionKind, Entity, InstructionKind, TERMINATOR};
use serde::{Deserialize, Serialize};

/// A classified input token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    Character(Character),
    Action(ActionKind),
    Instruction(InstructionKind),
    Condition(ConditionKind),
    Entity(Entity),
    Terminator,
    Number(u32),
    Unrecognized(String),
}

/// Classify a single recognized fragment.
///
/// Lookup order walks the disjoint vocabularies; the numeric rule accepts
/// any run of decimal digits. Stateless, no side effects.
pub fn classify(fragment: &str) -> Token {
    let word = fragment.trim().to_lowercase();
    if word == TERMINATOR {
        return Token::Terminator;
    }
    if let Some(ch) = Character::from_keyword(&word) {
        return Token::Character(ch);
    }
    if let Some(kind) = ActionKind::from_keyword(&word) {
        return Token::Action(kind);
    }
    if let Some(kind) = InstructionKind::from_keyword(&word) {
        return Token::Instruction(kind);
    }
    if let Some(kind) = ConditionKind::from_keyword(&word) {
        return Token::Condition(kind);
    }
    if let Some(entity) = Entity::from_keyword(&word) {
        return Token::Entity(entity);
    }
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = word.parse::<u32>() {
            return Token::Number(n);
        }
    }
    Token::Unrecognized(fragment.trim().to_string())
}

/// Classify a whole fragment list in input order.
pub fn classify_fragments<S: AsRef<str>>(fragments: &[S]) -> Vec<Token> {
    fragments.iter().map(|f| classify(f.as_ref())).collect()
}
