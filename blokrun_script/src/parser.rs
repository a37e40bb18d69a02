//! Recursive-descent parser from tokens to the program tree.
//!
//! The grammar is small and LL(1): every step starts with a keyword that
//! fully determines its shape. Bodies consume steps greedily until the
//! terminator closing the enclosing block, or end of input at the top level.
//! Any failure aborts the whole parse; no partial tree survives.

use blokrun_data::{ActionKind, Entity, InstructionKind, TERMINATOR};
use thiserror::Error;

use crate::ast::{Condition, Node, NodeId, Program};
use crate::token::{Token, classify_fragments};

/// Static grammar violations. Raised before any engine interaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty program: no tokens to parse")]
    EmptyProgram,
    #[error("program must start with a character name, found '{0}'")]
    MissingCharacter(String),
    #[error("unrecognized token '{0}'")]
    UnrecognizedToken(String),
    #[error("missing repeat count after 'repeter'")]
    MissingRepeatCount,
    #[error("repeat count must be at least 1")]
    ZeroRepeatCount,
    #[error("missing condition after '{0}'")]
    MissingCondition(&'static str),
    #[error("missing or invalid condition entity after '{0}'")]
    MissingConditionEntity(&'static str),
    #[error("unterminated block: '{0}' is missing its closing 'fin'")]
    UnterminatedBlock(&'static str),
    #[error("unexpected 'fin' with no open block")]
    UnexpectedTerminator,
}

/// Parse a classified token sequence into a [`Program`].
///
/// Total and deterministic: the same tokens always yield a structurally
/// identical tree.
///
/// # Errors
/// Returns a [`ParseError`] describing the first grammar violation found.
pub fn parse_tokens(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        nodes: Vec::new(),
    };
    let who = match parser.next() {
        None => return Err(ParseError::EmptyProgram),
        Some(Token::Character(ch)) => *ch,
        Some(other) => return Err(ParseError::MissingCharacter(token_word(other))),
    };
    let body = parser.parse_body()?;
    // parse_body only stops at a terminator or end of input; at the top
    // level a leftover token is an unmatched 'fin'
    if parser.peek().is_some() {
        return Err(ParseError::UnexpectedTerminator);
    }
    let root = parser.push(Node::Character { who, body });
    Ok(Program::new(parser.nodes, root))
}

/// Classify raw recognized fragments and parse them in one step.
///
/// # Errors
/// Returns a [`ParseError`] on any grammar violation, including fragments
/// that fail to classify.
pub fn parse_fragments<S: AsRef<str>>(fragments: &[S]) -> Result<Program, ParseError> {
    parse_tokens(&classify_fragments(fragments))
}

/// A parsed step waiting for its continuation link.
enum Step {
    Action(ActionKind),
    Repeat { count: u32, body: Option<NodeId> },
    While { cond: Condition, body: Option<NodeId> },
    If { cond: Condition, body: Option<NodeId> },
}

impl Step {
    fn into_node(self, next: Option<NodeId>) -> Node {
        match self {
            Step::Action(kind) => Node::Action { kind, next },
            Step::Repeat { count, body } => Node::Repeat { count, body, next },
            Step::While { cond, body } => Node::While { cond, body, next },
            Step::If { cond, body } => Node::If { cond, body, next },
        }
    }
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    nodes: Vec<Node>,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Parse steps until a terminator or end of input. The terminator itself
    /// is left for the enclosing block to consume.
    ///
    /// Each step is parsed before the rest of the body, then pushed with its
    /// continuation already known, so links are written exactly once.
    fn parse_body(&mut self) -> Result<Option<NodeId>, ParseError> {
        match self.peek() {
            None | Some(Token::Terminator) => Ok(None),
            Some(_) => {
                let step = self.parse_step()?;
                let rest = self.parse_body()?;
                Ok(Some(self.push(step.into_node(rest))))
            },
        }
    }

    fn parse_step(&mut self) -> Result<Step, ParseError> {
        let Some(token) = self.next() else {
            // peeked by parse_body before dispatching here
            unreachable!("parse_step called at end of input");
        };
        match token {
            Token::Action(kind) => Ok(Step::Action(*kind)),
            // an item card in step position means "use this item here"
            Token::Entity(Entity::Item(item)) => Ok(Step::Action(ActionKind::Use(*item))),
            Token::Instruction(InstructionKind::Repeat) => {
                let count = match self.next() {
                    Some(Token::Number(0)) => return Err(ParseError::ZeroRepeatCount),
                    Some(Token::Number(n)) => *n,
                    _ => return Err(ParseError::MissingRepeatCount),
                };
                let body = self.parse_body()?;
                self.expect_terminator(InstructionKind::Repeat)?;
                Ok(Step::Repeat { count, body })
            },
            Token::Instruction(kind) => {
                let cond = self.parse_condition(*kind)?;
                let body = self.parse_body()?;
                self.expect_terminator(*kind)?;
                Ok(match kind {
                    InstructionKind::While => Step::While { cond, body },
                    InstructionKind::If => Step::If { cond, body },
                    InstructionKind::Repeat => unreachable!("repeat handled above"),
                })
            },
            Token::Unrecognized(word) => Err(ParseError::UnrecognizedToken(word.clone())),
            other => Err(ParseError::UnrecognizedToken(token_word(other))),
        }
    }

    fn parse_condition(&mut self, opened_by: InstructionKind) -> Result<Condition, ParseError> {
        let kind = match self.next() {
            Some(Token::Condition(kind)) => *kind,
            _ => return Err(ParseError::MissingCondition(opened_by.keyword())),
        };
        let entity = match self.next() {
            Some(Token::Entity(entity)) => *entity,
            _ => return Err(ParseError::MissingConditionEntity(kind.keyword())),
        };
        Ok(Condition { kind, entity })
    }

    fn expect_terminator(&mut self, opened_by: InstructionKind) -> Result<(), ParseError> {
        match self.next() {
            Some(Token::Terminator) => Ok(()),
            _ => Err(ParseError::UnterminatedBlock(opened_by.keyword())),
        }
    }
}

/// Surface form of a token, for error messages.
fn token_word(token: &Token) -> String {
    match token {
        Token::Character(ch) => ch.keyword().to_string(),
        Token::Action(kind) => kind.keyword().to_string(),
        Token::Instruction(kind) => kind.keyword().to_string(),
        Token::Condition(kind) => kind.keyword().to_string(),
        Token::Entity(entity) => entity.keyword().to_string(),
        Token::Terminator => TERMINATOR.to_string(),
        Token::Number(n) => n.to_string(),
        Token::Unrecognized(word) => word.clone(),
    }
}
