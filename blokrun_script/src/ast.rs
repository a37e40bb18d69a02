//! The compiled program tree.
//!
//! Nodes live in an arena owned by [`Program`]; continuation links are plain
//! [`NodeId`] indices into that arena. The tree is immutable once built —
//! loops re-walk the same subtree by id, links are never rewritten, so there
//! is no aliasing between repeated body executions. Only engine state
//! changes while a program runs.

use blokrun_data::{ActionKind, Character, ConditionKind, Entity};
use serde::{Deserialize, Serialize};

/// Index of a node within its owning [`Program`] arena.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

/// A pure boolean query: condition phrase plus the entity it inspects.
/// Held inside `While`/`If` nodes, never walked as a step itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: ConditionKind,
    pub entity: Entity,
}

/// One instruction node. `next` is the continuation run after this node
/// completes; `body` is the nested block of the control-flow variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Program root: binds the active character, then runs `body`.
    /// Exactly one per program, only valid at the root.
    Character { who: Character, body: Option<NodeId> },
    /// Leaf effectful step.
    Action { kind: ActionKind, next: Option<NodeId> },
    /// Runs `body` `count` times, then continues with `next`.
    Repeat { count: u32, body: Option<NodeId>, next: Option<NodeId> },
    /// Runs `body` while the condition holds, then continues with `next`.
    While { cond: Condition, body: Option<NodeId>, next: Option<NodeId> },
    /// Runs `body` once if the condition holds, then continues with `next`.
    If { cond: Condition, body: Option<NodeId>, next: Option<NodeId> },
}

/// A complete compiled program, rooted at a `Character` node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Program {
    pub(crate) fn new(nodes: Vec<Node>, root: NodeId) -> Program {
        debug_assert!(root.0 < nodes.len());
        Program { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id. Ids are only ever minted by the parser for the
    /// arena they index, so this cannot go out of bounds for ids taken from
    /// this program.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of nodes in the arena (root included).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The character this program is written for.
    pub fn character(&self) -> Character {
        match self.node(self.root) {
            Node::Character { who, .. } => *who,
            // the parser only roots programs at Character nodes
            _ => unreachable!("program root is always a Character node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_accessors() {
        let body = Node::Action {
            kind: ActionKind::Move,
            next: None,
        };
        let root = Node::Character {
            who: Character::Bart,
            body: Some(NodeId(0)),
        };
        let program = Program::new(vec![body, root], NodeId(1));

        assert_eq!(program.len(), 2);
        assert!(!program.is_empty());
        assert_eq!(program.character(), Character::Bart);
        assert!(matches!(
            program.node(program.root()),
            Node::Character {
                who: Character::Bart,
                body: Some(NodeId(0))
            }
        ));
    }
}
