//! Closed keyword vocabularies recognized on scanned cards.
//!
//! Every variant maps to exactly one canonical (French) keyword. Lookup is
//! case-insensitive at the classifier level; the tables here expect
//! lowercase input. A couple of keywords also accept their unaccented
//! spelling because the text recognizer frequently drops diacritics.

use serde::{Deserialize, Serialize};

/// The single reserved keyword closing any open repeat/while/if block.
pub const TERMINATOR: &str = "fin";

/// Playable character names. A program is rooted at exactly one of these.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Bart,
    Kevin,
    Dinny,
    Harry,
    Charlie,
    Cyclops,
    Nosy,
    MrMustache,
    MsBrocoli,
}

impl Character {
    pub const ALL: [Character; 9] = [
        Character::Bart,
        Character::Kevin,
        Character::Dinny,
        Character::Harry,
        Character::Charlie,
        Character::Cyclops,
        Character::Nosy,
        Character::MrMustache,
        Character::MsBrocoli,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Character::Bart => "bart",
            Character::Kevin => "kevin",
            Character::Dinny => "dinny",
            Character::Harry => "harry",
            Character::Charlie => "charlie",
            Character::Cyclops => "cyclops",
            Character::Nosy => "nosy",
            Character::MrMustache => "mr. mustache",
            Character::MsBrocoli => "ms. brocoli",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Character> {
        Character::ALL.into_iter().find(|c| c.keyword() == word)
    }
}

/// Leaf program steps with a direct engine effect.
///
/// `Use` has no keyword of its own: an item card in step position (e.g.
/// "machette") parses as using that item on the spot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Jump,
    Grab,
    Speak,
    Use(Item),
}

impl ActionKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ActionKind::Move => "avancer",
            ActionKind::Jump => "sauter",
            ActionKind::Grab => "ramasser",
            ActionKind::Speak => "parler",
            ActionKind::Use(item) => item.keyword(),
        }
    }

    pub fn from_keyword(word: &str) -> Option<ActionKind> {
        match word {
            "avancer" => Some(ActionKind::Move),
            "sauter" => Some(ActionKind::Jump),
            "ramasser" => Some(ActionKind::Grab),
            "parler" => Some(ActionKind::Speak),
            _ => None,
        }
    }
}

/// Control-flow keywords. Each opened block is closed by [`TERMINATOR`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstructionKind {
    Repeat,
    While,
    If,
}

impl InstructionKind {
    pub fn keyword(self) -> &'static str {
        match self {
            InstructionKind::Repeat => "repeter",
            InstructionKind::While => "tant que",
            InstructionKind::If => "si",
        }
    }

    pub fn from_keyword(word: &str) -> Option<InstructionKind> {
        match word {
            "repeter" => Some(InstructionKind::Repeat),
            "tant que" => Some(InstructionKind::While),
            "si" => Some(InstructionKind::If),
            _ => None,
        }
    }
}

/// Pure boolean queries against engine state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionKind {
    IsInFront,
    IsOn,
    Possess,
}

impl ConditionKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ConditionKind::IsInFront => "est devant",
            ConditionKind::IsOn => "est sur",
            ConditionKind::Possess => "possede",
        }
    }

    pub fn from_keyword(word: &str) -> Option<ConditionKind> {
        match word {
            "est devant" => Some(ConditionKind::IsInFront),
            "est sur" => Some(ConditionKind::IsOn),
            "possede" | "possède" => Some(ConditionKind::Possess),
            _ => None,
        }
    }
}

/// Collectible items. They occupy map cells and stack in the inventory.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Item {
    Key,
    Plush,
    Flower,
    Machete,
    Trash,
}

impl Item {
    pub const ALL: [Item; 5] = [Item::Key, Item::Plush, Item::Flower, Item::Machete, Item::Trash];

    pub fn keyword(self) -> &'static str {
        match self {
            Item::Key => "cle",
            Item::Plush => "peluche",
            Item::Flower => "fleur",
            Item::Machete => "machette",
            Item::Trash => "déchet",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Item> {
        match word {
            "cle" => Some(Item::Key),
            "peluche" => Some(Item::Plush),
            "fleur" => Some(Item::Flower),
            "machette" => Some(Item::Machete),
            "déchet" | "dechet" => Some(Item::Trash),
            _ => None,
        }
    }
}

/// Fixed scenery objects. They occupy map cells but cannot be picked up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    Door,
    Chair,
    Bush,
    Puddle,
    Bin,
    Flag,
}

impl Environment {
    pub const ALL: [Environment; 6] = [
        Environment::Door,
        Environment::Chair,
        Environment::Bush,
        Environment::Puddle,
        Environment::Bin,
        Environment::Flag,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Environment::Door => "porte",
            Environment::Chair => "chaise",
            Environment::Bush => "buisson",
            Environment::Puddle => "flaque",
            Environment::Bin => "poubelle",
            Environment::Flag => "drapeau",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Environment> {
        Environment::ALL.into_iter().find(|e| e.keyword() == word)
    }
}

/// An item or environment name used as a condition or action argument.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Item(Item),
    Env(Environment),
}

impl Entity {
    pub fn keyword(self) -> &'static str {
        match self {
            Entity::Item(item) => item.keyword(),
            Entity::Env(env) => env.keyword(),
        }
    }

    pub fn from_keyword(word: &str) -> Option<Entity> {
        Item::from_keyword(word)
            .map(Entity::Item)
            .or_else(|| Environment::from_keyword(word).map(Entity::Env))
    }
}
