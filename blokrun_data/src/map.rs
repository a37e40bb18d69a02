//! Map data model: a level is a linear strip of cells.
//!
//! Serialized maps (RON) store one symbol per cell: `"e"` for an empty cell,
//! `"W"` for the finish line, or an item/environment keyword for an occupied
//! cell. [`MapDef::decode`] turns the symbols into typed [`Cell`]s and is the
//! single validation point for map content.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocab::{Entity, Environment, Item};

/// One cell of the level strip.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// The finish line. Reaching it wins the run.
    Finish,
    Item(Item),
    Env(Environment),
}

impl Cell {
    pub fn from_symbol(symbol: &str) -> Option<Cell> {
        match symbol {
            "e" => Some(Cell::Empty),
            "W" => Some(Cell::Finish),
            other => Entity::from_keyword(other).map(|entity| match entity {
                Entity::Item(item) => Cell::Item(item),
                Entity::Env(env) => Cell::Env(env),
            }),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "e",
            Cell::Finish => "W",
            Cell::Item(item) => item.keyword(),
            Cell::Env(env) => env.keyword(),
        }
    }

    /// The entity occupying this cell, if any.
    pub fn entity(self) -> Option<Entity> {
        match self {
            Cell::Item(item) => Some(Entity::Item(item)),
            Cell::Env(env) => Some(Entity::Env(env)),
            Cell::Empty | Cell::Finish => None,
        }
    }

    /// Standing on this cell loses the run.
    pub fn is_landing_hazard(self) -> bool {
        matches!(self, Cell::Env(Environment::Puddle) | Cell::Env(Environment::Bush))
    }

    /// This cell cannot be jumped over or onto.
    pub fn blocks_jump(self) -> bool {
        matches!(self, Cell::Env(Environment::Bush))
    }
}

/// A serialized level definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDef {
    pub name: String,
    /// Visual theme tag. Only carried through to observers; the simulation
    /// ignores it.
    pub theme: String,
    pub cells: Vec<String>,
}

/// Errors found while validating a `MapDef`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map '{map}' has no cells")]
    Empty { map: String },
    #[error("map '{map}': unknown cell symbol '{symbol}'")]
    UnknownSymbol { map: String, symbol: String },
}

impl MapDef {
    /// Decode and validate the cell symbols.
    ///
    /// # Errors
    /// - if the map has no cells, or any symbol is not a known cell
    pub fn decode(&self) -> Result<Vec<Cell>, MapError> {
        if self.cells.is_empty() {
            return Err(MapError::Empty { map: self.name.clone() });
        }
        self.cells
            .iter()
            .map(|symbol| {
                Cell::from_symbol(symbol).ok_or_else(|| MapError::UnknownSymbol {
                    map: self.name.clone(),
                    symbol: symbol.clone(),
                })
            })
            .collect()
    }
}

/// Built-in levels matching the original tutorial maps.
pub fn builtin_map(name: &str) -> Option<MapDef> {
    let def = match name {
        "foret1" => MapDef {
            name: "foret1".into(),
            theme: "atelier".into(),
            cells: ["e", "e", "flaque", "e", "e", "e", "e", "W"].map(String::from).to_vec(),
        },
        "foret2" => MapDef {
            name: "foret2".into(),
            theme: "foret".into(),
            cells: ["e", "e", "e", "e", "e", "e", "e", "W"].map(String::from).to_vec(),
        },
        _ => return None,
    };
    Some(def)
}
