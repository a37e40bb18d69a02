//! Simulation state owned by the engine.
//!
//! [`World`] holds the map strip, character binding, position, inventory and
//! the terminal flag. It is mutated only by the engine in response to
//! interpreter calls; observers get value [`WorldSnapshot`] copies, never
//! the live structure.

use std::collections::HashMap;

use blokrun_data::{Cell, Character, Entity, Item, MapDef, MapError};
use log::info;
use serde::{Deserialize, Serialize};

/// A reached end state. Once set it never changes for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    Won,
    Lost(String),
}

/// Current state of a run: map, character, position, inventory, outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    character: Option<Character>,
    cells: Vec<Cell>,
    position: usize,
    inventory: HashMap<Item, u32>,
    terminal: Option<Terminal>,
}

impl World {
    pub fn new(cells: Vec<Cell>) -> World {
        info!("new world created with {} cells", cells.len());
        World {
            character: None,
            cells,
            position: 0,
            inventory: HashMap::new(),
            terminal: None,
        }
    }

    /// Build a world from a serialized map definition.
    ///
    /// # Errors
    /// - if the map fails to decode (no cells, unknown symbol)
    pub fn from_map(def: &MapDef) -> Result<World, MapError> {
        Ok(World::new(def.decode()?))
    }

    pub fn bind_character(&mut self, who: Character) {
        self.character = Some(who);
    }

    pub fn character(&self) -> Option<Character> {
        self.character
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Cell at an absolute position. Beyond the end of the strip everything
    /// reads as empty ground.
    pub fn cell_at(&self, position: usize) -> Cell {
        self.cells.get(position).copied().unwrap_or(Cell::Empty)
    }

    pub fn current_cell(&self) -> Cell {
        self.cell_at(self.position)
    }

    pub fn cell_ahead(&self) -> Cell {
        self.cell_at(self.position + 1)
    }

    /// Advance the character by whole cells.
    pub fn step_forward(&mut self, cells: usize) {
        self.position += cells;
    }

    /// Remove whatever occupies a cell.
    pub fn clear_cell(&mut self, position: usize) {
        if let Some(cell) = self.cells.get_mut(position) {
            *cell = Cell::Empty;
        }
    }

    pub fn add_item(&mut self, item: Item) {
        *self.inventory.entry(item).or_insert(0) += 1;
    }

    pub fn item_count(&self, item: Item) -> u32 {
        self.inventory.get(&item).copied().unwrap_or(0)
    }

    pub fn possess_item(&self, item: Item) -> bool {
        self.item_count(item) > 0
    }

    /// Inventory check for an entity. Environments can never be carried.
    pub fn possess(&self, entity: Entity) -> bool {
        match entity {
            Entity::Item(item) => self.possess_item(item),
            Entity::Env(_) => false,
        }
    }

    pub fn terminal(&self) -> Option<&Terminal> {
        self.terminal.as_ref()
    }

    pub fn has_won(&self) -> bool {
        matches!(self.terminal, Some(Terminal::Won))
    }

    pub fn has_lost(&self) -> bool {
        matches!(self.terminal, Some(Terminal::Lost(_)))
    }

    /// Set the win flag. The first terminal state recorded wins; later
    /// attempts are ignored.
    pub fn set_won(&mut self) {
        if self.terminal.is_none() {
            info!("run won at cell {}", self.position);
            self.terminal = Some(Terminal::Won);
        }
    }

    /// Set the loss flag with a player-facing reason. First terminal wins.
    pub fn set_lost(&mut self, reason: impl Into<String>) {
        if self.terminal.is_none() {
            let reason = reason.into();
            info!("run lost at cell {}: {reason}", self.position);
            self.terminal = Some(Terminal::Lost(reason));
        }
    }

    /// Value copy of the world for observers (renderers, tests).
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            character: self.character,
            cells: self.cells.clone(),
            position: self.position,
            inventory: self.inventory.clone(),
            terminal: self.terminal.clone(),
        }
    }
}

/// Point-in-time copy of a [`World`]. Detached from the live state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub character: Option<Character>,
    pub cells: Vec<Cell>,
    pub position: usize,
    pub inventory: HashMap<Item, u32>,
    pub terminal: Option<Terminal>,
}
