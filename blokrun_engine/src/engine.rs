//! The engine: the capability set the interpreter drives.
//!
//! Effectful calls (`advance`, `jump`) suspend by playing their animation
//! frame by frame through the configured [`FrameSink`], checking the cancel
//! token before and after every frame. State checks and pure queries are
//! synchronous. All world mutation happens here, through narrow methods; the
//! interpreter only reads flags and condition results.

use blokrun_data::{Cell, Character, Entity, Environment, Item};
use log::{debug, info};

use crate::cancel::CancelToken;
use crate::frames::{Frame, FrameSink};
use crate::world::World;

/// Animation steps per cell of travel.
pub const FRAMES_PER_CELL: u32 = 30;

/// Cells covered by a jump.
pub const JUMP_CELLS: usize = 2;

/// Player-facing end-of-run messages, as printed on the original cards.
pub const MSG_WON: &str = "Bravo, tu as réussi !";
pub const MSG_LOST_DEFAULT: &str = "Perdu, tu n'as pas atteint la ligne d'arrivée";
pub const MSG_LOST_PUDDLE: &str = "Perdu, fait attention aux flaques d'eau";
pub const MSG_LOST_BUSH: &str = "Perdu, utilise la machette quand tu es devant le buisson pour le couper";
pub const MSG_LOST_JUMP_BUSH: &str = "Tu ne peux pas sauter par dessus un buisson ! Utilise la machette pour le tuer";
pub const MSG_LOST_GRAB: &str = "Perdu, fait attention de ramasser au bon moment !";

/// The simulation engine: world state plus a frame sink and cancel token.
#[derive(Debug)]
pub struct Engine<S: FrameSink> {
    world: World,
    frames: S,
    cancel: CancelToken,
}

impl<S: FrameSink> Engine<S> {
    pub fn new(world: World, frames: S, cancel: CancelToken) -> Engine<S> {
        Engine { world, frames, cancel }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn has_won(&self) -> bool {
        self.world.has_won()
    }

    pub fn has_lost(&self) -> bool {
        self.world.has_lost()
    }

    /// A terminal state or cancellation: nothing further may execute.
    pub fn halted(&self) -> bool {
        self.world.terminal().is_some() || self.is_cancelled()
    }

    /// Bind the active character identity for this run.
    pub fn bind_character(&mut self, who: Character) {
        info!("character bound: {}", who.keyword());
        self.world.bind_character(who);
    }

    /// Advance one cell, animating the travel. Suspends (frame by frame)
    /// until the cell is covered; resolves without moving if cancelled.
    pub fn advance(&mut self) {
        debug!("advance from cell {}", self.world.position());
        self.animate(1, false);
    }

    /// Jump over `num_cells` cells, animating the arc. Same suspension and
    /// cancellation contract as [`Engine::advance`].
    pub fn jump(&mut self, num_cells: usize) {
        debug!("jump {num_cells} cells from cell {}", self.world.position());
        self.animate(num_cells, true);
    }

    fn animate(&mut self, cells: usize, airborne: bool) {
        #[allow(clippy::cast_possible_truncation)]
        let total = FRAMES_PER_CELL * cells as u32;
        for step in 0..total {
            // liveness check on both sides of every suspension point
            if self.cancel.is_cancelled() {
                return;
            }
            #[allow(clippy::cast_precision_loss)]
            let progress = (step + 1) as f32 / total as f32;
            self.frames.frame(&Frame {
                cell: self.world.position(),
                progress,
                airborne,
            });
            if self.cancel.is_cancelled() {
                return;
            }
        }
        self.world.step_forward(cells);
    }

    /// Inspect the cell ahead before committing to a jump.
    pub fn pre_check_state(&mut self) {
        match self.world.cell_ahead() {
            Cell::Finish => self.world.set_won(),
            cell if cell.blocks_jump() => self.world.set_lost(MSG_LOST_JUMP_BUSH),
            _ => {},
        }
    }

    /// Inspect the cell under the character for a win or a hazard.
    pub fn check_state(&mut self) {
        match self.world.current_cell() {
            Cell::Finish => self.world.set_won(),
            Cell::Env(Environment::Puddle) => self.world.set_lost(MSG_LOST_PUDDLE),
            Cell::Env(Environment::Bush) => self.world.set_lost(MSG_LOST_BUSH),
            _ => {},
        }
    }

    /// Attempt a pickup at the current cell. On success the item moves to
    /// the inventory and the cell empties; on failure the run is lost.
    pub fn grab(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        match self.world.current_cell() {
            Cell::Item(item) => {
                info!("grabbed '{}' at cell {}", item.keyword(), self.world.position());
                self.world.add_item(item);
                let position = self.world.position();
                self.world.clear_cell(position);
                true
            },
            _ => {
                debug!("grab failed at cell {}", self.world.position());
                self.world.set_lost(MSG_LOST_GRAB);
                false
            },
        }
    }

    /// Use a carried item on the spot. The only effective pairing is the
    /// machete against a bush in the cell ahead; anything else is a no-op.
    pub fn use_item(&mut self, item: Item) {
        if self.cancel.is_cancelled() {
            return;
        }
        if item == Item::Machete
            && self.world.possess_item(Item::Machete)
            && self.world.cell_ahead() == Cell::Env(Environment::Bush)
        {
            let ahead = self.world.position() + 1;
            info!("machete clears the bush at cell {ahead}");
            self.world.clear_cell(ahead);
        } else {
            debug!("using '{}' has no effect here", item.keyword());
        }
    }

    /// Say something. No engine effect.
    pub fn speak(&self) {
        if let Some(who) = self.world.character() {
            debug!("{} speaks", who.keyword());
        }
    }

    pub fn is_in_front(&self, entity: Entity) -> bool {
        self.world.cell_ahead().entity() == Some(entity)
    }

    pub fn is_on(&self, entity: Entity) -> bool {
        self.world.current_cell().entity() == Some(entity)
    }

    pub fn possess(&self, entity: Entity) -> bool {
        self.world.possess(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::NullFrames;
    use blokrun_data::Cell;

    fn engine_on(symbols: &[&str]) -> Engine<NullFrames> {
        let cells = symbols
            .iter()
            .map(|s| Cell::from_symbol(s).expect("valid symbol"))
            .collect();
        Engine::new(World::new(cells), NullFrames, CancelToken::new())
    }

    #[test]
    fn advance_covers_one_cell() {
        let mut engine = engine_on(&["e", "e", "W"]);
        engine.advance();
        assert_eq!(engine.world().position(), 1);
        engine.advance();
        assert_eq!(engine.world().position(), 2);
    }

    #[test]
    fn jump_covers_two_cells() {
        let mut engine = engine_on(&["e", "flaque", "e"]);
        engine.jump(JUMP_CELLS);
        assert_eq!(engine.world().position(), 2);
    }

    #[test]
    fn check_state_wins_on_finish() {
        let mut engine = engine_on(&["W"]);
        engine.check_state();
        assert!(engine.has_won());
    }

    #[test]
    fn check_state_loses_in_a_puddle() {
        let mut engine = engine_on(&["e", "flaque"]);
        engine.advance();
        engine.check_state();
        assert!(engine.has_lost());
    }

    #[test]
    fn pre_check_blocks_jumping_over_a_bush() {
        let mut engine = engine_on(&["e", "buisson", "e"]);
        engine.pre_check_state();
        assert!(engine.has_lost());
    }

    #[test]
    fn pre_check_wins_on_finish_ahead() {
        let mut engine = engine_on(&["e", "W"]);
        engine.pre_check_state();
        assert!(engine.has_won());
    }

    #[test]
    fn grab_succeeds_on_an_item_cell() {
        let mut engine = engine_on(&["cle", "W"]);
        assert!(engine.grab());
        assert!(engine.world().possess_item(Item::Key));
        assert_eq!(engine.world().current_cell(), Cell::Empty);
        assert!(!engine.halted());
    }

    #[test]
    fn grab_on_empty_or_scenery_loses() {
        let mut engine = engine_on(&["e"]);
        assert!(!engine.grab());
        assert!(engine.has_lost());

        let mut engine = engine_on(&["porte"]);
        assert!(!engine.grab());
        assert!(engine.has_lost());
    }

    #[test]
    fn machete_clears_a_bush_ahead_only_when_possessed() {
        let mut engine = engine_on(&["machette", "buisson", "W"]);
        engine.use_item(Item::Machete);
        // not carried yet, bush still there
        assert_eq!(engine.world().cell_ahead(), Cell::Env(Environment::Bush));

        assert!(engine.grab());
        engine.use_item(Item::Machete);
        assert_eq!(engine.world().cell_ahead(), Cell::Empty);
    }

    #[test]
    fn other_items_have_no_use_effect() {
        let mut engine = engine_on(&["cle", "buisson"]);
        assert!(engine.grab());
        engine.use_item(Item::Key);
        assert_eq!(engine.world().cell_ahead(), Cell::Env(Environment::Bush));
        assert!(!engine.halted());
    }

    #[test]
    fn queries_inspect_current_and_next_cell() {
        let mut engine = engine_on(&["cle", "buisson"]);
        assert!(engine.is_on(Entity::Item(Item::Key)));
        assert!(engine.is_in_front(Entity::Env(Environment::Bush)));
        assert!(!engine.is_in_front(Entity::Env(Environment::Door)));
        assert!(!engine.possess(Entity::Item(Item::Key)));
        engine.grab();
        assert!(engine.possess(Entity::Item(Item::Key)));
    }

    #[test]
    fn cancelled_motion_resolves_without_moving() {
        let cancel = CancelToken::new();
        let mut engine = Engine::new(
            World::new(vec![Cell::Empty, Cell::Empty]),
            NullFrames,
            cancel.clone(),
        );
        cancel.cancel();
        engine.advance();
        engine.jump(JUMP_CELLS);
        assert_eq!(engine.world().position(), 0);
        assert!(engine.halted());
    }

    #[test]
    fn cancelled_grab_mutates_nothing() {
        let cancel = CancelToken::new();
        let mut engine = Engine::new(
            World::new(vec![Cell::Item(Item::Key)]),
            NullFrames,
            cancel.clone(),
        );
        cancel.cancel();
        assert!(!engine.grab());
        assert!(!engine.world().possess_item(Item::Key));
        assert!(engine.world().terminal().is_none());
    }
}
