//! Toroidal 2D lattice with multiple agents per cell.
//!
//! The grid stores agent ids only; the agent table in the World owns
//! the records. Removing an id that is not present is a contract
//! violation and surfaces as a fatal error, never a silent no-op.

use crate::{
    error::{SimError, SimResult},
    rng::SimRng,
    types::{AgentId, Position},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorusGrid {
    width: u32,
    height: u32,
    cells: Vec<Vec<AgentId>>,
}

impl TorusGrid {
    /// `width` and `height` must be non-zero (enforced by config
    /// validation before a grid is ever built).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Torus wrap: `x' = x mod width`, `y' = y mod height`.
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        Position {
            x: x.rem_euclid(self.width as i64) as u32,
            y: y.rem_euclid(self.height as i64) as u32,
        }
    }

    fn cell_index(&self, pos: Position) -> usize {
        debug_assert!(pos.x < self.width && pos.y < self.height);
        (pos.y as usize) * (self.width as usize) + pos.x as usize
    }

    /// Insert `id` at `pos`. Cells hold any number of agents.
    pub fn place(&mut self, id: AgentId, pos: Position) {
        let idx = self.cell_index(pos);
        self.cells[idx].push(id);
    }

    /// Delete `id` from the cell it is recorded at.
    pub fn remove(&mut self, id: AgentId, pos: Position) -> SimResult<()> {
        let idx = self.cell_index(pos);
        let cell = &mut self.cells[idx];
        match cell.iter().position(|&other| other == id) {
            Some(i) => {
                cell.swap_remove(i);
                Ok(())
            }
            None => Err(SimError::GridDesync { id, x: pos.x, y: pos.y }),
        }
    }

    /// Relocate `id` from `from` to `to`.
    pub fn relocate(&mut self, id: AgentId, from: Position, to: Position) -> SimResult<()> {
        self.remove(id, from)?;
        self.place(id, to);
        Ok(())
    }

    /// Uniformly random in-bounds coordinate.
    pub fn random_position(&self, rng: &mut SimRng) -> Position {
        Position {
            x: rng.next_u64_below(self.width as u64) as u32,
            y: rng.next_u64_below(self.height as u64) as u32,
        }
    }

    /// Agents currently occupying `pos`.
    pub fn contents(&self, pos: Position) -> &[AgentId] {
        &self.cells[self.cell_index(pos)]
    }

    /// Total number of placed agents, summed over all cells.
    pub fn occupancy(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }
}
