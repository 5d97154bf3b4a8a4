use numpy::IntoPyArray;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;
use rand::rngs::StdRng;

use crate::{GameConfig, GameError, GameState, Outcome, Phase, RandomDice, Variant};

fn to_py_err(e: GameError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyclass]
pub struct Game {
    state: GameState<RandomDice<StdRng>>,
}

#[pyfunction]
pub fn start_game(n_players: usize, n_territories: usize, seed: u64) -> PyResult<Game> {
    let config = GameConfig::new(Variant::Missions, n_players, n_territories);
    let state =
        GameState::with_generated_names(config, RandomDice::seeded(seed)).map_err(to_py_err)?;
    Ok(Game { state })
}

#[pymethods]
impl Game {
    /// Plays one turn. Returns true if the attack conquered its target.
    pub fn step(&mut self, attacker: usize, defender: usize) -> PyResult<bool> {
        let report = self.state.play_turn(attacker, defender).map_err(to_py_err)?;
        Ok(matches!(report.battle, Ok(outcome) if outcome.conquered()))
    }

    pub fn stop(&mut self) {
        self.state.stop();
    }

    #[getter]
    fn board_state<'py>(&self, py: Python<'py>) -> &'py numpy::PyArray1<f32> {
        let colors = self.state.player_colors();
        self.state.board().to_array(&colors).into_pyarray(py)
    }

    #[getter]
    fn turn_idx(&self) -> usize {
        self.state.turn_idx
    }

    #[getter]
    fn phase(&self) -> u8 {
        match self.state.phase {
            Phase::Setup => 0,
            Phase::TerritoryAssignment => 1,
            Phase::Battle => 2,
            Phase::GameOver(_) => 3,
        }
    }

    #[getter]
    fn winner(&self) -> Option<usize> {
        match self.state.outcome() {
            Some(Outcome::Winner(w)) => Some(w),
            _ => None,
        }
    }

    #[getter]
    fn n_players(&self) -> usize {
        self.state.players().len()
    }

    #[getter]
    fn n_territories(&self) -> usize {
        self.state.board().len()
    }
}

#[pymodule]
fn territory_war(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<Game>()?;
    m.add_function(wrap_pyfunction!(start_game, m)?)?;

    Ok(())
}
