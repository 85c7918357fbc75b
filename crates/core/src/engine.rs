//! The `Engine` trait implemented by every field mode.
//!
//! An engine owns its current [`Grid`] and advances it one full pass per
//! [`Engine::step`]. The trait is object-safe so the registry and pipelines
//! can drive modes as `dyn Engine`.

use crate::error::EngineError;
use crate::grid::Grid;
use serde_json::Value;

/// A pass-based field generator.
pub trait Engine {
    /// Runs one full-grid pass, replacing the current grid with its output.
    fn step(&mut self) -> Result<(), EngineError>;

    /// The current grid.
    fn grid(&self) -> &Grid;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Number of passes run so far.
    fn passes_done(&self) -> usize;

    /// Number of passes the engine is configured to run.
    fn planned_passes(&self) -> usize;

    fn is_finished(&self) -> bool {
        self.passes_done() >= self.planned_passes()
    }

    /// Steps until [`Engine::is_finished`], calling `on_pass` with the
    /// 1-based pass index and the new grid after each pass.
    fn run_to_end(&mut self, on_pass: &mut dyn FnMut(usize, &Grid)) -> Result<(), EngineError> {
        while !self.is_finished() {
            self.step()?;
            on_pass(self.passes_done(), self.grid());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Minimal engine used to verify trait object safety and provided methods.
    struct CountingEngine {
        grid: Grid,
        done: usize,
        planned: usize,
    }

    impl CountingEngine {
        fn new(planned: usize) -> Self {
            Self {
                grid: Grid::new(4, 4).unwrap(),
                done: 0,
                planned,
            }
        }
    }

    impl Engine for CountingEngine {
        fn step(&mut self) -> Result<(), EngineError> {
            self.done += 1;
            Ok(())
        }

        fn grid(&self) -> &Grid {
            &self.grid
        }

        fn params(&self) -> Value {
            json!({"passes": self.planned})
        }

        fn param_schema(&self) -> Value {
            json!({"passes": {"type": "integer", "default": 0}})
        }

        fn passes_done(&self) -> usize {
            self.done
        }

        fn planned_passes(&self) -> usize {
            self.planned
        }
    }

    #[test]
    fn engine_trait_is_object_safe() {
        let engine: Box<dyn Engine> = Box::new(CountingEngine::new(3));
        assert_eq!(engine.grid().width(), 4);
        assert!(!engine.is_finished());
    }

    #[test]
    fn run_to_end_reports_each_pass() {
        let mut engine = CountingEngine::new(3);
        let mut seen = Vec::new();
        engine.run_to_end(&mut |i, _| seen.push(i)).unwrap();
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(engine.is_finished());
    }

    #[test]
    fn run_to_end_with_zero_planned_passes_does_nothing() {
        let mut engine = CountingEngine::new(0);
        let mut calls = 0;
        engine.run_to_end(&mut |_, _| calls += 1).unwrap();
        assert_eq!(calls, 0);
        assert_eq!(engine.passes_done(), 0);
    }

    #[test]
    fn dyn_engine_mut_reference_works() {
        let mut engine = CountingEngine::new(2);
        let engine_ref: &mut dyn Engine = &mut engine;
        engine_ref.step().unwrap();
        assert_eq!(engine_ref.passes_done(), 1);
        assert_eq!(engine_ref.params()["passes"], 2);
    }
}
