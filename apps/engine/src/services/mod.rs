//! Service layer: multi-game coordination over the pure domain engine.

pub mod games;

pub use games::{GameService, GameSession};
