//! Session Management: drill state machine, scoring, and timers
//!
//! # Components
//! - `controller.rs`: Controller driving challenges, countdown and answers
//! - `challenge.rs`: Challenge struct and random target selection
//! - `state.rs`: Session struct, game phases and snapshots
//! - `score.rs`: Correct/total counts with per-string breakdown
//! - `difficulty.rs`: Time limit and fret ceiling per level
//! - `timers.rs`: Cancelable timer arena
//! - `errors.rs`: Rejected actions

pub mod challenge;
pub mod controller;
pub mod difficulty;
pub mod errors;
pub mod score;
pub mod state;
pub mod timers;

pub use challenge::Challenge;
pub use controller::Controller;
pub use difficulty::Difficulty;
pub use errors::InvalidOperation;
pub use score::Score;
pub use state::{GameState, Session, SessionSnapshot};
