//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One physics step per frame, no sub-stepping
//! - Seeded RNG only
//! - Row-major brick scan, first hit wins
//! - Drawing goes through the `Display` trait only

pub mod ball;
pub mod bricks;
pub mod collision;
pub mod levels;
pub mod paddle;
pub mod pause;
pub mod physics;
pub mod state;
pub mod tick;

pub use ball::{Ball, WallContact};
pub use bricks::{BrickGrid, BrickHit};
pub use collision::{Aabb, Face, HitKind, TIE_EPSILON, rebound, swept_hit};
pub use levels::{LEVELS, LevelDescriptor};
pub use paddle::Paddle;
pub use pause::{PauseAction, PauseMenu, PauseOption, PauseOutcome};
pub use physics::{BrickContact, StepOutcome, step};
pub use state::{Descend, GameEvent, GamePhase, GameState, LossCause, SimError};
pub use tick::{TickInput, tick};
