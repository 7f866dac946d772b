//! Game loop driver.
//!
//! Owns a [`core::GameSession`] together with its drop clock, feeds it input
//! intents, and paints each frame onto a [`RenderTarget`]. Everything runs on one
//! thread; there are no locks, channels or async tasks.

pub mod config;
pub mod event_log;
pub mod game_loop;
pub mod render_throttle;
pub mod target;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::GameConfig;
pub use event_log::{EventLog, EventRecord};
pub use types::Totals;
pub use game_loop::{FrameReport, GameLoop};
pub use render_throttle::RenderThrottle;
pub use target::{RenderTarget, SurfaceSize};
