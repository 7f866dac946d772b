//! Terminal renderer for blockfall.
//!
//! Game state is painted into a plain framebuffer of styled glyphs, then flushed
//! to the terminal with crossterm. No widget toolkit is involved.
//!
//! - [`GameView`] turns a snapshot into glyphs (pure, testable)
//! - [`TerminalRenderer`] diffs framebuffers and writes escape sequences

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
