// src/lib.rs

//! `flapboard` lays out content for a 6x22 split-flap message board.
//!
//! Typed records go through a layout into a [`grid::Grid`] of glyphs, which a
//! [`transport::Transport`] encodes and sends to the board in one request.

pub mod config;
pub mod glyph;
pub mod grid;
pub mod layout;
pub mod records;
pub mod render;
pub mod transport;
pub mod wrap;
