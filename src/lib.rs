//! pokelist - searchable Pokémon card grid with a two-slot compare mode
//!
//! The binary wires these modules into a tui-dispatch store; the library
//! exposes them for tests.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod filter;
pub mod layout;
pub mod logging;
pub mod reducer;
pub mod scroll;
pub mod selection;
pub mod sprite;
pub mod sprite_backend;
pub mod state;
pub mod terminal;
