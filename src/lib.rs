//! Pump Arena engine library crate — re-exports all modules for
//! integration testing.
//!
//! The binary crate (`main.rs`) is a headless demo driver. This library
//! crate exposes the same modules so that `tests/` integration tests
//! can import engine types, systems, and resources directly.

pub mod shared;
pub mod economy;
pub mod inventory;
pub mod crafting;
pub mod events;
pub mod minigames;
pub mod data;
pub mod save;
