//! Interactive console front end for the shopping list.
//!
//! The binary wires configuration, logging and the chosen backends into an
//! [`App`](app::App), which drives two menus over a [`Console`](console::Console).
//! Everything that talks to the user goes through the console trait so the
//! whole flow can be scripted in tests.

pub mod app;
pub mod console;
pub mod menu;
