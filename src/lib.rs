//! Town Core - settlement simulation for a turn-based strategy game
//!
//! Models a player-owned town as a stateful economic entity: construction
//! gated by resources and a building dependency graph, day/week progression,
//! creature growth, and randomized mage guild spell allocation.

pub mod catalog;
pub mod city;
pub mod core;
