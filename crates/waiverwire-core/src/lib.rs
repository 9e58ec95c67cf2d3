// Shared configuration, domain model and utilities for the waiver wire
// assistant.

pub mod cache;
pub mod config;
pub mod pacer;
pub mod player;
pub mod roster;
pub mod sentiment;
