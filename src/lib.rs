//! Round Store - data access for competitive game rounds
//!
//! This crate provides the persistence layer for round lobbies:
//! - Listing active rounds with their occupancy and capacity
//! - Listing the players and user ids that joined a round
//! - Idempotent round joining with per-membership secrets
//! - Round existence checks

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod services;
pub mod telemetry;
pub mod utils;
