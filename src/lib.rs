//! # ccwatt
//!
//! Estimates the electrical energy and CO2 footprint of AI coding-assistant
//! usage from the logs these tools leave on disk.
//!
//! ## Overview
//!
//! The pipeline is scan → aggregate → estimate:
//! - Claude Code JSONL transcripts and OpenCode message files are scanned
//!   into per-session token counts
//! - Session counts are summed into one [`models::TokenUsage`]
//! - The total is turned into Wh, grams of CO2 and tree-days using a static
//!   per-model-category energy table
//!
//! Everything is offline and read-only.
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Cross-session token aggregation
pub mod aggregate;

/// Model and provider classification tables
pub mod classify;

/// Command-line argument parsing and configuration
pub mod cli;

/// Display formatting for text, quiet and JSON output
pub mod display;

/// Energy, CO2 and tree-day estimation
pub mod energy;

/// Scanner error types
pub mod error;

/// Data models for token usage, sessions and raw log records
pub mod models;

/// Log directory scanners
pub mod scan;

/// Utility functions for paths, formatting and env parsing
pub mod utils;
