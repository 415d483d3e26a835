//! QuantSnap core — daily market data acquisition and strategy primitives.
//!
//! This crate provides:
//! - Domain types (daily OHLCV bars, trade signals)
//! - Data providers (Yahoo Finance) behind a mockable trait
//! - Snapshot export: fetch → normalize → atomic CSV write
//! - Snapshot import: read an exported CSV back into bars
//! - An in-memory bar repository keyed by ticker
//! - Trading strategies (moving average crossover)

pub mod data;
pub mod domain;
pub mod repository;
pub mod strategy;

pub use domain::{DailyBar, TradeSignal};
