//! VentureLens - Startup Idea Validation Engine
//!
//! This crate validates startup ideas by fanning each submission out to a
//! fixed panel of LLM-prompted evaluation roles, aggregating the structured
//! results into stored reports, and personalizing evaluations with the
//! founder's psychometric profile when one exists.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
