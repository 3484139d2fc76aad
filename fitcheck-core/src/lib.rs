//! Fitcheck Core
//!
//! Core types shared by the Fitcheck services.
//!
//! This crate contains:
//! - Domain types: try-on jobs, shopping items, outfit analyses
//! - DTOs: request/response bodies of the Fitcheck HTTP API

pub mod domain;
pub mod dto;
