//! External service adapters
//!
//! This module contains the adapters the pipeline uses to talk to the
//! outside world: object storage, the relational store, the weather
//! and country APIs, secret resolution, the city registry and the
//! fan-out dispatcher. Each adapter is reached through a trait so the
//! pipeline stages can be tested against in-memory fakes.

pub mod country;
pub mod invoke;
pub mod registry;
pub mod relational;
pub mod secrets;
pub mod storage;
pub mod weather;
