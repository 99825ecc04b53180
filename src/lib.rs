//! Buildtrack: lifecycle tracking for website-build job requests.
//!
//! A task moves from admin intake, through developer implementation, to
//! quality-control review, with every step checked against a fixed
//! transition table and stamped with the time it happened.
//!
//! # Architecture
//!
//! Buildtrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task intake, status transitions, and dashboard views

pub mod task;
