//! Website-build task lifecycle.
//!
//! Tasks are opened by an admin, implemented by a developer, and verified by
//! quality control. Every status change goes through the transition table
//! in [`domain::TransitionRule`]; the acting identity is passed explicitly
//! to each operation. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Dashboard read surfaces in [`views`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod views;
