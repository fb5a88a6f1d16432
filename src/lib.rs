//! Account registration service.
//!
//! `presentation` owns the axum routes and maps `RegisterError` to responses;
//! `application` holds the `Register` use case and the ports it calls;
//! `infrastructure` implements those ports (sqlx, argon2, reqwest);
//! `bootstrap` reads the environment and wires everything together.

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
