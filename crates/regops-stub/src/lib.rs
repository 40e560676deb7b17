//! RegOps API stub server — in-memory backend for development and testing.
//!
//! Implements the uniform per-resource contract that `regops-client`
//! speaks: enveloped JSON responses, bearer-token tenant scoping, the
//! soft-delete lifecycle, and server-derived fields such as the risk
//! register's `risk_score`. One generic route set serves every
//! `(module, resource)` pair, so the stub needs no per-domain code.
//!
//! Storage is in-memory (DashMap) with no persistence — data is lost on
//! restart. Integration tests import [`router`] and serve it on an
//! ephemeral port; the `regops-stub` binary serves it standalone.

pub mod auth;
pub mod routes;
pub mod store;

pub use routes::router;
pub use store::StubState;
