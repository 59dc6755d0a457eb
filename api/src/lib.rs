// Module layout (Clean Architecture style)
// - bootstrap: configuration and service wiring
// - infrastructure: Postgres repositories, policy adapters, JWT signing
// - presentation: health endpoint and OpenAPI document
// - application: ports, use cases and the locale service
// - domain: core models and business policies

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;
