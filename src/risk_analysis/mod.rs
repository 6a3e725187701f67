/// Dependency risk analysis core
///
/// Pure domain logic plus the services that drive an analysis run. The
/// core performs no I/O of its own; registry access goes through the
/// `RegistryRepository` port.
pub mod domain;
pub mod policies;
pub mod services;
