/// Network adapters for npm registry access
mod npm_client;

pub use npm_client::NpmRegistryRepository;
