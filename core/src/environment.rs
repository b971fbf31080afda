//! Dependency injection traits.
//!
//! All external dependencies are abstracted behind traits and injected
//! via the Environment parameter of a reducer. Production implementations
//! live here when they are trivial (random ids); anything involving real
//! I/O lives with the application.

/// Generator of unique instance identifiers.
///
/// Abstracted so tests can use a deterministic sequence while production
/// uses random ids. Every call must return a value never returned before
/// by the same generator.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh unique identifier
    fn generate(&self) -> String;
}

/// Production id generator backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
