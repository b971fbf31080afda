//! # Stellar Testing
//!
//! Testing utilities and helpers for the Stellar state architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use stellar_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(ConstructorReducer)
//!     .with_env(test_environment())
//!     .given_state(ConstructorState::default())
//!     .when_action(ConstructorAction::Clear)
//!     .then_state(|state| assert!(state.bun.is_none()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use std::sync::atomic::{AtomicU64, Ordering};
    use stellar_core::environment::IdGenerator;

    /// Deterministic id generator for tests.
    ///
    /// Produces `id-1`, `id-2`, ... so instance ids in test sequences are
    /// predictable.
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator starting at `id-1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn generate(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            format!("id-{n}")
        }
    }
}

// Re-export commonly used items
pub use mocks::SequentialIdGenerator;
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::mocks::SequentialIdGenerator;
    use stellar_core::environment::IdGenerator;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIdGenerator::new();
        assert_eq!(ids.generate(), "id-1");
        assert_eq!(ids.generate(), "id-2");
        assert_eq!(ids.generate(), "id-3");
    }
}
