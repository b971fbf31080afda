//! # Stellar Core
//!
//! Core traits and types for the Stellar state architecture.
//!
//! This crate provides the fundamental abstractions for building a
//! client-side state core using the Reducer pattern:
//!
//! - **State**: Domain state for a feature slice
//! - **Action**: All possible inputs to a reducer (user intents and
//!   completion events fed back by effects)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies via traits
//! - **`RemoteData`**: The shared lifecycle of any server-backed resource
//!   (`idle → pending → fulfilled | rejected`)
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use stellar_core::{Effect, Effects, Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Self::State,
//!         action: Self::Action,
//!         _env: &Self::Environment,
//!     ) -> Effects<Self::Action> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 SmallVec::new()
//!             }
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use smallvec::{SmallVec, smallvec};

pub mod effect;
pub mod environment;
pub mod reducer;
pub mod remote;

pub use effect::Effect;
pub use reducer::{Effects, Reducer};
pub use remote::{Phase, RemoteData};
