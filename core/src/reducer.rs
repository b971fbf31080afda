//! The core trait for business logic.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//! They contain all state transitions and are deterministic and testable.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The collection of effects returned by a reducer.
///
/// Most actions produce zero or one effect, so effects are kept inline
/// up to four entries before spilling to the heap.
pub type Effects<A> = SmallVec<[Effect<A>; 4]>;

/// The Reducer trait - core abstraction for business logic.
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: The action type this reducer processes
/// - `Environment`: The injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for OrdersReducer {
///     type State = OrdersState;
///     type Action = OrdersAction;
///     type Environment = AppEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut OrdersState,
///         action: OrdersAction,
///         env: &AppEnvironment,
///     ) -> Effects<OrdersAction> {
///         match action {
///             OrdersAction::FetchMine => {
///                 // Business logic here
///                 SmallVec::new()
///             }
///             _ => SmallVec::new(),
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects.
    ///
    /// This is a pure function that:
    /// 1. Validates the action
    /// 2. Updates state in place
    /// 3. Returns effect descriptions to be executed
    ///
    /// # Arguments
    ///
    /// - `state`: Mutable reference to current state
    /// - `action`: The action to process
    /// - `env`: Reference to injected dependencies
    ///
    /// # Returns
    ///
    /// Effects to be executed by the runtime. Actions produced by those
    /// effects are fed back into the reducer.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action>;
}
