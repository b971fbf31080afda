//! Side effect descriptions.
//!
//! Effects describe side effects to be performed by the runtime.
//! They are values (not execution) and are composable: a reducer returns
//! effect descriptions, and the Store runtime executes them, feeding
//! resulting actions back into the reducer.

use std::future::Future;
use std::pin::Pin;

/// A boxed future that resolves to an optional feedback action.
pub type ActionFuture<A> = Pin<Box<dyn Future<Output = Option<A>> + Send>>;

/// Effect type - describes a side effect to be executed.
///
/// Effects are NOT executed immediately. They are descriptions of what
/// should happen, returned from reducers and executed by the Store runtime.
///
/// # Type Parameters
///
/// - `A`: The action type that effects can produce (feedback loop)
pub enum Effect<A> {
    /// No-op effect
    None,

    /// Arbitrary async computation.
    ///
    /// Returns `Option<A>` - if `Some`, the action is fed back into the
    /// reducer and broadcast to observers.
    Future(ActionFuture<A>),

    /// Run effects concurrently
    Parallel(Vec<Effect<A>>),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<A> std::fmt::Debug for Effect<A>
where
    A: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            Effect::Parallel(effects) => {
                f.debug_tuple("Effect::Parallel").field(effects).finish()
            },
        }
    }
}

impl<A> Effect<A> {
    /// Combine effects to run concurrently
    #[must_use]
    pub const fn merge(effects: Vec<Effect<A>>) -> Effect<A> {
        Effect::Parallel(effects)
    }

    /// True if this effect performs no work
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Transform the action type produced by this effect.
    ///
    /// Used to lift a child reducer's effects into a parent action type.
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        A: Send + 'static,
        B: 'static,
        F: Fn(A) -> B + Clone + Send + Sync + 'static,
    {
        match self {
            Effect::None => Effect::None,
            Effect::Future(fut) => Effect::Future(Box::pin(async move { fut.await.map(f) })),
            Effect::Parallel(effects) => Effect::Parallel(
                effects
                    .into_iter()
                    .map(|effect| effect.map(f.clone()))
                    .collect(),
            ),
        }
    }
}

/// Create an `Effect::Future` from an async block.
///
/// # Example
///
/// ```rust,ignore
/// use stellar_core::async_effect;
///
/// async_effect! {
///     let response = api.get_ingredients().await;
///     Some(IngredientsAction::Loaded(response))
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}
