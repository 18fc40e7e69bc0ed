//! The core trait for feature logic.
//!
//! Reducers are pure functions: `(State, Action, Environment) → Effects`.
//! They contain all decision making and are deterministic and testable; the
//! runtime owns locking, effect execution, and the action feedback loop.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The Reducer trait - core abstraction for feature logic
///
/// # Associated Types
///
/// - `State`: the state this reducer operates on
/// - `Action`: the action type this reducer processes
/// - `Environment`: the injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for BookingFlowReducer {
///     type State = BookingFlowState;
///     type Action = BookingFlowAction;
///     type Environment = BookingFlowEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut BookingFlowState,
///         action: BookingFlowAction,
///         env: &BookingFlowEnvironment,
///     ) -> SmallVec<[Effect<BookingFlowAction>; 4]> {
///         match action {
///             BookingFlowAction::Advance => {
///                 // validation and step transition here
///                 smallvec![Effect::None]
///             }
///             _ => smallvec![Effect::None],
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

    /// Reduce an action into state changes and effects
    ///
    /// This is a pure function that:
    /// 1. Validates the action against current state
    /// 2. Updates state in place
    /// 3. Returns effect descriptions for the runtime to execute
    ///
    /// Most actions produce zero or one effect, so the return type keeps up
    /// to four inline before spilling to the heap.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]>;
}
