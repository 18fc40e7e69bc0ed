//! # Wayfare Core
//!
//! Core traits and types for Wayfare's composable state machines.
//!
//! Every interactive flow in the product (the booking wizard, the explore
//! filters, the like/comment widgets, the server-side booking pipeline) is
//! written as a reducer: a pure function from `(State, Action, Environment)`
//! to state mutations plus a list of effect descriptions. The runtime crate
//! executes those descriptions and feeds resulting actions back in.
//!
//! ## Core Concepts
//!
//! - **State**: owned, `Clone`-able view or domain state for one feature
//! - **Action**: every possible input to a feature (user intents and the
//!   feedback produced by completed effects)
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: a *description* of a side effect, never its execution
//! - **Environment**: injected dependencies behind traits (clock, platform
//!   client, mailer, payment gateway)
//!
//! ## Example
//!
//! ```
//! use wayfare_core::{Effect, Reducer, SmallVec, smallvec};
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
//!     ) -> SmallVec<[Effect<Self::Action>; 4]> {
//!         match action {
//!             CounterAction::Increment => {
//!                 state.count += 1;
//!                 smallvec![Effect::None]
//!             },
//!         }
//!     }
//! }
//! ```

pub mod composition;
pub mod effect;
mod effect_macros;
pub mod environment;
pub mod reducer;

pub use effect::Effect;
pub use reducer::Reducer;

// Re-export the inline-vector types reducers return, so downstream crates
// don't need a direct smallvec dependency to implement the trait.
pub use smallvec::{SmallVec, smallvec};

// Re-export commonly used time types
pub use chrono::{DateTime, Utc};
