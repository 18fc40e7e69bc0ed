//! Reducer composition utilities
//!
//! - **`combine_reducers`**: run multiple reducers on the same state/action
//! - **`scope_reducer`**: focus a reducer on a subset of a larger state
//!
//! The explore page uses scoping to embed the social widgets' state inside
//! the page state; combination splits a feature's logic across focused
//! reducers without changing its public action type.

use crate::effect::Effect;
use crate::reducer::Reducer;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer runs in sequence and all effects are concatenated.
///
/// # Examples
///
/// ```
/// use wayfare_core::composition::combine_reducers;
/// use wayfare_core::{Effect, Reducer, SmallVec, smallvec};
///
/// #[derive(Clone, Default)]
/// struct PageState {
///     visits: u32,
///     banner: Option<String>,
/// }
///
/// #[derive(Clone)]
/// enum PageAction {
///     Visited,
///     ShowBanner(String),
/// }
///
/// struct VisitReducer;
/// struct BannerReducer;
///
/// impl Reducer for VisitReducer {
///     type State = PageState;
///     type Action = PageAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut PageState,
///         action: PageAction,
///         _env: &(),
///     ) -> SmallVec<[Effect<PageAction>; 4]> {
///         if matches!(action, PageAction::Visited) {
///             state.visits += 1;
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// impl Reducer for BannerReducer {
///     type State = PageState;
///     type Action = PageAction;
///     type Environment = ();
///
///     fn reduce(
///         &self,
///         state: &mut PageState,
///         action: PageAction,
///         _env: &(),
///     ) -> SmallVec<[Effect<PageAction>; 4]> {
///         if let PageAction::ShowBanner(text) = action {
///             state.banner = Some(text);
///         }
///         smallvec![Effect::None]
///     }
/// }
///
/// let combined = combine_reducers(vec![Box::new(VisitReducer), Box::new(BannerReducer)]);
/// let mut state = PageState::default();
/// let _ = combined.reduce(&mut state, PageAction::Visited, &());
/// assert_eq!(state.visits, 1);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E>>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E>>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = smallvec::SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// This lets reducers written for a small state (a single card's like state,
/// say) run inside a page-level state without knowing about it.
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        get_state,
        set_state,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
    _phantom: std::marker::PhantomData<(A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: Clone + 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> smallvec::SmallVec<[Effect<Self::Action>; 4]> {
        // Extract, reduce on a copy, write back
        let mut sub_state = (self.get_state)(state).clone();
        let effects = self.reducer.reduce(&mut sub_state, action, env);
        (self.set_state)(state, sub_state);

        effects
    }
}
