//! Reducer composition utilities
//!
//! This module provides the two ways of building a root reducer out of
//! independent slice reducers:
//! - **`combine_reducers`**: Dynamic form, slices keyed by string over a JSON [`SliceMap`]
//! - **`combine_reducers!`**: Typed form, generates a state struct and a root reducer
//!
//! Both call every registered slice reducer exactly once per action, in
//! registration order, handing each one only its own slice.
//!
//! # Examples
//!
//! ## Combining Reducers
//!
//! ```
//! use figures_state_core::composition::BoxedSlice;
//! use figures_state_core::{combine_reducers, reducer_fn, Action, Reducer};
//! use serde_json::{json, Value};
//!
//! let visits = reducer_fn(|state: Option<&Value>, action: &Action| {
//!     let count = state.and_then(Value::as_u64).unwrap_or(0);
//!     if action.is("VISIT") { json!(count + 1) } else { json!(count) }
//! });
//! let theme = reducer_fn(|state: Option<&Value>, _action: &Action| {
//!     state.cloned().unwrap_or_else(|| json!("light"))
//! });
//!
//! let root = combine_reducers([
//!     ("visits", Box::new(visits) as BoxedSlice<Action>),
//!     ("theme", Box::new(theme) as BoxedSlice<Action>),
//! ])?;
//!
//! let state = root.reduce(None, &Action::init());
//! let state = root.reduce(Some(&state), &Action::new("VISIT"));
//! assert_eq!(Value::Object(state), json!({"visits": 1, "theme": "light"}));
//! # Ok::<(), figures_state_core::CompositionError>(())
//! ```

use crate::error::CompositionError;
use crate::reducer::Reducer;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};

/// Whole state in dynamic form: slice key to slice value
pub type SliceMap = Map<String, Value>;

/// A type-erased slice reducer over JSON values
pub type BoxedSlice<A> = Box<dyn Reducer<State = Value, Action = A> + Send + Sync>;

/// Combines slice reducers keyed by name into one reducer over a [`SliceMap`].
///
/// The returned reducer builds a new map on every call. Keys present in the
/// incoming state that have no registered reducer are dropped from the
/// output.
///
/// # Errors
///
/// - [`CompositionError::DuplicateSlice`] if a key is registered twice
/// - [`CompositionError::EmptySliceKey`] if a key is empty
pub fn combine_reducers<A, K, I>(slices: I) -> Result<CombinedReducer<A>, CompositionError>
where
    I: IntoIterator<Item = (K, BoxedSlice<A>)>,
    K: Into<String>,
{
    let mut registered: Vec<(String, BoxedSlice<A>)> = Vec::new();

    for (key, reducer) in slices {
        let key = key.into();
        if key.is_empty() {
            return Err(CompositionError::EmptySliceKey);
        }
        if registered.iter().any(|(existing, _)| *existing == key) {
            return Err(CompositionError::DuplicateSlice(key));
        }
        registered.push((key, reducer));
    }

    Ok(CombinedReducer {
        slices: registered,
        unexpected_keys: Mutex::new(BTreeSet::new()),
    })
}

/// A root reducer that fans each action out to named slice reducers.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<A> {
    slices: Vec<(String, BoxedSlice<A>)>,
    unexpected_keys: Mutex<BTreeSet<String>>,
}

impl<A> CombinedReducer<A> {
    /// Registered slice keys, in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slices.iter().map(|(key, _)| key.as_str())
    }

    /// Number of registered slices
    #[must_use]
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether no slices are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    fn warn_unexpected_keys(&self, state: &SliceMap) {
        let mut reported = self
            .unexpected_keys
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        for key in state.keys() {
            if self.slices.iter().any(|(registered, _)| registered == key) {
                continue;
            }
            if reported.insert(key.clone()) {
                tracing::warn!(
                    slice = %key,
                    "Unexpected key in state has no reducer and will be dropped"
                );
            }
        }
    }
}

impl<A> std::fmt::Debug for CombinedReducer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("slices", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<A> Reducer for CombinedReducer<A> {
    type State = SliceMap;
    type Action = A;

    fn reduce(&self, state: Option<&Self::State>, action: &Self::Action) -> Self::State {
        if let Some(state) = state {
            self.warn_unexpected_keys(state);
        }

        let mut next = Map::new();
        for (key, reducer) in &self.slices {
            let previous = state.and_then(|s| s.get(key));
            next.insert(key.clone(), reducer.reduce(previous, action));
        }
        next
    }
}

/// Adapts a closure into a [`Reducer`].
///
/// Created by [`reducer_fn`].
pub struct FnReducer<F, S, A> {
    f: F,
    _phantom: PhantomData<fn(&S, &A) -> S>,
}

/// Wraps a slice update closure `(Option<&S>, &A) -> S` as a [`Reducer`].
pub const fn reducer_fn<S, A, F>(f: F) -> FnReducer<F, S, A>
where
    F: Fn(Option<&S>, &A) -> S,
{
    FnReducer {
        f,
        _phantom: PhantomData,
    }
}

impl<F, S, A> Reducer for FnReducer<F, S, A>
where
    F: Fn(Option<&S>, &A) -> S,
{
    type State = S;
    type Action = A;

    fn reduce(&self, state: Option<&S>, action: &A) -> S {
        (self.f)(state, action)
    }
}

impl<F, S, A> std::fmt::Debug for FnReducer<F, S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnReducer")
    }
}

/// Generates a typed whole-state struct and the root reducer that fills it.
///
/// Each field names a slice and the reducer type that owns it. The state
/// struct gets one field per slice holding that reducer's `State`; attributes
/// written on a field are applied to the state field (use them for serde
/// renames). The root reducer calls each slice reducer once, in declaration
/// order, with only its own slice.
///
/// # Examples
///
/// ```
/// use figures_state_core::{combine_reducers, reducer_fn, Action, FnReducer, Reducer};
///
/// type Count = FnReducer<fn(Option<&u32>, &Action) -> u32, u32, Action>;
///
/// fn count_visits(state: Option<&u32>, action: &Action) -> u32 {
///     let n = state.copied().unwrap_or(0);
///     if action.is("VISIT") { n + 1 } else { n }
/// }
///
/// combine_reducers! {
///     #[derive(Debug, PartialEq)]
///     pub struct PageState;
///
///     pub struct PageReducer<Action = Action> {
///         home: Count,
///         about: Count,
///     }
/// }
///
/// let root = PageReducer {
///     home: reducer_fn(count_visits as fn(Option<&u32>, &Action) -> u32),
///     about: reducer_fn(count_visits as fn(Option<&u32>, &Action) -> u32),
/// };
/// let state = root.reduce(None, &Action::new("VISIT"));
/// assert_eq!(state, PageState { home: 1, about: 1 });
/// ```
#[macro_export]
macro_rules! combine_reducers {
    (
        $(#[$state_meta:meta])*
        $state_vis:vis struct $state:ident;

        $(#[$reducer_meta:meta])*
        $reducer_vis:vis struct $reducer:ident<Action = $action:ty> {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $slice:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$state_meta])*
        #[allow(missing_docs)]
        $state_vis struct $state {
            $(
                $(#[$field_meta])*
                pub $field: <$slice as $crate::Reducer>::State,
            )+
        }

        $(#[$reducer_meta])*
        #[allow(missing_docs)]
        $reducer_vis struct $reducer {
            $(
                pub $field: $slice,
            )+
        }

        impl $crate::Reducer for $reducer {
            type State = $state;
            type Action = $action;

            fn reduce(
                &self,
                state: ::core::option::Option<&Self::State>,
                action: &Self::Action,
            ) -> Self::State {
                $state {
                    $(
                        $field: $crate::Reducer::reduce(
                            &self.$field,
                            state.map(|s| &s.$field),
                            action,
                        ),
                    )+
                }
            }
        }
    };
}
