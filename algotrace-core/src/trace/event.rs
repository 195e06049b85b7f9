//! Trace event types
//!
//! An [`Event`] is one atomic recorded step of an algorithm run: its position
//! in the trace, the monotonic-clock offset at which it happened, the outer
//! pass that emitted it, and a [`SortAction`] payload describing the step
//! itself. Events are self-describing: together with the initial input they
//! are enough to replay a run without consulting the algorithm that produced
//! them.
//!
//! Construction is pure value assembly. No bounds checks happen here; the
//! producing side (the recorder) is solely responsible for guaranteeing that
//! indices lie within the snapshot and that paired indices are distinct.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Bound for element types an algorithm can operate on.
///
/// Orderability is required at the type level: a buffer of non-orderable
/// elements is rejected at compile time, never discovered at runtime.
///
/// `rank` gives the element's final sorted slot when the buffer is a
/// permutation of `1..=n` (value `v` belongs at slot `v - 1`), and `None`
/// for values with no such slot. It feeds the presortedness metric and is
/// not meaningful for non-permutation inputs.
pub trait Value:
    Copy + Ord + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + 'static
{
    /// Final sorted slot for members of a permutation of `1..=n`.
    fn rank(&self) -> Option<usize>;
}

macro_rules! impl_value {
    ($($t:ty),* $(,)?) => {$(
        impl Value for $t {
            fn rank(&self) -> Option<usize> {
                usize::try_from(*self).ok()?.checked_sub(1)
            }
        }
    )*};
}

impl_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

/// An ordered pair of indices or elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair<V> {
    pub first: V,
    pub second: V,
}

impl<V> Pair<V> {
    /// Create a new pair
    pub fn new(first: V, second: V) -> Self {
        Self { first, second }
    }
}

impl<V: PartialEq> Pair<V> {
    /// Whether the two halves differ
    pub fn is_distinct(&self) -> bool {
        self.first != self.second
    }
}

impl<V: fmt::Display> fmt::Display for Pair<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Discriminator selecting an action's payload shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// A single element called out by the algorithm
    Highlight,
    /// Two elements compared
    Compare,
    /// Two elements exchanged
    Swap,
}

impl ActionKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Highlight => "highlight",
            ActionKind::Compare => "compare",
            ActionKind::Swap => "swap",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "highlight" => Ok(ActionKind::Highlight),
            "compare" => Ok(ActionKind::Compare),
            "swap" => Ok(ActionKind::Swap),
            _ => Err(format!("Unknown action kind: {}", s)),
        }
    }
}

/// The closed set of steps a sorting algorithm can record
///
/// Every variant carries enough of the buffer to be rendered or replayed on
/// its own. Swap snapshots the buffer on both sides of the exchange; the
/// two snapshots differ at exactly the swapped positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SortAction<T> {
    /// An element called out by the algorithm, with the buffer as it stood
    Highlight {
        index: usize,
        element: T,
        array: Vec<T>,
    },

    /// Two distinct positions compared, with their values at comparison time
    Compare {
        indices: Pair<usize>,
        elements: Pair<T>,
        array: Vec<T>,
    },

    /// Two distinct positions exchanged
    ///
    /// `elements` holds the post-swap values at `indices` in index order:
    /// `elements.first == after[indices.first]`.
    Swap {
        indices: Pair<usize>,
        elements: Pair<T>,
        before: Vec<T>,
        after: Vec<T>,
    },
}

impl<T> SortAction<T> {
    /// The discriminator for this action
    pub fn kind(&self) -> ActionKind {
        match self {
            SortAction::Highlight { .. } => ActionKind::Highlight,
            SortAction::Compare { .. } => ActionKind::Compare,
            SortAction::Swap { .. } => ActionKind::Swap,
        }
    }

    /// Length of the buffer snapshot carried by this action
    pub fn buffer_len(&self) -> usize {
        match self {
            SortAction::Highlight { array, .. } | SortAction::Compare { array, .. } => array.len(),
            SortAction::Swap { before, .. } => before.len(),
        }
    }
}

/// One atomic recorded step of an algorithm run
///
/// Immutable once appended to a trace. `id` is contiguous from 1 in append
/// order; `elapsed` is seconds since run start on a monotonic clock;
/// `iteration` is the 1-based outer pass that emitted the step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<T> {
    /// Position in the trace, contiguous from 1
    pub id: u64,

    /// Seconds since run start, monotonic non-decreasing
    pub elapsed: f64,

    /// Outer pass during which this step was emitted (1-based)
    pub iteration: u32,

    /// The recorded step
    pub action: SortAction<T>,
}

impl<T: Value> Event<T> {
    /// Assemble an event from its parts
    pub fn new(id: u64, elapsed: f64, iteration: u32, action: SortAction<T>) -> Self {
        Self {
            id,
            elapsed,
            iteration,
            action,
        }
    }

    /// Assemble a Highlight event; `index` must lie within `array`
    pub fn highlight(id: u64, elapsed: f64, iteration: u32, array: &[T], index: usize) -> Self {
        Self::new(
            id,
            elapsed,
            iteration,
            SortAction::Highlight {
                index,
                element: array[index],
                array: array.to_vec(),
            },
        )
    }

    /// Assemble a Compare event; `first` and `second` must be distinct and
    /// lie within `array`
    pub fn compare(
        id: u64,
        elapsed: f64,
        iteration: u32,
        array: &[T],
        first: usize,
        second: usize,
    ) -> Self {
        Self::new(
            id,
            elapsed,
            iteration,
            SortAction::Compare {
                indices: Pair::new(first, second),
                elements: Pair::new(array[first], array[second]),
                array: array.to_vec(),
            },
        )
    }

    /// Assemble a Swap event from the buffers on both sides of the exchange
    pub fn swap(
        id: u64,
        elapsed: f64,
        iteration: u32,
        before: Vec<T>,
        after: Vec<T>,
        first: usize,
        second: usize,
    ) -> Self {
        let elements = Pair::new(after[first], after[second]);
        Self::new(
            id,
            elapsed,
            iteration,
            SortAction::Swap {
                indices: Pair::new(first, second),
                elements,
                before,
                after,
            },
        )
    }

    /// The discriminator of this event's action
    pub fn kind(&self) -> ActionKind {
        self.action.kind()
    }

    /// Length of the buffer snapshot this event carries
    pub fn buffer_len(&self) -> usize {
        self.action.buffer_len()
    }

    /// Structural equality ignoring wall-clock timing
    ///
    /// Two runs of the same deterministic algorithm over the same input
    /// record the same steps but not the same clock offsets; step identity
    /// is what replay and diffing compare.
    pub fn same_step(&self, other: &Self) -> bool {
        self.id == other.id && self.iteration == other.iteration && self.action == other.action
    }

    /// Canonical rendering of the step content, elapsed excluded
    ///
    /// Serde serializes fields in declaration order, so this string is
    /// stable for a given step and feeds the trace digest.
    pub fn canonical_step(&self) -> String {
        format!(
            "{}|{}|{}",
            self.id,
            self.iteration,
            serde_json::to_string(&self.action).unwrap_or_default()
        )
    }
}

impl<T: Value> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            SortAction::Highlight {
                index,
                element,
                array,
            } => write!(
                f,
                "#{} pass {} highlight [{}]={} array={:?}",
                self.id, self.iteration, index, element, array
            ),
            SortAction::Compare {
                indices,
                elements,
                array,
            } => write!(
                f,
                "#{} pass {} compare [{}]={} vs [{}]={} array={:?}",
                self.id,
                self.iteration,
                indices.first,
                elements.first,
                indices.second,
                elements.second,
                array
            ),
            SortAction::Swap {
                indices,
                elements,
                before,
                after,
            } => write!(
                f,
                "#{} pass {} swap [{}]<->[{}] elements={} before={:?} after={:?}",
                self.id, self.iteration, indices.first, indices.second, elements, before, after
            ),
        }
    }
}
