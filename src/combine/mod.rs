//! Combiners that reduce the values of several dice into a single value.
//!
//! A combiner is made of four steps: a seed for a fresh accumulator, a step that accumulates one value into it, a step
//! that merges two accumulators, and a step that finishes an accumulator into the output value. Rolling a
//! [`CombinedDie`](crate::CombinedDie) folds member values through the seed and accumulate steps, while enumerating
//! its sides builds accumulators for parts of the pool and merges them. Combiners are expected to give the same
//! output either way, which holds whenever merging is associative and agrees with accumulating values one at a time.
//! This is not checked.

pub mod product;
pub mod registry;

use alloc::{borrow::Cow, sync::Arc, vec::Vec};
use core::{
	fmt,
	ops::{Add, Mul},
};

pub use self::registry::CombinerRegistry;
use crate::die::Value;

/// Reduction of a sequence of values into one output value, with support for enumerating every possible output.
pub trait Combine<T: Clone, V>: Send + Sync {
	/// Reduces the values, in order, to one output value.
	fn reduce(&self, values: &mut dyn Iterator<Item = T>) -> V;

	/// Reduces every combination of one value from each list, in lexicographic order of the lists (the last list
	/// varies fastest). The output holds one value per combination; an empty slice of lists has a single, empty
	/// combination.
	fn enumerate(&self, lists: &[Cow<'_, [T]>]) -> Vec<V>;
}

/// Seed-producing step of a [`Reducer`]
pub type Seed<A> = Arc<dyn Fn() -> A + Send + Sync>;

/// Accumulating step of a [`Reducer`]
pub type Accumulate<A, T> = Arc<dyn Fn(A, T) -> A + Send + Sync>;

/// Merging step of a [`Reducer`]
pub type Merge<A> = Arc<dyn Fn(A, A) -> A + Send + Sync>;

/// Finishing step of a [`Reducer`]
pub type Finish<A, V> = Arc<dyn Fn(A) -> V + Send + Sync>;

/// The four steps of a reduction from values of type `T` to an output of type `V` through an accumulator of type `A`.
#[expect(clippy::exhaustive_structs, reason = "The four steps are the whole definition of a reduction")]
pub struct Reducer<T, A, V> {
	/// Creates a fresh accumulator. Reducing no values at all finishes this directly.
	pub seed: Seed<A>,

	/// Accumulates one value.
	pub accumulate: Accumulate<A, T>,

	/// Merges two accumulators, the first covering values that come before the second's. Must be associative.
	pub merge: Merge<A>,

	/// Turns an accumulator into the output value.
	pub finish: Finish<A, V>,
}

impl<T, A, V> Reducer<T, A, V> {
	/// Creates a reducer from its four steps.
	#[must_use]
	pub fn new(
		seed: impl Fn() -> A + Send + Sync + 'static,
		accumulate: impl Fn(A, T) -> A + Send + Sync + 'static,
		merge: impl Fn(A, A) -> A + Send + Sync + 'static,
		finish: impl Fn(A) -> V + Send + Sync + 'static,
	) -> Self {
		Self {
			seed: Arc::new(seed),
			accumulate: Arc::new(accumulate),
			merge: Arc::new(merge),
			finish: Arc::new(finish),
		}
	}
}

impl<T, A, V> Clone for Reducer<T, A, V> {
	fn clone(&self) -> Self {
		Self {
			seed: Arc::clone(&self.seed),
			accumulate: Arc::clone(&self.accumulate),
			merge: Arc::clone(&self.merge),
			finish: Arc::clone(&self.finish),
		}
	}
}

impl<T, A, V> fmt::Debug for Reducer<T, A, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Reducer").finish_non_exhaustive()
	}
}

impl<T, A, V> Combine<T, V> for Reducer<T, A, V>
where
	T: Value,
	A: Clone + Send + Sync + 'static,
	V: Value,
{
	fn reduce(&self, values: &mut dyn Iterator<Item = T>) -> V {
		let mut acc = (self.seed)();
		for val in values {
			acc = (self.accumulate)(acc, val);
		}
		(self.finish)(acc)
	}

	fn enumerate(&self, lists: &[Cow<'_, [T]>]) -> Vec<V> {
		product::partials(self, lists).into_iter().map(|acc| (self.finish)(acc)).collect()
	}
}

/// Shareable, type-erased combiner reducing values of type `T` to an output of type `V`
///
/// # Examples
/// ```
/// use dicebag::Combiner;
///
/// let sum = Combiner::<i32, i32>::sum();
/// assert_eq!(sum.reduce([3, 4, 5]), 12);
/// assert_eq!(sum.reduce([]), 0);
///
/// let spread = Combiner::from_fn(|vals: Vec<i32>| {
/// 	vals.iter().max().zip(vals.iter().min()).map_or(0, |(max, min)| max - min)
/// });
/// assert_eq!(spread.reduce([3, 9, 4]), 6);
/// ```
pub struct Combiner<T, V>(Arc<dyn Combine<T, V>>);

impl<T: Value, V: Value> Combiner<T, V> {
	/// Creates a combiner from the four steps of a [`Reducer`].
	#[must_use]
	pub fn new<A: Clone + Send + Sync + 'static>(
		seed: impl Fn() -> A + Send + Sync + 'static,
		accumulate: impl Fn(A, T) -> A + Send + Sync + 'static,
		merge: impl Fn(A, A) -> A + Send + Sync + 'static,
		finish: impl Fn(A) -> V + Send + Sync + 'static,
	) -> Self {
		Self::from_reducer(Reducer::new(seed, accumulate, merge, finish))
	}

	/// Creates a combiner from a [`Reducer`].
	#[must_use]
	pub fn from_reducer<A: Clone + Send + Sync + 'static>(reducer: Reducer<T, A, V>) -> Self {
		Self(Arc::new(reducer))
	}

	/// Creates a combiner from any [`Combine`] implementation.
	#[must_use]
	pub fn from_combine(combine: impl Combine<T, V> + 'static) -> Self {
		Self(Arc::new(combine))
	}

	/// Creates a combiner that collects every value into a list and evaluates the whole list at once.
	#[must_use]
	pub fn from_fn(evaluate: impl Fn(Vec<T>) -> V + Send + Sync + 'static) -> Self {
		Self::new(
			Vec::new,
			|mut vals: Vec<T>, val| {
				vals.push(val);
				vals
			},
			|mut head: Vec<T>, mut tail: Vec<T>| {
				head.append(&mut tail);
				head
			},
			evaluate,
		)
	}

	/// Reduces the values, in order, to one output value.
	#[must_use]
	pub fn reduce(&self, values: impl IntoIterator<Item = T>) -> V {
		self.0.reduce(&mut values.into_iter())
	}

	/// Reduces every combination of one value from each list. See [`Combine::enumerate()`].
	///
	/// # Examples
	/// ```
	/// use std::borrow::Cow;
	/// use dicebag::Combiner;
	///
	/// let sum = Combiner::<i32, i32>::sum();
	/// let lists = [Cow::Borrowed(&[1, 2][..]), Cow::Borrowed(&[10, 20, 30][..])];
	/// assert_eq!(sum.enumerate(&lists), [11, 21, 31, 12, 22, 32]);
	/// assert_eq!(sum.enumerate(&[]), [0]);
	/// ```
	#[must_use]
	pub fn enumerate(&self, lists: &[Cow<'_, [T]>]) -> Vec<V> {
		self.0.enumerate(lists)
	}
}

impl<T: Value> Combiner<T, Vec<T>> {
	/// Creates a combiner that collects the values into a list as-is.
	#[must_use]
	pub fn collect() -> Self {
		Self::from_fn(|vals| vals)
	}
}

impl<T: Value> Combiner<T, usize> {
	/// Creates a combiner that counts the values matching a predicate.
	///
	/// # Examples
	/// ```
	/// use dicebag::Combiner;
	///
	/// let successes = Combiner::count_where(|val: &i32| *val >= 5);
	/// assert_eq!(successes.reduce([6, 2, 5, 1]), 2);
	/// ```
	#[must_use]
	pub fn count_where(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
		Self::new(
			|| 0_usize,
			move |count: usize, val: T| if predicate(&val) { count.saturating_add(1) } else { count },
			usize::saturating_add,
			|count| count,
		)
	}
}

impl<T: Value + Default + Add<Output = T>> Combiner<T, T> {
	/// Creates a combiner that sums the values, starting from the type's default (zero for numbers).
	#[must_use]
	pub fn sum() -> Self {
		Self::new(T::default, |total: T, val| total + val, |a: T, b: T| a + b, |total| total)
	}
}

impl<T: Value + From<u8> + Mul<Output = T>> Combiner<T, T> {
	/// Creates a combiner that multiplies the values, starting from one.
	///
	/// # Examples
	/// ```
	/// use dicebag::Combiner;
	///
	/// assert_eq!(Combiner::<i64, i64>::product().reduce([2, 3, 4]), 24);
	/// ```
	#[must_use]
	pub fn product() -> Self {
		Self::new(|| T::from(1_u8), |total: T, val| total * val, |a: T, b: T| a * b, |total| total)
	}
}

impl<T: Value + Ord> Combiner<T, Option<T>> {
	/// Creates a combiner that keeps the highest value, or `None` if there are no values. Ties keep the earliest.
	///
	/// # Examples
	/// ```
	/// use dicebag::Combiner;
	///
	/// assert_eq!(Combiner::max().reduce([3, 9, 4]), Some(9));
	/// assert_eq!(Combiner::<u8, _>::max().reduce([]), None);
	/// ```
	#[must_use]
	pub fn max() -> Self {
		Self::new(
			|| None,
			|best: Option<T>, val| Some(keep_first(best, val, |best, val| best >= val)),
			|head: Option<T>, tail: Option<T>| match tail {
				Some(tail) => Some(keep_first(head, tail, |head, tail| head >= tail)),
				None => head,
			},
			|best| best,
		)
	}

	/// Creates a combiner that keeps the lowest value, or `None` if there are no values. Ties keep the earliest.
	#[must_use]
	pub fn min() -> Self {
		Self::new(
			|| None,
			|worst: Option<T>, val| Some(keep_first(worst, val, |worst, val| worst <= val)),
			|head: Option<T>, tail: Option<T>| match tail {
				Some(tail) => Some(keep_first(head, tail, |head, tail| head <= tail)),
				None => head,
			},
			|worst| worst,
		)
	}
}

/// Picks the current value if there is one and it should be kept over the candidate, or the candidate otherwise.
fn keep_first<T>(current: Option<T>, candidate: T, keep: impl Fn(&T, &T) -> bool) -> T {
	match current {
		Some(current) if keep(&current, &candidate) => current,
		_ => candidate,
	}
}

impl<T, V> Clone for Combiner<T, V> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<T, V> fmt::Debug for Combiner<T, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Combiner").finish_non_exhaustive()
	}
}
