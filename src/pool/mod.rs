//! Pools of dice that are rolled together, and the combined dice built from them.

mod combined;

use alloc::{format, string::String, sync::Arc, vec::Vec};
use core::{fmt, iter, slice};

use itertools::Itertools;

pub use self::combined::CombinedDie;
#[cfg(feature = "fastrand")]
use crate::die::roller::FastRand;
use crate::{
	combine::{product, Combiner},
	die::{
		result::{rerollable_or_snapshot, ResultRef, Snapshot},
		roller::Roller,
		Die, DieRef, Value,
	},
	roll::RollResult,
};

/// Anything holding an ordered pool of dice.
///
/// The order of [`Self::dice()`] is the order of every result list produced from the pool and the order values are fed
/// to combiners in.
pub trait Pool<T: Value> {
	/// Gets the dice in the pool, in order.
	#[must_use]
	fn dice(&self) -> &[DieRef<T>];

	/// Rolls every die in the pool once, producing a snapshot result for each.
	#[must_use]
	fn results_with(&self, roller: &mut dyn Roller) -> Vec<ResultRef<T>> {
		self.dice()
			.iter()
			.map(|die| Arc::new(Snapshot::roll(Arc::clone(die), roller)) as ResultRef<T>)
			.collect()
	}

	/// Rolls every die in the pool once, producing a rerollable result for each die that supports rerolling and a
	/// snapshot result for each die that doesn't (see [`rerollable_or_snapshot()`]). Never fails on account of a die
	/// that can't be rerolled.
	#[must_use]
	fn rerollable_results_with(&self, roller: &mut dyn Roller) -> Vec<ResultRef<T>> {
		self.dice()
			.iter()
			.map(|die| rerollable_or_snapshot(die, roller))
			.collect()
	}

	/// Like [`Self::results_with()`], using a fresh [`FastRand`] roller.
	#[cfg(feature = "fastrand")]
	#[must_use]
	fn results(&self) -> Vec<ResultRef<T>> {
		self.results_with(&mut FastRand::default())
	}

	/// Like [`Self::rerollable_results_with()`], using a fresh [`FastRand`] roller.
	#[cfg(feature = "fastrand")]
	#[must_use]
	fn rerollable_results(&self) -> Vec<ResultRef<T>> {
		self.rerollable_results_with(&mut FastRand::default())
	}

	/// Rolls the pool through a combiner, producing a [`RollResult`].
	#[must_use]
	fn roll_through<V: Value>(
		&self,
		combiner: Combiner<T, V>,
		rerollable: bool,
		roller: &mut dyn Roller,
	) -> RollResult<T, V>
	where
		Self: Sized,
	{
		RollResult::roll_with(Dice::of(self.dice().iter().cloned()), combiner, rerollable, roller)
	}
}

/// An ordered pool of dice, possibly of different kinds, whose values are all of type `T`
///
/// # Examples
/// ```
/// use dicebag::{die::roller::Max as MaxRoller, Dice, DieResult, Pool, SidedDie};
///
/// let dice = Dice::new().with(SidedDie::numbered(6)?).with(SidedDie::named("F")?);
/// let results = dice.results_with(&mut MaxRoller);
/// assert_eq!(results.iter().map(|result| result.value()).collect::<Vec<_>>(), [6, 1]);
/// assert!(!results[0].is_rerollable());
///
/// let results = dice.rerollable_results_with(&mut MaxRoller);
/// assert!(results.iter().all(|result| result.is_rerollable()));
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Dice<T>
where
	T: Value,
{
	/// Dice in the pool, in order
	dice: Vec<DieRef<T>>,
}

impl<T: Value> Dice<T> {
	/// Creates an empty pool.
	#[must_use]
	pub const fn new() -> Self {
		Self { dice: Vec::new() }
	}

	/// Creates a pool of the given dice, keeping their order.
	///
	/// # Examples
	/// ```
	/// use std::sync::Arc;
	/// use dicebag::{Dice, Pool, SidedDie};
	///
	/// let members = vec![SidedDie::numbered(4)?.into_ref(), SidedDie::numbered(8)?.into_ref()];
	/// let dice = Dice::of(members.clone());
	/// assert!(dice.dice().iter().zip(&members).all(|(a, b)| Arc::ptr_eq(a, b)));
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	#[must_use]
	pub fn of(dice: impl IntoIterator<Item = DieRef<T>>) -> Self {
		Self {
			dice: dice.into_iter().collect(),
		}
	}

	/// Adds a die to the end of the pool.
	#[must_use]
	pub fn with(mut self, die: impl Die<T> + 'static) -> Self {
		self.dice.push(Arc::new(die));
		self
	}

	/// Adds `count` references to the same die to the end of the pool.
	#[must_use]
	pub fn with_many(mut self, count: usize, die: impl Die<T> + 'static) -> Self {
		let die: DieRef<T> = Arc::new(die);
		self.dice.extend(iter::repeat(die).take(count));
		self
	}

	/// Adds an already-shared die to the end of the pool.
	pub fn push(&mut self, die: DieRef<T>) {
		self.dice.push(die);
	}

	/// Gets the number of dice in the pool.
	#[must_use]
	pub fn len(&self) -> usize {
		self.dice.len()
	}

	/// Checks whether the pool has no dice.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.dice.is_empty()
	}

	/// Iterates over the dice in the pool.
	pub fn iter(&self) -> slice::Iter<'_, DieRef<T>> {
		self.dice.iter()
	}

	/// Counts the possible combinations of sides the pool can roll, or `None` if the count doesn't fit in a `usize`.
	#[must_use]
	pub fn combination_count(&self) -> Option<usize> {
		product::count(self.dice.iter().map(|die| die.side_count()))
	}

	/// Moves the dice out of the pool.
	#[must_use]
	pub fn into_vec(self) -> Vec<DieRef<T>> {
		self.dice
	}
}

impl<T: Value> Pool<T> for Dice<T> {
	#[inline]
	fn dice(&self) -> &[DieRef<T>] {
		&self.dice
	}
}

impl<T: Value> Default for Dice<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Value> FromIterator<DieRef<T>> for Dice<T> {
	fn from_iter<I: IntoIterator<Item = DieRef<T>>>(iter: I) -> Self {
		Self::of(iter)
	}
}

impl<T: Value> Extend<DieRef<T>> for Dice<T> {
	fn extend<I: IntoIterator<Item = DieRef<T>>>(&mut self, iter: I) {
		self.dice.extend(iter);
	}
}

impl<'a, T: Value> IntoIterator for &'a Dice<T> {
	type Item = &'a DieRef<T>;
	type IntoIter = slice::Iter<'a, DieRef<T>>;

	fn into_iter(self) -> Self::IntoIter {
		self.dice.iter()
	}
}

impl<T: Value + fmt::Display> fmt::Display for Dice<T> {
	/// Formats the pool as each of its dice joined by `+`, e.g. `d[1,2]+d[-1,0,1]`. Dice with a
	/// [summary](Die::summary) are formatted as that instead of their sides.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.dice.iter().map(|die| describe_die(die.as_ref())).join("+"))
	}
}

/// Describes a die by its summary if it has one, or otherwise by its sides in the same format as
/// [`SidedDie`](crate::SidedDie)'s `Display` implementation.
fn describe_die<T: Value + fmt::Display>(die: &dyn Die<T>) -> String {
	die.summary()
		.unwrap_or_else(|| format!("d[{}]", die.sides().iter().join(",")))
}
