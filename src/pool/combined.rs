use alloc::{borrow::Cow, format, string::String, sync::Arc, vec::Vec};
use core::fmt;

use itertools::Itertools;
use tracing::debug;

use super::{Dice, Pool};
use crate::{
	combine::{product, Combiner},
	die::{roller::Roller, Die, DieRef, Value},
};

/// Die made of a pool of member dice and a combiner. Rolling it rolls every member and combines their values, and its
/// sides are every possible combination of the members' sides, combined.
///
/// The sides are computed on demand each time they're asked for. There are as many of them as the product of the
/// members' side counts, so enumerating a large pool is expensive; [`Self::combination_count()`] gives that count up
/// front without building anything.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::Iter as IterRoller, CombinedDie, Combiner, Dice, Die, SidedDie};
///
/// let coin_and_d3 = CombinedDie::new(
/// 	Dice::new().with(SidedDie::new([1, 2])?).with(SidedDie::new([1, 2, 3])?),
/// 	Combiner::sum(),
/// );
/// assert_eq!(coin_and_d3.sides().as_ref(), [2, 3, 4, 3, 4, 5]);
/// assert_eq!(coin_and_d3.side_count(), 6);
/// assert_eq!(coin_and_d3.roll_with(&mut IterRoller::new([1, 2])), 5);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CombinedDie<T, V>
where
	T: Value,
	V: Value,
{
	/// Member dice
	pool: Dice<T>,

	/// Combiner for the members' values
	combiner: Combiner<T, V>,
}

impl<T: Value, V: Value> CombinedDie<T, V> {
	/// Creates a combined die from a pool of members and a combiner.
	#[must_use]
	pub const fn new(pool: Dice<T>, combiner: Combiner<T, V>) -> Self {
		Self { pool, combiner }
	}

	/// Gets the member dice.
	#[must_use]
	pub const fn pool(&self) -> &Dice<T> {
		&self.pool
	}

	/// Gets the combiner for the members' values.
	#[must_use]
	pub const fn combiner(&self) -> &Combiner<T, V> {
		&self.combiner
	}

	/// Lists every combination of the members' sides, before combining, in the same order as [`Die::sides()`].
	///
	/// # Examples
	/// ```
	/// use dicebag::{CombinedDie, Combiner, Dice, SidedDie};
	///
	/// let die = CombinedDie::new(
	/// 	Dice::new().with(SidedDie::new(['a', 'b'])?).with(SidedDie::new(['x', 'y'])?),
	/// 	Combiner::collect(),
	/// );
	/// assert_eq!(die.tuples(), [['a', 'x'], ['a', 'y'], ['b', 'x'], ['b', 'y']]);
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	#[must_use]
	pub fn tuples(&self) -> Vec<Vec<T>> {
		product::cartesian(&self.member_sides())
	}

	/// Counts the sides of the die without enumerating them, or `None` if the count doesn't fit in a `usize`.
	#[must_use]
	pub fn combination_count(&self) -> Option<usize> {
		self.pool.combination_count()
	}

	/// Converts the die into a shared [`DieRef`].
	#[must_use]
	pub fn into_ref(self) -> DieRef<V> {
		Arc::new(self)
	}

	/// Gets the sides of every member, in pool order.
	fn member_sides(&self) -> Vec<Cow<'_, [T]>> {
		self.pool.iter().map(|die| die.sides()).collect()
	}
}

impl<T: Value, V: Value> Die<V> for CombinedDie<T, V> {
	/// Enumerates the combined value of every combination of the members' sides. The first member varies slowest and
	/// the last fastest, and duplicates are kept. A die with no members has a single side: the combination of nothing.
	fn sides(&self) -> Cow<'_, [V]> {
		debug!(
			members = self.pool.len(),
			sides = ?self.combination_count(),
			"enumerating combined die sides"
		);
		Cow::Owned(self.combiner.enumerate(&self.member_sides()))
	}

	/// Rolls each member once, in pool order, and combines the values.
	fn roll_with(&self, roller: &mut dyn Roller) -> V {
		self.combiner.reduce(self.pool.iter().map(|die| die.roll_with(roller)))
	}

	/// Counts the sides without enumerating them, saturating at `usize::MAX`.
	fn side_count(&self) -> usize {
		self.combination_count().unwrap_or(usize::MAX)
	}

	/// Describes the die as its members joined by `+` in parentheses, e.g. `(d[1,2]+d[1,2,3])`. Members are described
	/// the same way, so nested combined dice are never enumerated. Member sides are formatted with [`fmt::Debug`].
	fn summary(&self) -> Option<String> {
		Some(format!("({})", self.pool.iter().map(|die| summarize(die.as_ref())).join("+")))
	}
}

/// Describes a member die by its summary, or its sides if it has none.
fn summarize<T: Value>(die: &dyn Die<T>) -> String {
	die.summary().unwrap_or_else(|| {
		let sides = die.sides();
		format!("d[{}]", sides.iter().map(|side| format!("{side:?}")).join(","))
	})
}

impl<T: Value, V: Value> Pool<T> for CombinedDie<T, V> {
	#[inline]
	fn dice(&self) -> &[DieRef<T>] {
		self.pool.dice()
	}
}

impl<T: Value + fmt::Display, V: Value> fmt::Display for CombinedDie<T, V> {
	/// Formats the die as its pool.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.pool, f)
	}
}
