//! Results of rolling a whole pool of dice through a combiner, and the machinery for producing them.

pub mod mechanics;
pub mod modifier;

use alloc::{
	format,
	string::{String, ToString},
	sync::Arc,
	vec::Vec,
};
use core::fmt;

use tracing::trace;

pub use self::{
	mechanics::{DieRoll, Mechanics},
	modifier::{apply_modifiers, Condition, RollModifier},
};
#[cfg(feature = "fastrand")]
use crate::die::roller::FastRand;
use crate::{
	combine::Combiner,
	die::{result::ResultRef, roller::Roller, DieRef, Value},
	error::{Error, Result},
	pool::{CombinedDie, Dice, Pool},
	DieResult,
};

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed description of the value, listing every individual result that went into it (ideally, up to
	/// `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Result of rolling every die of a pool once, tied to the combiner that reduces the members' values.
///
/// The value is never stored: it's recomputed from the members' current values each time it's asked for, so it always
/// reflects members that have been rerolled since.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::Iter as IterRoller, roll::Describe, Combiner, Dice, DieResult, RollResult, SidedDie};
///
/// let pool = Dice::new().with(SidedDie::numbered(6)?).with(SidedDie::numbered(6)?);
/// let mut roller = IterRoller::new([2, 4, 0]);
/// let result = RollResult::roll_with(pool, Combiner::sum(), true, &mut roller);
/// assert_eq!(result.value(), 8);
///
/// result.members()[1].reroll_with(&mut roller)?;
/// assert_eq!(result.value(), 4);
/// assert_eq!(result.describe(None), "d[1,2,3,4,5,6]+d[1,2,3,4,5,6][3, 1]");
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RollResult<T, V>
where
	T: Value,
	V: Value,
{
	/// Pool and combiner the result was rolled from
	combined: Arc<CombinedDie<T, V>>,

	/// The same combined die, as a die of output values
	die: DieRef<V>,

	/// One result per pool member, in pool order
	members: Vec<ResultRef<T>>,

	/// Whether the result as a whole may be rerolled
	rerollable: bool,
}

impl<T: Value, V: Value> RollResult<T, V> {
	/// Rolls every die of the pool once. If `rerollable` is set, the members are rerollable results wherever their dice
	/// support it (see [`Pool::rerollable_results_with()`]); otherwise they're all snapshots.
	#[must_use]
	pub fn roll_with(pool: Dice<T>, combiner: Combiner<T, V>, rerollable: bool, roller: &mut dyn Roller) -> Self {
		let members = if rerollable {
			pool.rerollable_results_with(roller)
		} else {
			pool.results_with(roller)
		};
		Self::from_members(pool, combiner, members, rerollable)
	}

	/// Rolls the pool with a fresh [`FastRand`] roller. See [`Self::roll_with()`].
	#[cfg(feature = "fastrand")]
	#[must_use]
	pub fn roll(pool: Dice<T>, combiner: Combiner<T, V>, rerollable: bool) -> Self {
		Self::roll_with(pool, combiner, rerollable, &mut FastRand::default())
	}

	/// Creates a result from member results that were already rolled from the pool, one per die in pool order.
	#[must_use]
	pub fn from_members(pool: Dice<T>, combiner: Combiner<T, V>, members: Vec<ResultRef<T>>, rerollable: bool) -> Self {
		let combined = Arc::new(CombinedDie::new(pool, combiner));
		Self {
			die: Arc::clone(&combined) as DieRef<V>,
			combined,
			members,
			rerollable,
		}
	}

	/// Gets the results of the pool's members, in pool order.
	#[must_use]
	pub fn members(&self) -> &[ResultRef<T>] {
		&self.members
	}

	/// Gets the current values of the pool's members, in pool order.
	#[must_use]
	pub fn member_values(&self) -> Vec<T> {
		self.members.iter().map(|member| member.value()).collect()
	}

	/// Gets the pool the result was rolled from.
	#[must_use]
	pub fn pool(&self) -> &Dice<T> {
		self.combined.pool()
	}

	/// Gets the combiner reducing the members' values.
	#[must_use]
	pub fn combiner(&self) -> &Combiner<T, V> {
		self.combined.combiner()
	}

	/// Builds a die with the same pool and combiner as this result, so that the result can take part in another pool.
	///
	/// # Examples
	/// ```
	/// use dicebag::{die::roller::Max, Combiner, Dice, Die, RollResult, SidedDie};
	///
	/// let result = RollResult::roll_with(
	/// 	Dice::new().with(SidedDie::numbered(2)?).with(SidedDie::numbered(3)?),
	/// 	Combiner::sum(),
	/// 	false,
	/// 	&mut Max,
	/// );
	/// let die = result.to_combined_die();
	/// assert_eq!(die.sides().as_ref(), [2, 3, 4, 3, 4, 5]);
	///
	/// let pool_of_pools = Dice::new().with(die.clone()).with(die);
	/// assert_eq!(pool_of_pools.combination_count(), Some(36));
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	#[must_use]
	pub fn to_combined_die(&self) -> CombinedDie<T, V> {
		CombinedDie::clone(&self.combined)
	}
}

impl<T: Value, V: Value> DieResult<V> for RollResult<T, V> {
	/// Combines the members' current values.
	fn value(&self) -> V {
		self.combiner().reduce(self.members.iter().map(|member| member.value()))
	}

	#[inline]
	fn die(&self) -> &DieRef<V> {
		&self.die
	}

	#[inline]
	fn is_rerollable(&self) -> bool {
		self.rerollable
	}

	/// Rerolls every member that supports it, in pool order, and returns the new combined value. Members that fell
	/// back to snapshots keep their values.
	///
	/// # Errors
	/// If the result isn't rerollable, [`Error::RerollUnsupported`] is returned. An error rerolling a member is
	/// returned as-is, leaving any members rerolled before it with their new values.
	fn reroll_with(&self, roller: &mut dyn Roller) -> Result<V> {
		if !self.rerollable {
			return Err(Error::RerollUnsupported);
		}

		for member in self.members.iter().filter(|member| member.is_rerollable()) {
			member.reroll_with(roller)?;
		}

		let value = self.value();
		trace!(members = self.members.len(), ?value, "rerolled pool result");
		Ok(value)
	}
}

impl<T: Value + fmt::Display, V: Value> Describe for RollResult<T, V> {
	/// Builds a string of the pool the result is from and a list of the members' current values.
	///
	/// If `list_limit` is specified and there are more members than it, the list of values will be truncated and
	/// appended with "X more..." (where X is the remaining member count past the max).
	///
	/// # Examples
	/// ```
	/// use dicebag::{die::roller::Max, roll::Describe, Combiner, Dice, RollResult, SidedDie};
	///
	/// let result = RollResult::roll_with(Dice::new().with_many(4, SidedDie::numbered(2)?), Combiner::sum(), false, &mut Max);
	/// assert_eq!(result.describe(Some(2)), "d[1,2]+d[1,2]+d[1,2]+d[1,2][2, 2, 2 more...]");
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let truncated = self.members.len().saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			self.pool(),
			self.members
				.iter()
				.take(list_limit)
				.map(|member| member.value().to_string())
				.collect::<Vec<_>>()
				.join(", "),
			if truncated > 0 {
				format!(", {truncated} more...")
			} else {
				String::new()
			}
		)
	}
}

impl<T: Value + fmt::Display, V: Value + fmt::Display> fmt::Display for RollResult<T, V> {
	/// Formats the full description followed by the combined value, e.g. `d[1,2]+d[1,2,3][2, 3] = 5`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} = {}", self.describe(None), self.value())
	}
}

/// Rolls pools through a combiner that's configured once up front.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::Max, roll::RollResultFactory, Combiner, Dice, DieResult, Error, SidedDie};
///
/// let pool = Dice::new().with(SidedDie::numbered(4)?).with(SidedDie::numbered(6)?);
///
/// let unconfigured = RollResultFactory::<i32, i32>::new();
/// assert_eq!(unconfigured.create_result_with(pool.clone(), &mut Max).unwrap_err(), Error::MissingCombiner);
///
/// let factory = RollResultFactory::new().with_combiner(Combiner::sum());
/// assert_eq!(factory.create_result_with(pool, &mut Max)?.value(), 10);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RollResultFactory<T, V> {
	/// Combiner used for every result
	combiner: Option<Combiner<T, V>>,

	/// Whether created results are rerollable
	rerollable: bool,
}

impl<T: Value, V: Value> RollResultFactory<T, V> {
	/// Creates a factory with no combiner configured that produces rerollable results.
	#[must_use]
	pub const fn new() -> Self {
		Self {
			combiner: None,
			rerollable: true,
		}
	}

	/// Sets the combiner used for every result.
	#[must_use]
	pub fn with_combiner(mut self, combiner: Combiner<T, V>) -> Self {
		self.combiner = Some(combiner);
		self
	}

	/// Sets whether created results are rerollable.
	#[must_use]
	pub fn rerollable(mut self, rerollable: bool) -> Self {
		self.rerollable = rerollable;
		self
	}

	/// Gets the configured combiner.
	///
	/// # Errors
	/// If no combiner is configured, [`Error::MissingCombiner`] is returned.
	pub fn combiner(&self) -> Result<&Combiner<T, V>> {
		self.combiner.as_ref().ok_or(Error::MissingCombiner)
	}

	/// Rolls the pool through the configured combiner.
	///
	/// # Errors
	/// If no combiner is configured, [`Error::MissingCombiner`] is returned.
	pub fn create_result_with(&self, pool: Dice<T>, roller: &mut dyn Roller) -> Result<RollResult<T, V>> {
		let combiner = self.combiner()?.clone();
		Ok(RollResult::roll_with(pool, combiner, self.rerollable, roller))
	}

	/// Rolls the pool through the given combiner instead of the configured one.
	#[must_use]
	pub fn create_result_using(
		&self,
		pool: Dice<T>,
		combiner: Combiner<T, V>,
		roller: &mut dyn Roller,
	) -> RollResult<T, V> {
		RollResult::roll_with(pool, combiner, self.rerollable, roller)
	}

	/// Rolls the pool through the configured combiner with a fresh [`FastRand`] roller.
	///
	/// # Errors
	/// If no combiner is configured, [`Error::MissingCombiner`] is returned.
	#[cfg(feature = "fastrand")]
	pub fn create_result(&self, pool: Dice<T>) -> Result<RollResult<T, V>> {
		self.create_result_with(pool, &mut FastRand::default())
	}
}

impl<T: Value, V: Value> Default for RollResultFactory<T, V> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}
