//! Results of rolling a single die, both fixed snapshots and rerollable results that keep their full history.

use alloc::{sync::Arc, vec, vec::Vec};
use core::{cmp::Ordering, fmt};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::trace;

#[cfg(feature = "fastrand")]
use super::roller::FastRand;
use super::{roller::Roller, DieRef, Value};
use crate::error::{Error, Result};

/// Shared handle to a die result, as handed out by pools.
pub type ResultRef<V> = Arc<dyn DieResult<V>>;

/// The outcome of rolling a die: its current value and the die it came from.
///
/// Results are snapshots by default, meaning [`Self::reroll_with()`] fails with [`Error::RerollUnsupported`].
/// Rerollable results override it, replacing their value in place. All methods take `&self` so that results can be
/// shared between threads; rerollable implementations must guard their value so that a reader never sees it
/// mid-update.
pub trait DieResult<V: Value>: fmt::Debug + Send + Sync {
	/// Gets the current value of the result.
	#[must_use]
	fn value(&self) -> V;

	/// Gets the die that was rolled to produce the result.
	#[must_use]
	fn die(&self) -> &DieRef<V>;

	/// Indicates whether [`Self::reroll_with()`] is supported.
	#[must_use]
	fn is_rerollable(&self) -> bool {
		false
	}

	/// Rolls the result's die again and updates the result, returning its new value.
	///
	/// # Errors
	/// If the result doesn't support rerolling, [`Error::RerollUnsupported`] is returned and the value is unchanged.
	fn reroll_with(&self, _roller: &mut dyn Roller) -> Result<V> {
		Err(Error::RerollUnsupported)
	}

	/// Rerolls using a fresh [`FastRand`] roller. See [`Self::reroll_with()`].
	///
	/// # Errors
	/// If the result doesn't support rerolling, [`Error::RerollUnsupported`] is returned.
	#[cfg(feature = "fastrand")]
	fn reroll(&self) -> Result<V> {
		self.reroll_with(&mut FastRand::default())
	}
}

/// Result of a single roll that can never be rerolled
#[derive(Debug, Clone)]
pub struct Snapshot<V>
where
	V: Value,
{
	/// Die that was rolled
	die: DieRef<V>,

	/// Value that was rolled
	value: V,
}

impl<V: Value> Snapshot<V> {
	/// Rolls the die once and holds onto the value.
	#[must_use]
	pub fn roll(die: DieRef<V>, roller: &mut dyn Roller) -> Self {
		let value = die.roll_with(roller);
		Self { die, value }
	}

	/// Creates a snapshot with a value that was already rolled from the die.
	#[must_use]
	pub const fn new(die: DieRef<V>, value: V) -> Self {
		Self { die, value }
	}
}

impl<V: Value> DieResult<V> for Snapshot<V> {
	#[inline]
	fn value(&self) -> V {
		self.value.clone()
	}

	#[inline]
	fn die(&self) -> &DieRef<V> {
		&self.die
	}
}

impl<V: Value + fmt::Display> fmt::Display for Snapshot<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.value)
	}
}

/// Policy for deriving the value of a [`Rerolled`] result from its whole roll history
///
/// # Examples
/// ```
/// use dicebag::die::result::HistoryReducer;
///
/// let history = [3, 1, 4, 1, 5];
/// assert_eq!(HistoryReducer::last().reduce(&history), Some(5));
/// assert_eq!(HistoryReducer::best().reduce(&history), Some(5));
/// assert_eq!(HistoryReducer::worst().reduce(&history), Some(1));
/// assert_eq!(HistoryReducer::<i32>::last().reduce(&[]), None);
/// ```
#[derive(Clone)]
pub struct HistoryReducer<V>(Arc<dyn Fn(&[V]) -> Option<V> + Send + Sync>);

impl<V: Value> HistoryReducer<V> {
	/// Creates a reducer from a function. The function is only ever given non-empty histories by [`Rerolled`], but
	/// may still return `None` to reject one.
	#[must_use]
	pub fn new(reduce: impl Fn(&[V]) -> Option<V> + Send + Sync + 'static) -> Self {
		Self(Arc::new(reduce))
	}

	/// Creates a reducer that keeps the most recent roll.
	#[must_use]
	pub fn last() -> Self {
		Self::new(|history| history.last().cloned())
	}

	/// Creates a reducer that keeps the best roll according to a comparator, where greater is better.
	/// Ties go to the earliest of the tied rolls.
	#[must_use]
	pub fn best_by(cmp: impl Fn(&V, &V) -> Ordering + Send + Sync + 'static) -> Self {
		Self::new(move |history| {
			history
				.iter()
				.reduce(|best, val| if cmp(best, val).is_lt() { val } else { best })
				.cloned()
		})
	}

	/// Creates a reducer that keeps the worst roll according to a comparator, where lesser is worse.
	/// Ties go to the earliest of the tied rolls.
	#[must_use]
	pub fn worst_by(cmp: impl Fn(&V, &V) -> Ordering + Send + Sync + 'static) -> Self {
		Self::new(move |history| {
			history
				.iter()
				.reduce(|worst, val| if cmp(worst, val).is_gt() { val } else { worst })
				.cloned()
		})
	}

	/// Reduces a history to a value.
	#[must_use]
	pub fn reduce(&self, history: &[V]) -> Option<V> {
		(self.0)(history)
	}
}

impl<V: Value + Ord> HistoryReducer<V> {
	/// Creates a reducer that keeps the highest roll in the values' natural order.
	#[must_use]
	pub fn best() -> Self {
		Self::best_by(V::cmp)
	}

	/// Creates a reducer that keeps the lowest roll in the values' natural order.
	#[must_use]
	pub fn worst() -> Self {
		Self::worst_by(V::cmp)
	}
}

impl<V> fmt::Debug for HistoryReducer<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HistoryReducer").finish_non_exhaustive()
	}
}

/// Rerollable result that remembers every value rolled for it. Its value is always its reducer applied to that
/// history, so the same result can stand for "keep the latest", "best of all tries", and so on.
///
/// # Examples
/// ```
/// use dicebag::{
/// 	die::{result::{HistoryReducer, Rerolled}, roller::Iter as IterRoller},
/// 	DieResult, SidedDie,
/// };
///
/// let d6 = SidedDie::numbered(6)?.into_ref();
/// let mut roller = IterRoller::new([2, 0, 3, 0, 4, 1]);
///
/// let result = Rerolled::roll(d6, HistoryReducer::best(), &mut roller)?;
/// assert_eq!(result.value(), 3);
/// for _ in 0..4 {
/// 	result.reroll_with(&mut roller)?;
/// }
/// assert_eq!(result.history(), [3, 1, 4, 1, 5]);
/// assert_eq!(result.value(), 5);
///
/// assert_eq!(result.reroll_with(&mut roller)?, 5);
/// assert_eq!(result.history().len(), 6);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug)]
pub struct Rerolled<V>
where
	V: Value,
{
	/// Die that gets rerolled
	die: DieRef<V>,

	/// Policy turning the history into the value
	reducer: HistoryReducer<V>,

	/// History and the value derived from it, updated together
	state: Mutex<History<V>>,
}

/// Mutable part of a [`Rerolled`] result
#[derive(Debug, Clone)]
struct History<V> {
	/// Every value rolled, oldest first
	rolls: Vec<V>,

	/// Reduction of `rolls`
	value: V,
}

impl<V: Value> Rerolled<V> {
	/// Creates a result from an existing roll history.
	///
	/// # Errors
	/// If the history is empty, [`Error::EmptyHistory`] is returned. If the reducer produces no value for it,
	/// [`Error::EmptyReduction`] is returned.
	pub fn new(die: DieRef<V>, history: Vec<V>, reducer: HistoryReducer<V>) -> Result<Self> {
		let state = History::reduced(history, &reducer)?;
		Ok(Self {
			die,
			reducer,
			state: Mutex::new(state),
		})
	}

	/// Rolls the die once to start a history reduced by the given reducer.
	///
	/// # Errors
	/// If the reducer produces no value for the first roll, [`Error::EmptyReduction`] is returned.
	pub fn roll(die: DieRef<V>, reducer: HistoryReducer<V>, roller: &mut dyn Roller) -> Result<Self> {
		let first = die.roll_with(roller);
		Self::new(die, vec![first], reducer)
	}

	/// Rolls the die once to start a history whose value is always the latest roll.
	#[must_use]
	pub fn latest(die: DieRef<V>, roller: &mut dyn Roller) -> Self {
		let value = die.roll_with(roller);
		Self {
			die,
			reducer: HistoryReducer::last(),
			state: Mutex::new(History {
				rolls: vec![value.clone()],
				value,
			}),
		}
	}

	/// Gets a copy of every value rolled so far, oldest first.
	#[must_use]
	pub fn history(&self) -> Vec<V> {
		self.lock().rolls.clone()
	}

	/// Gets the reducer deriving the value from the history.
	#[must_use]
	pub const fn reducer(&self) -> &HistoryReducer<V> {
		&self.reducer
	}

	/// Replaces the whole history at once and recomputes the value from it.
	///
	/// # Errors
	/// If the new history is empty, [`Error::EmptyHistory`] is returned. If the reducer produces no value for it,
	/// [`Error::EmptyReduction`] is returned. Either way, the result is left as it was.
	///
	/// # Examples
	/// ```
	/// use dicebag::{
	/// 	die::{result::{HistoryReducer, Rerolled}, roller::Max},
	/// 	DieResult, Error, SidedDie,
	/// };
	///
	/// let result = Rerolled::roll(SidedDie::numbered(6)?.into_ref(), HistoryReducer::worst(), &mut Max)?;
	/// result.set_values(vec![4, 2, 5])?;
	/// assert_eq!(result.value(), 2);
	///
	/// assert_eq!(result.set_values(Vec::new()), Err(Error::EmptyHistory));
	/// assert_eq!(result.history(), [4, 2, 5]);
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	pub fn set_values(&self, history: Vec<V>) -> Result<()> {
		let state = History::reduced(history, &self.reducer)?;
		*self.lock() = state;
		Ok(())
	}

	/// Locks the history. The state is consistent between every statement that touches it, so a poisoned lock is
	/// still safe to use.
	fn lock(&self) -> MutexGuard<'_, History<V>> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl<V: Value> History<V> {
	/// Builds the state for a history, validating it along the way.
	fn reduced(rolls: Vec<V>, reducer: &HistoryReducer<V>) -> Result<Self> {
		if rolls.is_empty() {
			return Err(Error::EmptyHistory);
		}
		let value = reducer.reduce(&rolls).ok_or(Error::EmptyReduction)?;
		Ok(Self { rolls, value })
	}
}

impl<V: Value> DieResult<V> for Rerolled<V> {
	fn value(&self) -> V {
		self.lock().value.clone()
	}

	#[inline]
	fn die(&self) -> &DieRef<V> {
		&self.die
	}

	#[inline]
	fn is_rerollable(&self) -> bool {
		true
	}

	/// Rolls the die again, appends the roll to the history, and recomputes the value from the whole history.
	fn reroll_with(&self, roller: &mut dyn Roller) -> Result<V> {
		let mut state = self.lock();
		let roll = self.die.roll_with(roller);
		state.rolls.push(roll);

		let Some(value) = self.reducer.reduce(&state.rolls) else {
			state.rolls.pop();
			return Err(Error::EmptyReduction);
		};

		trace!(rolls = state.rolls.len(), ?value, "rerolled die result");
		state.value = value.clone();
		Ok(value)
	}
}

impl<V: Value + fmt::Display> fmt::Display for Rerolled<V> {
	/// Formats the current value, appended with ` (r)` if it has been rerolled at least once.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.lock();
		write!(f, "{}{}", state.value, if state.rolls.len() > 1 { " (r)" } else { "" })
	}
}

/// Rolls a die into a rerollable result if the die supports rerolling, or into a plain [`Snapshot`] otherwise.
///
/// This is the one place where a failure to provide rerolling is recovered from rather than reported, so that pools
/// can freely mix dice that do and don't support it.
#[must_use]
pub fn rerollable_or_snapshot<V: Value>(die: &DieRef<V>, roller: &mut dyn Roller) -> ResultRef<V> {
	if die.supports_reroll() {
		Arc::new(Rerolled::latest(Arc::clone(die), roller))
	} else {
		trace!(?die, "die doesn't support rerolling, falling back to a snapshot");
		Arc::new(Snapshot::roll(Arc::clone(die), roller))
	}
}
