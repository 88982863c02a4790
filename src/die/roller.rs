//! Sources of randomness for picking which side of a [`Die`] comes up.

use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Die, Value};

/// Picks sides of dice - what else is there to say?
///
/// Rollers only ever deal in side indices. Turning an index into a value is up to the [`Die`] being rolled, which keeps
/// one roller usable for dice of any value type.
pub trait Roller {
	/// Picks a side index in `0..len`. A `len` of zero always yields zero.
	#[must_use]
	fn pick(&mut self, len: usize) -> usize;

	/// Rolls a single die with this roller.
	///
	/// # Examples
	/// ```
	/// use dicebag::{die::roller::{Max as MaxRoller, Roller}, SidedDie};
	///
	/// let d8 = SidedDie::numbered(8)?;
	/// assert_eq!(MaxRoller.roll(&d8), 8);
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	fn roll<V: Value>(&mut self, die: &dyn Die<V>) -> V
	where
		Self: Sized,
	{
		die.roll_with(self)
	}
}

/// Picks sides uniformly at random using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use dicebag::{die::roller::{FastRand as FastRandRoller, Roller}, SidedDie};
///
/// let mut roller = FastRandRoller::default();
///
/// let d6 = SidedDie::numbered(6)?;
/// let val = roller.roll(&d6);
/// assert!((1..=6).contains(&val));
/// # Ok::<(), dicebag::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use dicebag::{die::roller::{FastRand as FastRandRoller, Roller}, SidedDie};
///
/// let d20 = SidedDie::numbered(20)?;
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&d20);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&d20);
/// assert_eq!(first, second);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to pick sides.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to pick sides.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Picks a uniformly distributed index using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn pick(&mut self, len: usize) -> usize {
		if len > 0 {
			self.0.usize(..len)
		} else {
			0
		}
	}
}

/// Picks the same side index every time, clamped to the last side of whatever is being rolled.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::{Roller, Val as ValRoller}, SidedDie};
///
/// let mut roller = ValRoller(2);
/// assert_eq!(roller.roll(&SidedDie::numbered(6)?), 3);
/// assert_eq!(roller.roll(&SidedDie::named("C")?), 1);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub usize);

impl Roller for Val {
	#[inline]
	fn pick(&mut self, len: usize) -> usize {
		self.0.min(len.saturating_sub(1))
	}
}

/// Always picks the last side.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::{Max as MaxRoller, Roller}, SidedDie};
///
/// assert_eq!(MaxRoller.roll(&SidedDie::numbered(20)?), 20);
/// assert_eq!(MaxRoller.roll(&SidedDie::numbered(-4)?), -4);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	#[inline]
	fn pick(&mut self, len: usize) -> usize {
		len.saturating_sub(1)
	}
}

/// Picks side indices from an iterator. Mainly useful for testing purposes.
///
/// The indices are passed through as-is, so an index past the end of a die's sides makes rolling that die panic.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::{Iter as IterRoller, Roller}, SidedDie};
///
/// let d6 = SidedDie::numbered(6)?;
/// let mut roller = IterRoller::new([0, 5, 2]);
/// assert_eq!(roller.roll(&d6), 1);
/// assert_eq!(roller.roll(&d6), 6);
/// assert_eq!(roller.roll(&d6), 3);
/// assert!(!roller.can_roll());
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = usize>>(Peekable<I>);

impl<I: Iterator<Item = usize>> Iter<I> {
	/// Checks whether the iterator still has indices available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide side indices.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = usize>> Roller for Iter<I> {
	/// Picks the index from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn pick(&mut self, _len: usize) -> usize {
		self.0.next().expect("iterator is finished")
	}
}
