//! Single dice, their rolled results, and the rollers that drive them.
//!
//! This is the home of the dice "primitives". For rolling several dice together, see [`Dice`] and [`CombinedDie`].
//!
//! [`Dice`]: crate::pool::Dice
//! [`CombinedDie`]: crate::pool::CombinedDie

pub mod result;
pub mod roller;
pub mod supplier;

use alloc::{
	borrow::Cow,
	string::{String, ToString},
	sync::Arc,
	vec::Vec,
};
use core::fmt;

use self::result::DieResult;
#[cfg(feature = "fastrand")]
use self::roller::FastRand;
pub use self::{roller::Roller, supplier::DieSupplier};
use crate::error::{Error, Result};

/// Anything that can sit on the face of a die.
///
/// Blanket-implemented for every type that qualifies, so it never needs implementing by hand.
pub trait Value: Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> Value for T where T: Clone + fmt::Debug + Send + Sync + 'static {}

/// Shared handle to a die. Dice are read-only once built, so every result and pool rolled from one simply holds
/// another reference to it.
pub type DieRef<V> = Arc<dyn Die<V>>;

/// A single die: an ordered, non-empty list of sides, one of which comes up uniformly at random when rolled.
pub trait Die<V: Value>: fmt::Debug + Send + Sync {
	/// Gets the sides of the die, in order. Never empty.
	#[must_use]
	fn sides(&self) -> Cow<'_, [V]>;

	/// Rolls the die once, letting the roller pick which side comes up.
	///
	/// # Panics
	/// The default implementation panics if the roller picks an index outside of the die's sides, which the rollers
	/// in [`roller`] only do when an [`Iter`](roller::Iter) roller is fed such an index.
	#[must_use]
	fn roll_with(&self, roller: &mut dyn Roller) -> V {
		let sides = self.sides();
		sides[roller.pick(sides.len())].clone()
	}

	/// Rolls the die once using a fresh [`FastRand`] roller. Requires the `fastrand` feature (enabled by default).
	#[cfg(feature = "fastrand")]
	#[must_use]
	fn roll(&self) -> V {
		self.roll_with(&mut FastRand::default())
	}

	/// Gets the number of sides of the die.
	#[must_use]
	fn side_count(&self) -> usize {
		self.sides().len()
	}

	/// Describes the die without listing its sides, for dice whose sides are expensive to enumerate. Dice that return
	/// `None` (the default) are described by their list of sides instead.
	#[must_use]
	fn summary(&self) -> Option<String> {
		None
	}

	/// Indicates whether results rolled from this die may be rerolled. Pools fall back to plain snapshots for dice
	/// that return `false` here when asked for rerollable results.
	#[must_use]
	fn supports_reroll(&self) -> bool {
		true
	}
}

/// Die with an explicit list of sides
///
/// # Examples
/// ```
/// use dicebag::{Die, SidedDie};
///
/// let die = SidedDie::new(["ace", "king", "queen"])?;
/// assert_eq!(die.sides().as_ref(), ["ace", "king", "queen"]);
/// assert!(die.sides().contains(&die.roll()));
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SidedDie<V> {
	/// Sides of the die, in order
	sides: Arc<[V]>,
}

impl<V: Value> SidedDie<V> {
	/// Creates a die with the given sides.
	///
	/// # Errors
	/// If there are no sides, [`Error::NoSides`] is returned.
	pub fn new(sides: impl IntoIterator<Item = V>) -> Result<Self> {
		let sides = sides.into_iter().collect::<Arc<[V]>>();
		if sides.is_empty() {
			return Err(Error::NoSides);
		}
		Ok(Self { sides })
	}

	/// Creates a die with a single side, which always comes up.
	#[must_use]
	pub fn fixed(value: V) -> Self {
		Self {
			sides: Arc::from([value]),
		}
	}

	/// Creates a new die with the same sides as the die a result was rolled from.
	///
	/// # Errors
	/// If the result's die has no sides, [`Error::NoSides`] is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::{die::{result::Snapshot, roller::Max}, Die, SidedDie};
	///
	/// let fudge = SidedDie::named("F")?.into_ref();
	/// let result = Snapshot::roll(fudge.clone(), &mut Max);
	/// let copy = SidedDie::from_result(&result)?;
	/// assert_eq!(copy.sides(), fudge.sides());
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	pub fn from_result(result: &(impl DieResult<V> + ?Sized)) -> Result<Self> {
		Self::new(result.die().sides().iter().cloned())
	}

	/// Converts the die into a shared [`DieRef`].
	#[must_use]
	pub fn into_ref(self) -> DieRef<V> {
		Arc::new(self)
	}
}

impl SidedDie<i32> {
	/// Creates a numbered die with the given side count. A positive count gives sides `1..=count`, while a negative
	/// count gives the mirrored sides `-1, -2, ..., count`.
	///
	/// # Errors
	/// If the side count is zero, [`Error::NoSides`] is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::{Die, SidedDie};
	///
	/// assert_eq!(SidedDie::numbered(4)?.sides().as_ref(), [1, 2, 3, 4]);
	/// assert_eq!(SidedDie::numbered(-3)?.sides().as_ref(), [-1, -2, -3]);
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	pub fn numbered(count: i32) -> Result<Self> {
		match count {
			0 => Err(Error::NoSides),
			1.. => Self::new(1..=count),
			_ => Self::new((count..=-1).rev()),
		}
	}

	/// Creates one of the preset dice by name:
	///
	/// - `F` or `f`: fudge die with sides `-1, 0, 1`
	/// - `C`: coin with sides `0, 1`
	/// - `suite`: suit die with sides `0, 1, 2, 4`
	/// - any string of digits: a numbered die with that many sides
	///
	/// # Errors
	/// If the name isn't one of the above, [`Error::UnknownDie`] is returned. A name of `0` results in
	/// [`Error::NoSides`].
	///
	/// # Examples
	/// ```
	/// use dicebag::{Die, Error, SidedDie};
	///
	/// assert_eq!(SidedDie::named("F")?.sides().as_ref(), [-1, 0, 1]);
	/// assert_eq!(SidedDie::named("12")?.side_count(), 12);
	/// assert!(matches!(SidedDie::named("d12"), Err(Error::UnknownDie(..))));
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	pub fn named(name: &str) -> Result<Self> {
		match name {
			"F" | "f" => Self::new([-1, 0, 1]),
			"C" => Self::new([0, 1]),
			"suite" => Self::new([0, 1, 2, 4]),
			_ if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) => {
				let count = name.parse().map_err(|_err| Error::UnknownDie(name.to_string()))?;
				Self::numbered(count)
			}
			_ => Err(Error::UnknownDie(name.to_string())),
		}
	}
}

impl<V: Value> Die<V> for SidedDie<V> {
	#[inline]
	fn sides(&self) -> Cow<'_, [V]> {
		Cow::Borrowed(&self.sides[..])
	}

	#[inline]
	fn side_count(&self) -> usize {
		self.sides.len()
	}
}

impl<V: fmt::Display> fmt::Display for SidedDie<V> {
	/// Formats the die as its list of sides, e.g. `d[1,2,3,4]`.
	///
	/// # Examples
	/// ```
	/// use dicebag::SidedDie;
	///
	/// assert_eq!(SidedDie::named("F")?.to_string(), "d[-1,0,1]");
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"d[{}]",
			self.sides.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
		)
	}
}
