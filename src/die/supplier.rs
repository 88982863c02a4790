//! Looking up dice by name or side count.

use super::{DieRef, SidedDie, Value};
use crate::error::Result;

/// Source of dice for code that only knows a die by its name or side count.
pub trait DieSupplier<V: Value> {
	/// Gets the die with the given name.
	///
	/// # Errors
	/// If the name is unknown, [`Error::UnknownDie`](crate::Error::UnknownDie) is returned.
	fn die_named(&self, name: &str) -> Result<DieRef<V>>;

	/// Gets a die with the given side count.
	///
	/// # Errors
	/// If the side count is zero, [`Error::NoSides`](crate::Error::NoSides) is returned.
	fn die_with_sides(&self, count: i32) -> Result<DieRef<V>>;
}

/// Supplier of the standard numbered and preset dice (see [`SidedDie::numbered()`] and [`SidedDie::named()`]).
///
/// # Examples
/// ```
/// use dicebag::{die::supplier::{DieSupplier, StandardDice}, Die, Error};
///
/// let fudge = StandardDice.die_named("F")?;
/// assert_eq!(fudge.sides().as_ref(), [-1, 0, 1]);
///
/// assert_eq!(StandardDice.die_with_sides(0).unwrap_err(), Error::NoSides);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
#[expect(clippy::exhaustive_structs, reason = "Unit struct, nothing to add")]
pub struct StandardDice;

impl DieSupplier<i32> for StandardDice {
	fn die_named(&self, name: &str) -> Result<DieRef<i32>> {
		SidedDie::named(name).map(SidedDie::into_ref)
	}

	fn die_with_sides(&self, count: i32) -> Result<DieRef<i32>> {
		SidedDie::numbered(count).map(SidedDie::into_ref)
	}
}
