//! Roll modifiers and their related types.

use alloc::{borrow::ToOwned, format, string::String, sync::Arc};
use core::fmt;

use tracing::trace;

use super::RollResult;
use crate::{
	die::{roller::Roller, Value},
	error::{Error, Result},
};

/// Function a [`RollModifier`] applies
pub type ModifierFn<T, V> = Arc<dyn Fn(RollResult<T, V>, &mut dyn Roller) -> Result<RollResult<T, V>> + Send + Sync>;

/// Routine that transforms a [`RollResult`] after it's been rolled, such as rerolling some of its members.
///
/// Modifiers are applied in order with [`apply_modifiers()`], each one receiving the result of the one before it.
///
/// # Examples
/// ```
/// use dicebag::{
/// 	die::roller::Iter as IterRoller,
/// 	roll::{apply_modifiers, Condition, RollModifier},
/// 	Combiner, Dice, DieResult, RollResult, SidedDie,
/// };
///
/// let pool = Dice::new().with_many(3, SidedDie::numbered(6)?);
/// let mut roller = IterRoller::new([0, 5, 0, 3, 4]);
/// let result = RollResult::roll_with(pool, Combiner::sum(), true, &mut roller);
/// assert_eq!(result.member_values(), [1, 6, 1]);
///
/// let result = apply_modifiers(result, &[RollModifier::reroll(Condition::Eq(1))], &mut roller)?;
/// assert_eq!(result.member_values(), [4, 6, 5]);
/// assert_eq!(result.value(), 15);
/// # Ok::<(), dicebag::Error>(())
/// ```
pub struct RollModifier<T, V>
where
	T: Value,
	V: Value,
{
	/// Optional name of the modifier
	name: Option<String>,

	/// Transformation the modifier applies
	modify: ModifierFn<T, V>,
}

impl<T: Value, V: Value> RollModifier<T, V> {
	/// Creates an unnamed modifier from a function.
	#[must_use]
	pub fn new(
		modify: impl Fn(RollResult<T, V>, &mut dyn Roller) -> Result<RollResult<T, V>> + Send + Sync + 'static,
	) -> Self {
		Self {
			name: None,
			modify: Arc::new(modify),
		}
	}

	/// Creates a named modifier from a function.
	#[must_use]
	pub fn named(
		name: impl Into<String>,
		modify: impl Fn(RollResult<T, V>, &mut dyn Roller) -> Result<RollResult<T, V>> + Send + Sync + 'static,
	) -> Self {
		Self {
			name: Some(name.into()),
			modify: Arc::new(modify),
		}
	}

	/// Creates a modifier that passes results through untouched.
	#[must_use]
	pub fn identity() -> Self {
		Self::named("identity", |result, _roller| Ok(result))
	}

	/// Gets the name of the modifier, if it has one.
	#[must_use]
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Applies the modifier to a result.
	///
	/// # Errors
	/// Any error produced by the modifier's function is returned as-is.
	pub fn apply(&self, result: RollResult<T, V>, roller: &mut dyn Roller) -> Result<RollResult<T, V>> {
		(self.modify)(result, roller)
	}
}

impl<T: Value + PartialOrd, V: Value> RollModifier<T, V> {
	/// Creates a modifier that rerolls, once, every rerollable member whose value meets a condition. Members that
	/// can't be rerolled are left alone.
	#[must_use]
	pub fn reroll(cond: Condition<T>) -> Self
	where
		T: fmt::Display,
	{
		let name = format!("r{cond}");
		Self::named(name, move |result, roller| {
			for member in result.members() {
				if member.is_rerollable() && cond.check(&member.value()) {
					let value = member.reroll_with(roller)?;
					trace!(?value, %cond, "rerolled member meeting condition");
				}
			}
			Ok(result)
		})
	}
}

impl<T: Value, V: Value> Clone for RollModifier<T, V> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			modify: Arc::clone(&self.modify),
		}
	}
}

impl<T: Value, V: Value> fmt::Debug for RollModifier<T, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RollModifier")
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

impl<T: Value, V: Value> fmt::Display for RollModifier<T, V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name.as_deref().unwrap_or("unnamed modifier"))
	}
}

/// Applies modifiers to a result strictly in order, feeding each one the output of the one before it.
///
/// # Errors
/// The first error produced by a modifier is returned, and no modifiers after it are applied.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::Max, roll::{apply_modifiers, RollModifier}, Combiner, Dice, DieResult, RollResult, SidedDie};
///
/// let result = RollResult::roll_with(Dice::new().with(SidedDie::numbered(6)?), Combiner::sum(), false, &mut Max);
/// let result = apply_modifiers(result, &[], &mut Max)?;
/// assert_eq!(result.value(), 6);
/// let result = apply_modifiers(result, &[RollModifier::identity(), RollModifier::identity()], &mut Max)?;
/// assert_eq!(result.value(), 6);
/// # Ok::<(), dicebag::Error>(())
/// ```
pub fn apply_modifiers<T: Value, V: Value>(
	result: RollResult<T, V>,
	modifiers: &[RollModifier<T, V>],
	roller: &mut dyn Roller,
) -> Result<RollResult<T, V>> {
	modifiers
		.iter()
		.try_fold(result, |result, modifier| modifier.apply(result, roller))
}

/// Test that die values can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Condition<V> {
	/// Checks whether values are equal to its own value. Symbol: `=`
	Eq(V),

	/// Checks whether values are greater than its own value. Symbol: `>`
	Gt(V),

	/// Checks whether values are greater than or equal to its own value. Symbol: `>=`
	Gte(V),

	/// Checks whether values are less than its own value. Symbol: `<`
	Lt(V),

	/// Checks whether values are less than or equal to its own value. Symbol: `<=`
	Lte(V),
}

impl<V: PartialOrd> Condition<V> {
	/// Creates a condition from its corresponding symbol and a given value.
	///
	/// # Errors
	/// If the symbol doesn't match to a known condition variant, [`Error::UnknownCondition`] is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::roll::Condition;
	///
	/// assert_eq!(Condition::from_symbol_and_val(">=", 5)?, Condition::Gte(5));
	/// assert!(Condition::Gte(5).check(&6));
	/// assert!(!Condition::Lt(5).check(&5));
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	pub fn from_symbol_and_val(symbol: &str, val: V) -> Result<Self> {
		Ok(match symbol {
			"=" => Self::Eq(val),
			">" => Self::Gt(val),
			">=" => Self::Gte(val),
			"<" => Self::Lt(val),
			"<=" => Self::Lte(val),
			_ => return Err(Error::UnknownCondition(symbol.to_owned())),
		})
	}

	/// Checks a value against the condition.
	#[must_use]
	pub fn check(&self, val: &V) -> bool {
		match self {
			Self::Eq(expected) => val == expected,
			Self::Gt(expected) => val > expected,
			Self::Gte(expected) => val >= expected,
			Self::Lt(expected) => val < expected,
			Self::Lte(expected) => val <= expected,
		}
	}

	/// Gets the symbol that represents the condition.
	#[must_use]
	pub const fn symbol(&self) -> &'static str {
		match self {
			Self::Eq(..) => "=",
			Self::Gt(..) => ">",
			Self::Gte(..) => ">=",
			Self::Lt(..) => "<",
			Self::Lte(..) => "<=",
		}
	}

	/// Gets the value the condition checks against.
	#[must_use]
	pub const fn value(&self) -> &V {
		match self {
			Self::Eq(expected) | Self::Gt(expected) | Self::Gte(expected) | Self::Lt(expected) | Self::Lte(expected) => {
				expected
			}
		}
	}
}

impl<V: PartialOrd + fmt::Display> fmt::Display for Condition<V> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.symbol(), self.value())
	}
}
