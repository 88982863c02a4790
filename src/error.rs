//! The error type shared by every fallible operation in the crate.

use alloc::string::String;
use core::result;

/// Shorthand for results whose error is this crate's [`Error`].
pub type Result<T, E = Error> = result::Result<T, E>;

/// An error resulting from building, rolling, or looking up dice
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// A die was given no sides to roll. This covers both an empty side list and a zero side count.
	///
	/// # Examples
	/// ```
	/// use dicebag::{Error, SidedDie};
	///
	/// assert_eq!(SidedDie::<u8>::new(Vec::new()).unwrap_err(), Error::NoSides);
	/// assert_eq!(SidedDie::numbered(0).unwrap_err(), Error::NoSides);
	/// ```
	#[error("a die must have at least one side")]
	NoSides,

	/// A rerolled result was given an empty roll history.
	#[error("roll history must contain at least one value")]
	EmptyHistory,

	/// A history reducer could not produce a value from a roll history.
	#[error("history reducer produced no value")]
	EmptyReduction,

	/// The die name doesn't match any known preset.
	#[error("unknown die: {0}")]
	UnknownDie(String),

	/// Rerolling was requested from a result that only holds a snapshot.
	///
	/// # Examples
	/// ```
	/// use dicebag::{die::{result::Snapshot, roller::Max}, DieResult, Error, SidedDie};
	///
	/// let result = Snapshot::roll(SidedDie::numbered(6)?.into_ref(), &mut Max);
	/// assert_eq!(result.reroll_with(&mut Max), Err(Error::RerollUnsupported));
	/// assert_eq!(result.value(), 6);
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	#[error("rerolling not supported")]
	RerollUnsupported,

	/// No roll is registered under the name, or it was registered with a different value type.
	#[error("no roll named \"{0}\"")]
	RollNotFound(String),

	/// No combiner is registered for the requested result type.
	#[error("no combiner registered for {0}")]
	CombinerNotFound(&'static str),

	/// A roll is already registered under the name.
	#[error("roll name \"{0}\" already reserved")]
	DuplicateRoll(String),

	/// A factory was asked to build a result without a combiner to build it with.
	#[error("no combiner configured")]
	MissingCombiner,

	/// The provided symbol doesn't match to a known condition.
	///
	/// # Examples
	/// ```
	/// use dicebag::{roll::modifier::Condition, Error};
	///
	/// let cond = Condition::from_symbol_and_val("!", 4);
	/// assert!(matches!(cond, Err(Error::UnknownCondition(..))));
	/// ```
	#[error("unknown condition symbol: {0}")]
	UnknownCondition(String),

	/// Dice notation couldn't be parsed.
	#[error("invalid dice notation: {0}")]
	Parse(String),
}

impl Error {
	/// Classifies the error.
	///
	/// # Examples
	/// ```
	/// use dicebag::{Error, ErrorKind};
	///
	/// assert_eq!(Error::NoSides.kind(), ErrorKind::InvalidConstruction);
	/// assert_eq!(Error::RerollUnsupported.kind(), ErrorKind::UnsupportedOperation);
	/// assert_eq!(Error::UnknownDie("d7x".to_owned()).kind(), ErrorKind::NotFound);
	/// ```
	#[must_use]
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::NoSides | Self::EmptyHistory | Self::EmptyReduction | Self::Parse(..) => {
				ErrorKind::InvalidConstruction
			}
			Self::RerollUnsupported => ErrorKind::UnsupportedOperation,
			Self::UnknownDie(..) | Self::RollNotFound(..) | Self::CombinerNotFound(..) => ErrorKind::NotFound,
			Self::DuplicateRoll(..) | Self::MissingCombiner | Self::UnknownCondition(..) => ErrorKind::Configuration,
		}
	}
}

/// Broad category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Closed taxonomy")]
pub enum ErrorKind {
	/// Something was built from invalid parts (no sides, empty history, bad notation).
	InvalidConstruction,

	/// The operation isn't supported by the value it was called on. Expected and recoverable.
	UnsupportedOperation,

	/// A named roll, die preset, or combiner doesn't exist.
	NotFound,

	/// A registry or factory was configured incorrectly.
	Configuration,
}
