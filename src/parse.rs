//! Parsers for dice notation, such as `d6`, `dF`, or `2d6+dF+d4`. Requires the `parse` feature (enabled by default).
//!
//! Notation is case-insensitive when parsed through the [`FromStr`] implementations, which lowercase their input before
//! handing it to the parsers here. The parsers themselves only accept lowercase.

#![cfg(feature = "parse")]

use alloc::{format, string::ToString, vec::Vec};
use core::str::FromStr;

use chumsky::prelude::*;

use crate::{error::Error, pool::Dice, SidedDie};

/// Generates a parser for whatever follows the `d` of a die: a side count (negative for mirrored sides) or one of the
/// preset names `f`, `c`, and `suite`.
pub fn die_name<'src>() -> impl Parser<'src, &'src str, SidedDie<i32>, extra::Err<Rich<'src, char>>> + Clone {
	let preset = choice((just("suite").to("suite"), just('f').to("F"), just('c').to("C")))
		.try_map(|name, span| SidedDie::named(name).map_err(|err| Rich::custom(span, err.to_string())));

	choice((preset, numbered()))
}

/// Generates a parser for a bare side count, such as `6` or `-4`. The count must fit in a `u16`.
fn numbered<'src>() -> impl Parser<'src, &'src str, SidedDie<i32>, extra::Err<Rich<'src, char>>> + Clone {
	just('-')
		.or_not()
		.then(text::int::<&'src str, _, _>(10))
		.try_map(|(neg, sides), span| {
			let sides = i32::from(
				sides
					.parse::<u16>()
					.map_err(|err| Rich::custom(span, format!("Die sides: {err}")))?,
			);
			let sides = if neg.is_some() { sides.saturating_neg() } else { sides };
			SidedDie::numbered(sides).map_err(|err| Rich::custom(span, err.to_string()))
		})
}

/// Generates a parser that handles a single die like "d20", "d-6", "df", or just "20".
pub fn die_part<'src>() -> impl Parser<'src, &'src str, SidedDie<i32>, extra::Err<Rich<'src, char>>> + Clone {
	just('d').ignore_then(die_name()).or(numbered())
}

/// Generates a parser that handles a single die like "d20", "d-6", "df", or just "20" and expects end of input
pub fn die<'src>() -> impl Parser<'src, &'src str, SidedDie<i32>, extra::Err<Rich<'src, char>>> + Clone {
	die_part().padded().then_ignore(end())
}

/// Generates a parser that handles pools of dice like "d6", "3d6", or "2d6 + df + d4". Each term may have a count in
/// front of it (at most 255), which repeats the same die that many times.
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, Dice<i32>, extra::Err<Rich<'src, char>>> + Clone {
	text::int::<&'src str, _, _>(10)
		.or_not()
		.then_ignore(just('d'))
		.then(die_name())
		.try_map(|(count, die), span| {
			let count = count
				.unwrap_or("1")
				.parse::<u8>()
				.map_err(|err| Rich::custom(span, format!("Dice count: {err}")))?;
			Ok(Dice::new().with_many(count.into(), die))
		})
		.padded()
		.separated_by(just('+'))
		.at_least(1)
		.collect::<Vec<_>>()
		.map(|terms| terms.into_iter().flat_map(Dice::into_vec).collect())
}

/// Generates a parser that handles pools of dice like "d6", "3d6", or "2d6 + df + d4" and expects end of input
pub fn dice<'src>() -> impl Parser<'src, &'src str, Dice<i32>, extra::Err<Rich<'src, char>>> + Clone {
	dice_part().then_ignore(end())
}

/// Joins parser errors into a single [`Error::Parse`].
fn parse_error(errs: &[Rich<'_, char>]) -> Error {
	Error::Parse(errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))
}

impl FromStr for SidedDie<i32> {
	type Err = Error;

	/// Parses a single die from notation such as `d20`, `dF`, or `6`.
	///
	/// # Examples
	/// ```
	/// use dicebag::{Die, Error, SidedDie};
	///
	/// assert_eq!("d6".parse::<SidedDie<i32>>()?.sides().as_ref(), [1, 2, 3, 4, 5, 6]);
	/// assert_eq!("dF".parse::<SidedDie<i32>>()?.sides().as_ref(), [-1, 0, 1]);
	/// assert!(matches!("d0".parse::<SidedDie<i32>>(), Err(Error::Parse(..))));
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lc = s.to_lowercase();
		let result = die().parse(&lc).into_result().map_err(|errs| parse_error(&errs));
		result
	}
}

impl FromStr for Dice<i32> {
	type Err = Error;

	/// Parses a pool of dice from notation such as `2d6+dF+d4`.
	///
	/// # Examples
	/// ```
	/// use dicebag::{Dice, Die, Pool};
	///
	/// let dice: Dice<i32> = "2d6 + dF + d4".parse()?;
	/// let side_counts = dice.dice().iter().map(|die| die.side_count()).collect::<Vec<_>>();
	/// assert_eq!(side_counts, [6, 6, 3, 4]);
	/// # Ok::<(), dicebag::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lc = s.to_lowercase();
		let result = dice().parse(&lc).into_result().map_err(|errs| parse_error(&errs));
		result
	}
}

