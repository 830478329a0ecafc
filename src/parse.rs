//! Parsing of compact dice notation, such as `2d6`, `1d20+5`, `3d8-2`, or `d20`.
//!
//! Notation is trimmed and lowercased before parsing, so `" 2D6 "` is the same as `"2d6"`. At most one trailing
//! modifier term is accepted, and it is parsed into an unlabeled [`Modifier`].

#![cfg(feature = "parse")]

use alloc::{
	borrow::ToOwned,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::str::FromStr;

use chumsky::prelude::*;

use crate::{
	dice::{roller::Roller, Advantage, Dice, Error as DiceError, Modifier},
	outcome::RollOutcome,
};

/// Parser extra used by all of the notation parsers
type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Generates a parser for a run of decimal digits, leading zeros included.
fn number<'src>() -> impl Parser<'src, &'src str, &'src str, Extra<'src>> + Clone {
	text::digits(10).at_least(1).to_slice()
}

/// Generates a parser for dice notation with the given parser for the leading dice count.
fn notation_with_count<'src, C>(count: C) -> impl Parser<'src, &'src str, Dice, Extra<'src>> + Clone
where
	C: Parser<'src, &'src str, Option<&'src str>, Extra<'src>> + Clone,
{
	// Parser for the trailing modifier term (e.g. +5, -2)
	let modifier = one_of("+-")
		.then(number())
		.try_map(|(sign, val): (char, &str), span| {
			let val: i32 = val
				.parse()
				.map_err(|err| Rich::custom(span, format!("Modifier: {err}")))?;
			Ok(if sign == '-' { -val } else { val })
		});

	count
		.then_ignore(just('d'))
		.then(number())
		.then(modifier.or_not())
		.try_map(|((count, faces), modifier), span| {
			let count = count
				.unwrap_or("1")
				.parse()
				.map_err(|err| Rich::custom(span, format!("Dice count: {err}")))?;
			let faces = faces
				.parse()
				.map_err(|err| Rich::custom(span, format!("Die faces: {err}")))?;

			Ok(Dice {
				count,
				faces,
				modifiers: modifier.map(Modifier::unlabeled).into_iter().collect(),
				advantage: Advantage::Normal,
			})
		})
}

/// Generates a parser that handles dice notation where the count is optional, like "d20", "2d6", or "d20+5".
/// A missing count means a single die.
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, Dice, Extra<'src>> + Clone {
	notation_with_count(number().or_not())
}

/// Generates a parser that handles dice notation where the count is optional, and expects end of input.
pub fn dice<'src>() -> impl Parser<'src, &'src str, Dice, Extra<'src>> + Clone {
	dice_part().then_ignore(end())
}

/// Generates a parser that handles dice notation where the count is mandatory, like "2d6" or "1d20+5".
pub fn strict_dice_part<'src>() -> impl Parser<'src, &'src str, Dice, Extra<'src>> + Clone {
	notation_with_count(number().map(Some))
}

/// Generates a parser that handles dice notation where the count is mandatory, and expects end of input.
pub fn strict_dice<'src>() -> impl Parser<'src, &'src str, Dice, Extra<'src>> + Clone {
	strict_dice_part().then_ignore(end())
}

/// Error that can occur while parsing dice notation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The notation doesn't match the grammar at all.
	#[error("invalid dice expression \"{expr}\": {details}")]
	Expression {
		/// The notation that failed to parse (trimmed)
		expr: String,

		/// Description of what went wrong
		details: String,
	},

	/// The notation has a dice count below 1.
	#[error("invalid dice count {0}: must be at least 1")]
	Count(u32),

	/// The notation has a number of die faces below 1.
	#[error("invalid die faces {0}: must be at least 1")]
	Faces(u32),
}

/// Error that can occur while parsing and rolling dice notation with [`roll()`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RollError {
	/// Parsing the notation failed.
	#[error(transparent)]
	Parse(#[from] Error),

	/// Rolling the parsed dice failed.
	#[error("dice error while rolling: {0}")]
	Dice(#[from] DiceError),
}

/// Runs a notation parser against trimmed and lowercased input, then checks the count and faces.
fn parse_with<'src>(
	parser: impl Parser<'src, &'src str, Dice, Extra<'src>>,
	normalized: &'src str,
) -> Result<Dice, Error> {
	let dice = parser.parse(normalized).into_result().map_err(|errs| Error::Expression {
		expr: normalized.to_owned(),
		details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
	})?;

	if dice.count == 0 {
		return Err(Error::Count(dice.count));
	}
	if dice.faces == 0 {
		return Err(Error::Faces(dice.faces));
	}

	Ok(dice)
}

impl FromStr for Dice {
	type Err = Error;

	/// Parses dice notation where the count is optional (see [`dice()`]).
	///
	/// # Examples
	/// ```
	/// use dicebag::{parse::Error, Dice, Modifier};
	///
	/// let dice: Dice = " 1D20+5 ".parse()?;
	/// assert_eq!(dice, Dice::builder().count(1).faces(20).modifier(Modifier::unlabeled(5)).build());
	///
	/// let dice: Dice = "d20".parse()?;
	/// assert_eq!(dice, Dice::new(1, 20));
	///
	/// assert!(matches!("0d6".parse::<Dice>(), Err(Error::Count(0))));
	/// assert!(matches!("2d0".parse::<Dice>(), Err(Error::Faces(0))));
	/// assert!(matches!("1d20+3+2".parse::<Dice>(), Err(Error::Expression { .. })));
	/// # Ok::<(), Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim().to_lowercase();
		parse_with(dice(), normalized.as_str())
	}
}

impl Dice {
	/// Parses dice notation where the count is mandatory (see [`strict_dice()`]).
	///
	/// # Errors
	/// If the notation doesn't match the grammar, or has a count or number of faces below 1, an error variant is
	/// returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::{parse::Error, Dice};
	///
	/// assert_eq!(Dice::parse_strict("3d8-2")?.to_string(), "3d8-2");
	/// assert!(matches!(Dice::parse_strict("d6"), Err(Error::Expression { .. })));
	/// # Ok::<(), Error>(())
	/// ```
	pub fn parse_strict(s: &str) -> Result<Self, Error> {
		let normalized = s.trim().to_lowercase();
		parse_with(strict_dice(), normalized.as_str())
	}
}

/// Parses dice notation and rolls it.
///
/// # Errors
/// If the notation can't be parsed, or the parsed dice can't be rolled, an error variant is returned.
///
/// # Examples
/// ```
/// use dicebag::{dice::roller::Iter as IterRoller, parse};
///
/// let mut rng = IterRoller::new([2, 5, 1]);
/// let outcome = parse::roll(&mut rng, "3d6+5")?;
/// assert_eq!(outcome.value, 16);
/// assert_eq!(outcome.detail, "Rolled 3d6... values 3, 6, 2; +5; *Result: 16*");
/// assert_eq!(outcome.summary().to_string(), "Rolls: [3, 6, 2]+5, Total: 16");
/// # Ok::<(), dicebag::parse::RollError>(())
/// ```
pub fn roll(roller: &mut impl Roller, notation: &str) -> Result<RollOutcome, RollError> {
	let dice: Dice = notation.parse()?;
	Ok(roller.roll(&dice)?)
}
