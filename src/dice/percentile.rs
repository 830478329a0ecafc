//! Percentile ("roll-under") rolls with bonus and penalty dice.

use alloc::{vec, vec::Vec};

use super::Keep;
use crate::outcome::RollOutcome;

/// Most bonus or penalty dice a percentile roll uses. Larger bonuses are capped to this.
pub const MAX_EXTRA_DICE: i32 = 10;

/// Result of a percentile roll made from a ones digit and one or more tens digits, each drawn in `0..=9`.
///
/// With no bonus, a single tens digit is drawn. Each bonus die adds another tens digit candidate and the lowest one is
/// kept, while each penalty die (negative bonus) adds a candidate and the highest one is kept. The result is
/// `tens * 10 + ones`, except that a result of 0 (a "00" roll) counts as 100.
///
/// # Examples
/// ```
/// use dicebag::dice::Percentile;
///
/// // Two penalty dice: the highest tens digit (8) is kept.
/// let roll = Percentile::new(-2, vec![3, 8, 5], 4);
/// assert_eq!(roll.kept, 1);
/// assert_eq!(roll.value, 84);
///
/// // Double zero is a 100.
/// let roll = Percentile::new(0, vec![0], 0);
/// assert_eq!(roll.value, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct Percentile {
	/// Number of bonus dice (positive) or penalty dice (negative) the roll was made with
	pub bonus: i32,

	/// Drawn ones digit
	pub ones: u32,

	/// Every drawn tens digit candidate, in draw order (always `1 + |bonus|` of them)
	pub tens: Vec<u32>,

	/// Index into `tens` of the digit that was used
	pub kept: usize,

	/// Final result in `1..=100`
	pub value: u32,
}

impl Percentile {
	/// Builds a percentile result from its drawn digits, selecting the tens digit according to the bonus.
	/// The bonus is clamped to `-MAX_EXTRA_DICE..=MAX_EXTRA_DICE`.
	#[must_use]
	pub fn new(bonus: i32, tens: Vec<u32>, ones: u32) -> Self {
		let bonus = bonus.clamp(-MAX_EXTRA_DICE, MAX_EXTRA_DICE);
		let keep = match bonus {
			1.. => Some(Keep::Lowest),
			..=-1 => Some(Keep::Highest),
			0 => None,
		};
		let kept = keep.and_then(|keep| keep.select(&tens)).unwrap_or(0);
		let tens_digit = tens.get(kept).copied().unwrap_or(0);

		let value = match tens_digit.saturating_mul(10).saturating_add(ones) {
			0 => 100,
			value => value,
		};

		Self {
			bonus,
			ones,
			tens,
			kept,
			value,
		}
	}

	/// Checks whether the roll is at or under a target value.
	#[must_use]
	pub fn succeeds(&self, target: i32) -> bool {
		i64::from(self.value) <= i64::from(target)
	}

	/// Creates a [`RollOutcome`] for the roll, treating it as a single d100.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::Percentile;
	///
	/// let roll = Percentile::new(1, vec![6, 2], 7);
	/// assert_eq!(roll.outcome().detail, "Rolled 1d100... values 27; *Result: 27*");
	/// ```
	#[must_use]
	pub fn outcome(&self) -> RollOutcome {
		let value = i32::try_from(self.value).unwrap_or(i32::MAX);
		RollOutcome::new(1, 100, vec![self.value], &[], value)
	}
}
