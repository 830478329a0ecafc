//! Named bonuses and penalties applied to roll totals.

use alloc::string::String;
use core::fmt;

/// A signed adjustment to a roll total, labelled with the reason it applies (e.g. "+3 strength").
///
/// The reason is always stored in lowercase, so modifiers created from "Strength" and "strength" display and compare
/// identically. Modifiers are never deduplicated: two modifiers with the same reason both count towards a total.
///
/// # Examples
/// ```
/// use dicebag::Modifier;
///
/// let bonus = Modifier::new(3, "Strength");
/// assert_eq!(bonus.value(), 3);
/// assert_eq!(bonus.reason(), "strength");
/// assert_eq!(bonus.to_string(), "+3 strength");
///
/// let penalty = Modifier::new(-2, "EXHAUSTION");
/// assert_eq!(penalty.to_string(), "-2 exhaustion");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Modifier {
	/// Amount to add to the total (negative for a penalty)
	value: i32,

	/// Lowercased description of where the modifier comes from
	reason: String,
}

impl Modifier {
	/// Creates a new modifier, lowercasing the reason.
	#[must_use]
	pub fn new(value: i32, reason: &str) -> Self {
		Self {
			value,
			reason: reason.to_lowercase(),
		}
	}

	/// Creates a modifier without a reason, such as the `+5` in `1d20+5`.
	#[must_use]
	#[inline]
	pub const fn unlabeled(value: i32) -> Self {
		Self {
			value,
			reason: String::new(),
		}
	}

	/// Amount the modifier adds to a total.
	#[must_use]
	#[inline]
	pub const fn value(&self) -> i32 {
		self.value
	}

	/// Lowercased reason for the modifier. Empty for modifiers parsed from dice notation.
	#[must_use]
	#[inline]
	pub fn reason(&self) -> &str {
		&self.reason
	}

	/// Checks whether the modifier applies for the given reason, ignoring case.
	#[must_use]
	pub fn is_for(&self, reason: &str) -> bool {
		self.reason == reason.to_lowercase()
	}
}

impl fmt::Display for Modifier {
	/// Formats the modifier as its signed value followed by its reason, e.g. `+3 strength` or `-2 penalty`.
	/// A modifier without a reason is just its signed value.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.reason.is_empty() {
			write!(f, "{:+}", self.value)
		} else {
			write!(f, "{:+} {}", self.value, self.reason)
		}
	}
}

/// Sums the values of a set of modifiers. The sum is widened so that it cannot overflow for any realistic list.
#[must_use]
pub fn sum<'m>(modifiers: impl IntoIterator<Item = &'m Modifier>) -> i64 {
	modifiers.into_iter().map(|modifier| i64::from(modifier.value)).sum()
}
