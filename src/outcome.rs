//! Finished roll results and the human-readable descriptions of them.

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use crate::dice::Modifier;

/// The complete, immutable result of a roll: the final value, every die that was drawn, and a description of both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct RollOutcome {
	/// Final result (kept dice plus all modifiers)
	pub value: i32,

	/// Raw value of every die drawn, in draw order. Under advantage or disadvantage this holds both dice of every pair.
	pub dice_rolls: Vec<u32>,

	/// Formatted description of the roll (see [`describe()`])
	pub detail: String,
}

impl RollOutcome {
	/// Creates a new outcome, generating its detail string with [`describe()`].
	#[must_use]
	pub fn new(count: u32, faces: u32, dice_rolls: Vec<u32>, modifiers: &[Modifier], value: i32) -> Self {
		let detail = describe(count, faces, &dice_rolls, modifiers, value);
		Self {
			value,
			dice_rolls,
			detail,
		}
	}

	/// Creates the legacy [`Summary`] of this outcome.
	///
	/// The summary's trailing adjustment is derived from the difference between the value and the sum of all dice, so
	/// it only lines up with the modifiers for rolls made without advantage or disadvantage.
	#[must_use]
	pub fn summary(&self) -> Summary {
		Summary {
			total: self.value,
			rolls: self.dice_rolls.clone(),
		}
	}
}

impl fmt::Display for RollOutcome {
	/// The output of this implementation is the outcome's detail string.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.detail)
	}
}

/// Builds the canonical description of a roll.
///
/// The description is made up of clauses joined by `"; "`:
/// - the dice rolled along with every die value (`Rolled 2d20... values 16, 12`), with the values left out entirely
///   when there are none,
/// - the modifiers as signed values with their reasons (`+3 strength, -2 cover`), left out entirely when there are
///   none,
/// - the final result (`*Result: 29*`), which is always present and always last.
///
/// # Examples
/// ```
/// use dicebag::{outcome::describe, Modifier};
///
/// let mods = [Modifier::new(3, "Strength"), Modifier::new(-2, "cover")];
/// assert_eq!(
/// 	describe(2, 20, &[16, 12], &mods, 29),
/// 	"Rolled 2d20... values 16, 12; +3 strength, -2 cover; *Result: 29*",
/// );
/// assert_eq!(describe(1, 20, &[15], &[], 15), "Rolled 1d20... values 15; *Result: 15*");
/// assert_eq!(describe(1, 6, &[], &[], 0), "Rolled 1d6...; *Result: 0*");
/// ```
#[must_use]
pub fn describe(count: u32, faces: u32, rolls: &[u32], modifiers: &[Modifier], value: i32) -> String {
	let mut detail = format!("Rolled {count}d{faces}...");

	if !rolls.is_empty() {
		detail.push_str(" values ");
		detail.push_str(&join(rolls));
	}

	if !modifiers.is_empty() {
		detail.push_str("; ");
		detail.push_str(&join(modifiers));
	}

	detail.push_str(&format!("; *Result: {value}*"));
	detail
}

/// Simple legacy description of a roll: `Rolls: [4, 6]+5, Total: 15`.
///
/// # Examples
/// ```
/// use dicebag::outcome::Summary;
///
/// let summary = Summary { total: 15, rolls: vec![4, 6] };
/// assert_eq!(summary.to_string(), "Rolls: [4, 6]+5, Total: 15");
///
/// let summary = Summary { total: 5, rolls: vec![4, 6] };
/// assert_eq!(summary.to_string(), "Rolls: [4, 6]-5, Total: 5");
///
/// let summary = Summary { total: 7, rolls: vec![] };
/// assert_eq!(summary.to_string(), "Total: 7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Legacy format, frozen")]
pub struct Summary {
	/// Final total
	pub total: i32,

	/// Values of the dice that were rolled
	pub rolls: Vec<u32>,
}

impl Summary {
	/// Difference between the total and the sum of the dice.
	#[must_use]
	pub fn adjustment(&self) -> i64 {
		i64::from(self.total) - self.rolls.iter().copied().map(i64::from).sum::<i64>()
	}
}

impl fmt::Display for Summary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.rolls.is_empty() {
			return write!(f, "Total: {}", self.total);
		}

		write!(f, "Rolls: [{}]", join(&self.rolls))?;
		match self.adjustment() {
			0 => {}
			adj => write!(f, "{adj:+}")?,
		}
		write!(f, ", Total: {}", self.total)
	}
}

/// Joins displayable items with `", "`.
fn join<T: ToString>(items: &[T]) -> String {
	items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
