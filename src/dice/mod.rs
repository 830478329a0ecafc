//! All functionality for describing dice rolls, rolling them, and working with their raw results.
//!
//! This is the home of the dice "primitives". Actors build on top of these for their checks; see [`Actor`].
//!
//! [`Actor`]: crate::actor::Actor

pub mod modifier;
pub mod percentile;
pub mod roller;

use alloc::{borrow::Cow, vec::Vec};
use core::fmt;

pub use self::{modifier::Modifier, percentile::Percentile, roller::Roller};
use crate::outcome::RollOutcome;

/// Whether each die is rolled once, or twice keeping the better or worse of the pair (the 5e-style mechanic).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "The mechanic only has these three states")]
pub enum Advantage {
	/// Roll each die once
	#[default]
	Normal,

	/// Roll each die twice and keep the higher value
	Advantage,

	/// Roll each die twice and keep the lower value
	Disadvantage,
}

impl Advantage {
	/// Which die of each pair contributes to the total, if dice are rolled in pairs at all.
	#[must_use]
	pub const fn keep(self) -> Option<Keep> {
		match self {
			Self::Normal => None,
			Self::Advantage => Some(Keep::Highest),
			Self::Disadvantage => Some(Keep::Lowest),
		}
	}

	/// Combines two sources of advantage. Advantage and disadvantage cancel each other out, and a normal source defers
	/// to the other.
	///
	/// # Examples
	/// ```
	/// use dicebag::Advantage;
	///
	/// assert_eq!(Advantage::Advantage.combine(Advantage::Disadvantage), Advantage::Normal);
	/// assert_eq!(Advantage::Normal.combine(Advantage::Disadvantage), Advantage::Disadvantage);
	/// assert_eq!(Advantage::Advantage.combine(Advantage::Advantage), Advantage::Advantage);
	/// ```
	#[must_use]
	pub const fn combine(self, other: Self) -> Self {
		match (self, other) {
			(Self::Advantage, Self::Disadvantage) | (Self::Disadvantage, Self::Advantage) => Self::Normal,
			(Self::Normal, x) | (x, Self::Normal) => x,
			(Self::Advantage, Self::Advantage) => Self::Advantage,
			(Self::Disadvantage, Self::Disadvantage) => Self::Disadvantage,
		}
	}
}

impl fmt::Display for Advantage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Normal => "normal",
			Self::Advantage => "advantage",
			Self::Disadvantage => "disadvantage",
		})
	}
}

/// Selection rule for picking one die out of several rolled for the same slot.
/// Shared by advantage/disadvantage pairs and percentile bonus/penalty tens dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_enums, reason = "Highly unlikely to change")]
pub enum Keep {
	/// Keep the highest value
	Highest,

	/// Keep the lowest value
	Lowest,
}

impl Keep {
	/// Finds the index of the value to keep. Ties go to the earliest value.
	/// Returns [`None`] only when `vals` is empty.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::Keep;
	///
	/// assert_eq!(Keep::Highest.select(&[3, 9, 9, 1]), Some(1));
	/// assert_eq!(Keep::Lowest.select(&[3, 9, 1, 1]), Some(2));
	/// assert_eq!(Keep::Lowest.select(&[]), None);
	/// ```
	#[must_use]
	pub fn select(self, vals: &[u32]) -> Option<usize> {
		let mut best: Option<(usize, u32)> = None;
		for (idx, &val) in vals.iter().enumerate() {
			let better = match (self, best) {
				(_, None) => true,
				(Self::Highest, Some((_, cur))) => val > cur,
				(Self::Lowest, Some((_, cur))) => val < cur,
			};
			if better {
				best = Some((idx, val));
			}
		}
		best.map(|(idx, _)| idx)
	}
}

/// A request to roll one or more dice with the same number of faces, along with the modifiers to add to the result and
/// the advantage mode to roll them with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Plain request data, constructed directly by callers")]
pub struct Dice {
	/// Number of logical dice to roll (must be at least 1)
	pub count: u32,

	/// Number of faces on each die (must be at least 1)
	pub faces: u32,

	/// Modifiers to add to the total, in display order
	pub modifiers: Vec<Modifier>,

	/// Whether each die is rolled with advantage or disadvantage
	pub advantage: Advantage,
}

impl Dice {
	/// Creates a new set of dice with a given count and number of faces, no modifiers, rolled normally.
	#[must_use]
	pub const fn new(count: u32, faces: u32) -> Self {
		Self {
			count,
			faces,
			modifiers: Vec::new(),
			advantage: Advantage::Normal,
		}
	}

	/// Creates a new dice builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Checks that the dice can be rolled: the count and faces must both be at least 1, and the largest possible total
	/// must fit in an `i32`.
	///
	/// # Errors
	/// Returns [`Error::ZeroCount`], [`Error::ZeroFaces`], or [`Error::Overflow`] respectively.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{Dice, Error};
	///
	/// assert!(Dice::new(2, 6).validate().is_ok());
	/// assert!(matches!(Dice::new(0, 6).validate(), Err(Error::ZeroCount)));
	/// assert!(matches!(Dice::new(2, 0).validate(), Err(Error::ZeroFaces)));
	/// assert!(matches!(Dice::new(u32::MAX, u32::MAX).validate(), Err(Error::Overflow(..))));
	/// ```
	pub fn validate(&self) -> Result<(), Error> {
		if self.count == 0 {
			return Err(Error::ZeroCount);
		}
		if self.faces == 0 {
			return Err(Error::ZeroFaces);
		}

		let dice_max = u64::from(self.count) * u64::from(self.faces);
		let mods_max: u64 = self.modifiers.iter().map(|m| u64::from(m.value().unsigned_abs())).sum();
		if dice_max.saturating_add(mods_max) > i32::MAX.unsigned_abs().into() {
			return Err(Error::Overflow(self.clone()));
		}

		Ok(())
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	/// Formats the dice as notation, e.g. `2d6+3`. Modifier reasons are left out, and a non-normal advantage mode is
	/// appended as ` with advantage` or ` with disadvantage`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.faces)?;
		for modifier in &self.modifiers {
			write!(f, "{:+}", modifier.value())?;
		}
		if self.advantage != Advantage::Normal {
			write!(f, " with {}", self.advantage)?;
		}
		Ok(())
	}
}

/// Single die produced from rolling [`Dice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct DieRoll {
	/// Value that was rolled
	pub val: u32,

	/// Whether the die lost out to the other die of its advantage/disadvantage pair
	pub dropped: bool,
}

impl DieRoll {
	/// Creates a new, kept die roll with the given value.
	#[must_use]
	pub const fn new(val: u32) -> Self {
		Self { val, dropped: false }
	}

	/// Marks this die roll as dropped.
	#[inline]
	pub fn drop(&mut self) {
		self.dropped = true;
	}

	/// Indicates whether this die roll counts towards the total.
	#[must_use]
	#[inline]
	pub const fn is_kept(&self) -> bool {
		!self.dropped
	}

	/// Indicates whether this die roll has been dropped.
	/// This is the direct inverse of [`DieRoll::is_kept()`].
	#[must_use]
	#[inline]
	pub const fn is_dropped(&self) -> bool {
		self.dropped
	}
}

impl fmt::Display for DieRoll {
	/// The format of a die roll is simply the plain numeric value of the roll, whether it was kept or not.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.val)
	}
}

/// Representation of the raw result from rolling [`Dice`], before it's turned into a [`RollOutcome`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Rolled<'a> {
	/// Each individual die roll that was made, in the order it was drawn. Under advantage or disadvantage both dice of
	/// every pair are present, with the one not selected marked as dropped.
	pub rolls: Vec<DieRoll>,

	/// Dice that were rolled to produce this
	pub dice: Cow<'a, Dice>,
}

impl Rolled<'_> {
	/// Calculates the total of the kept die values alone.
	#[must_use]
	pub fn dice_total(&self) -> i64 {
		self.rolls
			.iter()
			.filter(|roll| roll.is_kept())
			.map(|roll| i64::from(roll.val))
			.sum()
	}

	/// Calculates the final total: all kept die values plus all modifier values.
	///
	/// # Errors
	/// If the total doesn't fit in an `i32`, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{Dice, Modifier, Rolled};
	///
	/// let dice = Dice::builder().count(2).faces(6).modifier(Modifier::new(-1, "tired")).build();
	/// let rolled = Rolled::from_dice_and_rolls(&dice, [4, 5]);
	/// assert_eq!(rolled.total()?, 8);
	/// # Ok::<(), dicebag::dice::Error>(())
	/// ```
	pub fn total(&self) -> Result<i32, Error> {
		let total = self.dice_total() + modifier::sum(&self.dice.modifiers);
		i32::try_from(total).map_err(|_err| Error::Overflow(self.dice.clone().into_owned()))
	}

	/// Gets the values of every die that was rolled, kept or not.
	#[must_use]
	pub fn values(&self) -> Vec<u32> {
		self.rolls.iter().map(|roll| roll.val).collect()
	}

	/// Builds the final [`RollOutcome`] for this set of rolls, including its formatted detail string.
	///
	/// # Errors
	/// If the total doesn't fit in an `i32`, an error variant is returned.
	pub fn outcome(&self) -> Result<RollOutcome, Error> {
		Ok(RollOutcome::new(
			self.dice.count,
			self.dice.faces,
			self.values(),
			&self.dice.modifiers,
			self.total()?,
		))
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Rolled<'static> {
		Rolled {
			rolls: self.rolls,
			dice: Cow::Owned(self.dice.into_owned()),
		}
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values, all of them kept.
	#[must_use]
	pub fn from_dice_and_rolls(dice: &Dice, rolls: impl IntoIterator<Item = u32>) -> Rolled<'_> {
		Rolled {
			rolls: rolls.into_iter().map(DieRoll::new).collect(),
			dice: Cow::Borrowed(dice),
		}
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The dice have a count of zero.
	#[error("roll count must be greater than 0")]
	ZeroCount,

	/// The dice have zero faces.
	#[error("die faces must be greater than 0")]
	ZeroFaces,

	/// The total of the dice could exceed what fits in an `i32`.
	#[error("{0} could overflow its total")]
	Overflow(Dice),
}

/// Builds [`Dice`] with a fluent interface.
///
/// # Examples
///
/// ## Basic dice
/// ```
/// use dicebag::Dice;
///
/// let dice = Dice::builder().count(2).faces(6).build();
/// assert_eq!(dice, Dice::new(2, 6));
/// ```
///
/// ## Modifiers and advantage
/// ```
/// use dicebag::{Advantage, Dice, Modifier};
///
/// let dice = Dice::builder()
/// 	.modifier(Modifier::new(3, "Strength"))
/// 	.modifier(Modifier::new(2, "proficiency"))
/// 	.advantage(Advantage::Advantage)
/// 	.build();
/// assert_eq!(
/// 	dice,
/// 	Dice {
/// 		count: 1,
/// 		faces: 20,
/// 		modifiers: vec![Modifier::new(3, "strength"), Modifier::new(2, "proficiency")],
/// 		advantage: Advantage::Advantage,
/// 	},
/// );
/// assert_eq!(dice.to_string(), "1d20+3+2 with advantage");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder(Dice);

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub const fn count(mut self, count: u32) -> Self {
		self.0.count = count;
		self
	}

	/// Sets the number of faces per die.
	#[must_use]
	pub const fn faces(mut self, faces: u32) -> Self {
		self.0.faces = faces;
		self
	}

	/// Adds a modifier to the end of the dice's modifiers.
	#[must_use]
	pub fn modifier(mut self, modifier: Modifier) -> Self {
		self.0.modifiers.push(modifier);
		self
	}

	/// Adds several modifiers to the end of the dice's modifiers, in order.
	#[must_use]
	pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
		self.0.modifiers.extend(modifiers);
		self
	}

	/// Sets the advantage mode to roll the dice with.
	#[must_use]
	pub const fn advantage(mut self, advantage: Advantage) -> Self {
		self.0.advantage = advantage;
		self
	}

	/// Finalizes the dice.
	#[must_use]
	pub fn build(self) -> Dice {
		self.0
	}
}
