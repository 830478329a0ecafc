//! Sources of randomness for rolling [`Dice`] and percentile checks.

use alloc::{borrow::Cow, vec::Vec};
use core::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{percentile::MAX_EXTRA_DICE, Dice, DieRoll, Error, Percentile, Rolled};
use crate::outcome::RollOutcome;

/// Rolls dice - what else is there to say?
///
/// A roller owns its generator state and every draw advances it, hence `&mut self` everywhere. Share a roller between
/// threads only behind external synchronization, or better yet, give each session its own.
pub trait Roller {
	/// Draws a uniformly distributed integer in `0..n`. Draws for `n == 0` always yield 0.
	#[must_use]
	fn draw(&mut self, n: u32) -> u32;

	/// Rolls a single die with the given number of faces, resulting in a value in `1..=faces`.
	#[must_use]
	#[inline]
	fn roll_die(&mut self, faces: u32) -> DieRoll {
		DieRoll::new(self.draw(faces).saturating_add(1))
	}

	/// Rolls a set of dice, keeping every individual die that is drawn.
	///
	/// Under [`Advantage::Normal`](super::Advantage::Normal), exactly `dice.count` dice are drawn. Otherwise, two dice
	/// are drawn for each logical die and both are kept in the result, with the one not selected by
	/// [`Advantage::keep()`](super::Advantage::keep) marked as dropped.
	///
	/// # Errors
	/// If the dice fail [`Dice::validate()`], an error variant is returned before anything is drawn.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::roller::{Iter as IterRoller, Roller}, Advantage, Dice};
	///
	/// // Raw draws are zero-based, so these make dice showing 4, 17, 12, and 9.
	/// let mut rng = IterRoller::new([3, 16, 11, 8]);
	/// let dice = Dice::builder().count(2).advantage(Advantage::Advantage).build();
	/// let rolled = rng.roll_raw(&dice)?;
	///
	/// assert_eq!(rolled.values(), vec![4, 17, 12, 9]);
	/// assert!(rolled.rolls[0].is_dropped());
	/// assert!(rolled.rolls[3].is_dropped());
	/// assert_eq!(rolled.total()?, 29);
	/// # Ok::<(), dicebag::dice::Error>(())
	/// ```
	fn roll_raw<'d, 'r>(&mut self, dice: &'d Dice) -> Result<Rolled<'r>, Error>
	where
		'd: 'r,
		Self: Sized,
	{
		dice.validate()?;

		let count = usize::try_from(dice.count).unwrap_or(usize::MAX);
		let keep = dice.advantage.keep();
		let mut rolls = Vec::with_capacity(if keep.is_some() { count.saturating_mul(2) } else { count });

		for _ in 0..dice.count {
			match keep {
				None => rolls.push(self.roll_die(dice.faces)),
				Some(keep) => {
					let mut pair = [self.roll_die(dice.faces), self.roll_die(dice.faces)];
					let kept = keep.select(&[pair[0].val, pair[1].val]).unwrap_or(0);
					pair[1 - kept].drop();
					rolls.extend(pair);
				}
			}
		}

		let rolled = Rolled {
			rolls,
			dice: Cow::Borrowed(dice),
		};
		tracing::trace!(dice = %rolled.dice, rolls = ?rolled.values(), kept_total = rolled.dice_total(), "rolled dice");
		Ok(rolled)
	}

	/// Rolls a set of dice and builds the final outcome, including its formatted description.
	///
	/// # Errors
	/// If the dice fail [`Dice::validate()`], an error variant is returned before anything is drawn.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::roller::{Iter as IterRoller, Roller}, Dice, Modifier};
	///
	/// let mut rng = IterRoller::new([15, 11]);
	/// let dice = Dice::builder()
	/// 	.count(2)
	/// 	.modifiers([Modifier::new(3, "Strength"), Modifier::new(2, "Proficiency")])
	/// 	.build();
	/// let outcome = rng.roll(&dice)?;
	///
	/// assert_eq!(outcome.value, 33);
	/// assert_eq!(outcome.dice_rolls, vec![16, 12]);
	/// assert_eq!(outcome.detail, "Rolled 2d20... values 16, 12; +3 strength, +2 proficiency; *Result: 33*");
	/// # Ok::<(), dicebag::dice::Error>(())
	/// ```
	fn roll(&mut self, dice: &Dice) -> Result<RollOutcome, Error>
	where
		Self: Sized,
	{
		self.roll_raw(dice)?.outcome()
	}

	/// Makes a percentile (d100) roll with a number of bonus dice (positive `bonus`) or penalty dice (negative `bonus`).
	/// See [`Percentile`] for how the dice combine. At most [`MAX_EXTRA_DICE`] extra tens digits are drawn.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::roller::{Iter as IterRoller, Roller};
	///
	/// // Ones digit 7, then tens digit candidates 6 and 2. A bonus die keeps the lower tens digit.
	/// let mut rng = IterRoller::new([7, 6, 2]);
	/// let roll = rng.percentile(1);
	/// assert_eq!(roll.value, 27);
	/// ```
	fn percentile(&mut self, bonus: i32) -> Percentile
	where
		Self: Sized,
	{
		let bonus = bonus.clamp(-MAX_EXTRA_DICE, MAX_EXTRA_DICE);
		let ones = self.draw(10);
		let tens = (0..=bonus.unsigned_abs()).map(|_| self.draw(10)).collect::<Vec<_>>();
		let roll = Percentile::new(bonus, tens, ones);
		tracing::trace!(bonus, tens = ?roll.tens, ones, value = roll.value, "rolled percentile");
		roll
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Seeded fastrand roller
/// ```
/// use dicebag::{dice::roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let mut first = FastRandRoller::with_seed(42);
/// let mut second = FastRandRoller::with_seed(42);
/// assert_eq!(first.roll(&dice)?, second.roll(&dice)?);
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
///
/// ## Clock-seeded fastrand roller
/// ```
/// use dicebag::{dice::roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let mut roller = FastRandRoller::random();
/// let outcome = roller.roll(&Dice::new(1, 6))?;
/// assert!((1..=6).contains(&outcome.value));
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
///
/// ## Custom fastrand roller
/// ```
/// use dicebag::{dice::roller::{FastRand as FastRandRoller, Roller}, Dice};
/// use fastrand::Rng;
///
/// let rng = Rng::with_seed(0x750c38d574400);
/// let mut roller = FastRandRoller::new(rng);
/// let _ = roller.roll(&Dice::new(4, 6))?;
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	/// Two rollers created with the same seed produce the same rolls for the same sequence of calls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}

	/// Creates a new fastrand roller seeded from the system clock. Rolls from it aren't reproducible.
	#[cfg(feature = "std")]
	#[must_use]
	pub fn random() -> Self {
		use std::time::{SystemTime, UNIX_EPOCH};

		#[expect(clippy::cast_possible_truncation, reason = "Only the low bits matter for a seed")]
		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |elapsed| elapsed.as_nanos() as u64);
		Self::with_seed(nanos)
	}
}

#[cfg(all(feature = "fastrand", feature = "std"))]
impl Default for FastRand {
	/// Creates a clock-seeded roller (see [`FastRand::random()`]).
	#[inline]
	fn default() -> Self {
		Self::random()
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Draws a value using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn draw(&mut self, n: u32) -> u32 {
		if n > 0 {
			self.0.u32(0..n)
		} else {
			0
		}
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use dicebag::{dice::roller::{Max as MaxRoller, Roller}, Dice};
///
/// let mut roller = MaxRoller;
///
/// let outcome = roller.roll(&Dice::new(4, 6))?;
/// assert!(outcome.dice_rolls.iter().all(|&val| val == 6));
///
/// assert_eq!(roller.percentile(0).value, 99);
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Always draws the largest value in range.
	#[inline]
	fn draw(&mut self, n: u32) -> u32 {
		n.saturating_sub(1)
	}
}

/// Generates draws from an iterator of values. Mainly useful for testing purposes.
///
/// The values are raw draws, so they are zero-based: a value of `5` rolled on a d6 shows as a 6. Values are used
/// as-is, without being checked against the range being drawn from.
///
/// # Examples
/// ```
/// use dicebag::{dice::roller::{Iter as IterRoller, Roller}, Dice};
///
/// let mut roller = IterRoller::new(vec![0, 1, 2, 3, 9]);
/// let outcome = roller.roll(&Dice::new(5, 10))?;
/// assert_eq!(outcome.dice_rolls, vec![1, 2, 3, 4, 10]);
/// assert!(!roller.can_roll());
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide draw values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Draws the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn draw(&mut self, _n: u32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
