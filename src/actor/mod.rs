//! Combat actors: characters, NPCs, and monsters with hit points, armor class, attributes, and combat modifiers.
//!
//! Actors never hold a roller of their own. Every check takes the [`Roller`] to draw from, so the caller decides how
//! rollers are shared between actors.

pub mod builder;

use alloc::{
	collections::BTreeMap,
	string::{String, ToString},
	vec::Vec,
};

pub use self::builder::{ActorConfig, Builder};
use crate::{
	dice::{roller::Roller, Advantage, Dice, Error as DiceError, Modifier, Percentile},
	outcome::RollOutcome,
};

/// Number of faces on the die used for skill checks and attack rolls unless told otherwise
pub const PRIMARY_DIE: u32 = 20;

/// A character, NPC, or monster in the game world, with the stats needed for combat and skill checks.
///
/// # Examples
/// ```
/// use dicebag::{dice::roller::Iter as IterRoller, Actor, Advantage};
///
/// let mut rogue = Actor::builder("Busta the Black").hp(30).ac(15).initiative(3).build()?;
/// rogue.set_attribute("Stealth", 9);
/// assert_eq!(rogue.id(), "busta_the_black");
///
/// let mut rng = IterRoller::new([5]);
/// let outcome = rogue.skill_check(&mut rng, "stealth", Advantage::Normal)?;
/// assert_eq!(outcome.detail, "Rolled 1d20... values 6; +9 stealth; *Result: 15*");
///
/// rogue.sub_hp(15);
/// rogue.add_hp(8);
/// assert_eq!(rogue.hp(), 23);
/// # Ok::<(), dicebag::actor::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
	/// Normalized identifier
	id: String,

	/// Maximum hit points (always above 0)
	max_hp: i32,

	/// Current hit points (always in `0..=max_hp`)
	current_hp: i32,

	/// Armor class (always above 0)
	ac: i32,

	/// Initiative modifier
	initiative: i32,

	/// Persistent modifiers applied to every attack roll
	combat_modifiers: Vec<Modifier>,

	/// Attribute values keyed by lowercased name
	attributes: BTreeMap<String, i32>,
}

impl Actor {
	/// Creates a new actor from a configuration, validating it. The actor starts at full hit points.
	///
	/// # Errors
	/// If the name normalizes to an empty id, or the max HP or AC aren't above 0, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::actor::{Actor, ActorConfig, Error};
	///
	/// let config = ActorConfig {
	/// 	name: "Goblin#3".into(),
	/// 	max_hp: 7,
	/// 	ac: 15,
	/// 	..ActorConfig::default()
	/// };
	/// let goblin = Actor::new(config.clone())?;
	/// assert_eq!(goblin.id(), "goblin_3");
	/// assert_eq!(goblin.hp(), 7);
	///
	/// let broken = ActorConfig { ac: 0, ..config };
	/// assert!(matches!(Actor::new(broken), Err(Error::Ac(0))));
	/// # Ok::<(), Error>(())
	/// ```
	pub fn new(config: ActorConfig) -> Result<Self, Error> {
		let id = normalize_id(&config.name);
		if id.is_empty() {
			return Err(Error::EmptyId(config.name));
		}
		if config.max_hp <= 0 {
			return Err(Error::MaxHp(config.max_hp));
		}
		if config.ac <= 0 {
			return Err(Error::Ac(config.ac));
		}

		Ok(Self {
			id,
			max_hp: config.max_hp,
			current_hp: config.max_hp,
			ac: config.ac,
			initiative: config.initiative,
			combat_modifiers: config.combat_modifiers,
			attributes: config
				.attributes
				.into_iter()
				.map(|(key, val)| (key.to_lowercase(), val))
				.collect(),
		})
	}

	/// Creates a new actor builder for the given name.
	#[must_use]
	#[inline]
	pub fn builder(name: &str) -> Builder {
		Builder::new(name)
	}

	/// Normalized identifier of the actor.
	#[must_use]
	#[inline]
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Current hit points.
	#[must_use]
	#[inline]
	pub const fn hp(&self) -> i32 {
		self.current_hp
	}

	/// Maximum hit points.
	#[must_use]
	#[inline]
	pub const fn max_hp(&self) -> i32 {
		self.max_hp
	}

	/// Armor class.
	#[must_use]
	#[inline]
	pub const fn ac(&self) -> i32 {
		self.ac
	}

	/// Initiative modifier.
	#[must_use]
	#[inline]
	pub const fn initiative(&self) -> i32 {
		self.initiative
	}

	/// Whether the actor is down to 0 hit points.
	#[must_use]
	#[inline]
	pub const fn is_knocked_out(&self) -> bool {
		self.current_hp == 0
	}

	/// Sets the current hit points.
	///
	/// # Errors
	/// If `hp` is negative or above the max HP, an error variant is returned and nothing changes.
	pub fn set_hp(&mut self, hp: i32) -> Result<(), Error> {
		if !(0..=self.max_hp).contains(&hp) {
			return Err(Error::Hp { hp, max_hp: self.max_hp });
		}
		self.current_hp = hp;
		tracing::debug!(actor = %self.id, hp, "set hp");
		Ok(())
	}

	/// Sets the maximum hit points, lowering the current hit points to match if they're now above it.
	///
	/// # Errors
	/// If `max_hp` isn't above 0, an error variant is returned and nothing changes.
	pub fn set_max_hp(&mut self, max_hp: i32) -> Result<(), Error> {
		if max_hp <= 0 {
			return Err(Error::MaxHp(max_hp));
		}
		self.max_hp = max_hp;
		self.current_hp = self.current_hp.min(max_hp);
		tracing::debug!(actor = %self.id, max_hp, hp = self.current_hp, "set max hp");
		Ok(())
	}

	/// Heals the actor, never going above the max HP.
	pub fn add_hp(&mut self, amount: i32) {
		self.current_hp = self.current_hp.saturating_add(amount).clamp(0, self.max_hp);
		tracing::debug!(actor = %self.id, amount, hp = self.current_hp, "healed");
	}

	/// Damages the actor, never going below 0.
	pub fn sub_hp(&mut self, amount: i32) {
		self.current_hp = self.current_hp.saturating_sub(amount).clamp(0, self.max_hp);
		tracing::debug!(actor = %self.id, amount, hp = self.current_hp, "damaged");
	}

	/// Restores the actor to full hit points.
	pub fn reset_hp(&mut self) {
		self.current_hp = self.max_hp;
		tracing::debug!(actor = %self.id, hp = self.current_hp, "reset hp");
	}

	/// Sets the armor class.
	///
	/// # Errors
	/// If `ac` isn't above 0, an error variant is returned and nothing changes.
	pub fn set_ac(&mut self, ac: i32) -> Result<(), Error> {
		if ac <= 0 {
			return Err(Error::Ac(ac));
		}
		self.ac = ac;
		tracing::debug!(actor = %self.id, ac, "set ac");
		Ok(())
	}

	/// Sets the initiative modifier. Any value is allowed.
	pub fn set_initiative(&mut self, initiative: i32) {
		self.initiative = initiative;
		tracing::debug!(actor = %self.id, initiative, "set initiative");
	}

	/// Gets an attribute value by name, ignoring case.
	#[must_use]
	pub fn attribute(&self, key: &str) -> Option<i32> {
		self.attributes.get(&key.to_lowercase()).copied()
	}

	/// Checks whether the actor has an attribute, ignoring case.
	#[must_use]
	pub fn has_attribute(&self, key: &str) -> bool {
		self.attributes.contains_key(&key.to_lowercase())
	}

	/// Sets an attribute value, replacing any existing value with the same name regardless of case.
	pub fn set_attribute(&mut self, key: &str, value: i32) {
		self.attributes.insert(key.to_lowercase(), value);
	}

	/// Removes an attribute by name, ignoring case, and returns its value if it was present.
	pub fn remove_attribute(&mut self, key: &str) -> Option<i32> {
		self.attributes.remove(&key.to_lowercase())
	}

	/// Gets a copy of all attributes, keyed by lowercased name.
	#[must_use]
	pub fn attributes(&self) -> BTreeMap<String, i32> {
		self.attributes.clone()
	}

	/// Adds a persistent combat modifier. Duplicates are allowed and all of them apply.
	pub fn add_combat_modifier(&mut self, modifier: Modifier) {
		self.combat_modifiers.push(modifier);
	}

	/// Removes every combat modifier with the given reason, ignoring case, and returns how many were removed.
	pub fn remove_combat_modifier(&mut self, reason: &str) -> usize {
		let before = self.combat_modifiers.len();
		self.combat_modifiers.retain(|modifier| !modifier.is_for(reason));
		before.saturating_sub(self.combat_modifiers.len())
	}

	/// Gets a copy of the combat modifiers, in the order they were added.
	#[must_use]
	pub fn combat_modifiers(&self) -> Vec<Modifier> {
		self.combat_modifiers.clone()
	}

	/// Looks up an attribute for a check, failing if it's missing.
	fn skill(&self, skill: &str) -> Result<(String, i32), Error> {
		let key = skill.to_lowercase();
		match self.attributes.get(&key) {
			Some(&value) => Ok((key, value)),
			None => Err(Error::AttributeNotFound(skill.to_string())),
		}
	}

	/// Makes a skill check: a single d20 with the named attribute's value added as a modifier.
	///
	/// # Errors
	/// If the actor doesn't have the attribute, an error variant is returned before anything is rolled.
	pub fn skill_check(
		&self,
		roller: &mut impl Roller,
		skill: &str,
		advantage: Advantage,
	) -> Result<RollOutcome, Error> {
		self.skill_check_with_die(roller, skill, PRIMARY_DIE, advantage)
	}

	/// Makes a skill check with a single die of the given number of faces, for systems that don't use a d20.
	///
	/// # Errors
	/// If the actor doesn't have the attribute, or `faces` is 0, an error variant is returned before anything is
	/// rolled.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::roller::Iter as IterRoller, Actor, Advantage};
	///
	/// let hero = Actor::builder("hero").hp(10).ac(12).attribute("lore", 2).build()?;
	/// let mut rng = IterRoller::new([1, 4]);
	/// let outcome = hero.skill_check_with_die(&mut rng, "LORE", 6, Advantage::Disadvantage)?;
	/// assert_eq!(outcome.dice_rolls, vec![2, 5]);
	/// assert_eq!(outcome.value, 4);
	/// # Ok::<(), dicebag::actor::Error>(())
	/// ```
	pub fn skill_check_with_die(
		&self,
		roller: &mut impl Roller,
		skill: &str,
		faces: u32,
		advantage: Advantage,
	) -> Result<RollOutcome, Error> {
		let (key, value) = self.skill(skill)?;
		let dice = Dice::builder()
			.count(1)
			.faces(faces)
			.modifier(Modifier::new(value, &key))
			.advantage(advantage)
			.build();
		Ok(roller.roll(&dice)?)
	}

	/// Makes an attack roll: a single d20 with all of the actor's combat modifiers added.
	///
	/// # Errors
	/// Only fails if the total could overflow, in which case an error variant is returned before anything is rolled.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::roller::Iter as IterRoller, Actor, Advantage, Modifier};
	///
	/// let fighter = Actor::builder("fighter")
	/// 	.hp(45)
	/// 	.ac(18)
	/// 	.combat_modifier(Modifier::new(3, "Strength"))
	/// 	.combat_modifier(Modifier::new(3, "Proficiency"))
	/// 	.build()?;
	/// let mut rng = IterRoller::new([5]);
	/// let outcome = fighter.attack_roll(&mut rng, Advantage::Normal)?;
	/// assert_eq!(outcome.detail, "Rolled 1d20... values 6; +3 strength, +3 proficiency; *Result: 12*");
	/// # Ok::<(), dicebag::actor::Error>(())
	/// ```
	pub fn attack_roll(&self, roller: &mut impl Roller, advantage: Advantage) -> Result<RollOutcome, Error> {
		self.attack_roll_with_modifiers(roller, advantage, [])
	}

	/// Makes an attack roll with extra situational modifiers, which are added after the actor's combat modifiers.
	///
	/// # Errors
	/// Only fails if the total could overflow, in which case an error variant is returned before anything is rolled.
	pub fn attack_roll_with_modifiers(
		&self,
		roller: &mut impl Roller,
		advantage: Advantage,
		extra: impl IntoIterator<Item = Modifier>,
	) -> Result<RollOutcome, Error> {
		let dice = Dice::builder()
			.count(1)
			.faces(PRIMARY_DIE)
			.modifiers(self.combat_modifiers.iter().cloned())
			.modifiers(extra)
			.advantage(advantage)
			.build();
		Ok(roller.roll(&dice)?)
	}

	/// Makes a percentile roll-under check against the named attribute, with a number of bonus dice (positive `bonus`)
	/// or penalty dice (negative `bonus`). The check succeeds if the roll is at or under the attribute's value.
	///
	/// # Errors
	/// If the actor doesn't have the attribute, an error variant is returned before anything is rolled.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::roller::Iter as IterRoller, Actor};
	///
	/// let investigator = Actor::builder("investigator").hp(12).ac(10).attribute("Spot Hidden", 70).build()?;
	///
	/// // Ones digit 7, then tens candidates 4 and 8: the penalty die keeps the 8.
	/// let mut rng = IterRoller::new([7, 4, 8]);
	/// let check = investigator.percentile_check(&mut rng, "spot hidden", -1)?;
	/// assert_eq!(check.roll.value, 87);
	/// assert!(!check.success);
	/// # Ok::<(), dicebag::actor::Error>(())
	/// ```
	pub fn percentile_check(
		&self,
		roller: &mut impl Roller,
		skill: &str,
		bonus: i32,
	) -> Result<PercentileCheck, Error> {
		let (_, target) = self.skill(skill)?;
		let roll = roller.percentile(bonus);
		Ok(PercentileCheck {
			success: roll.succeeds(target),
			target,
			roll,
		})
	}
}

/// Result of [`Actor::percentile_check()`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct PercentileCheck {
	/// Whether the roll was at or under the target
	pub success: bool,

	/// Attribute value the roll had to meet
	pub target: i32,

	/// The percentile roll itself
	pub roll: Percentile,
}

impl PercentileCheck {
	/// Creates a [`RollOutcome`] describing the roll.
	#[must_use]
	#[inline]
	pub fn outcome(&self) -> RollOutcome {
		self.roll.outcome()
	}
}

/// Normalizes a free-text name into an actor id: lowercased, with every run of characters other than ASCII letters and
/// digits replaced by a single underscore, and leading or trailing underscores trimmed.
///
/// # Examples
/// ```
/// use dicebag::actor::normalize_id;
///
/// assert_eq!(normalize_id("Busta the Black"), "busta_the_black");
/// assert_eq!(normalize_id("Goblin#3"), "goblin_3");
/// assert_eq!(normalize_id("  --Sir  Reginald!!"), "sir_reginald");
/// assert_eq!(normalize_id(&normalize_id("Sir  Reginald")), "sir_reginald");
/// ```
#[must_use]
pub fn normalize_id(name: &str) -> String {
	let mut id = String::with_capacity(name.len());
	let mut pending_sep = false;

	for c in name.chars() {
		if c.is_ascii_alphanumeric() {
			if pending_sep && !id.is_empty() {
				id.push('_');
			}
			pending_sep = false;
			id.push(c.to_ascii_lowercase());
		} else {
			pending_sep = true;
		}
	}

	id
}

/// Error that can occur while creating or using an [`Actor`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The actor's name doesn't contain any letters or digits.
	#[error("actor name \"{0}\" normalizes to an empty id")]
	EmptyId(String),

	/// Max HP must be above 0.
	#[error("max hp must be greater than 0, got {0}")]
	MaxHp(i32),

	/// AC must be above 0.
	#[error("ac must be greater than 0, got {0}")]
	Ac(i32),

	/// Current HP must be within `0..=max_hp`.
	#[error("hp must be between 0 and {max_hp}, got {hp}")]
	Hp {
		/// HP that was attempted
		hp: i32,

		/// Max HP at the time
		max_hp: i32,
	},

	/// The actor doesn't have the attribute a check needs.
	#[error("skill not found: {0}")]
	AttributeNotFound(String),

	/// Rolling dice failed.
	#[error("dice error: {0}")]
	Dice(#[from] DiceError),

	/// Dice notation for a rolled stat couldn't be parsed.
	#[cfg(feature = "parse")]
	#[error("dice notation error: {0}")]
	Parse(#[from] crate::parse::Error),
}
