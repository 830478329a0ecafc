//! Fluent construction of [`Actor`]s.

use alloc::{collections::BTreeMap, string::String, vec::Vec};

use super::{Actor, Error};
use crate::dice::Modifier;
#[cfg(feature = "parse")]
use crate::dice::{roller::Roller, Dice};

/// Everything needed to create an [`Actor`]. Validated by [`Actor::new()`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Meant to be built with struct update syntax")]
pub struct ActorConfig {
	/// Free-text name, normalized into the actor's id
	pub name: String,

	/// Maximum hit points, which the actor also starts with
	pub max_hp: i32,

	/// Armor class
	pub ac: i32,

	/// Initiative modifier
	pub initiative: i32,

	/// Starting attributes (names are lowercased on creation)
	pub attributes: BTreeMap<String, i32>,

	/// Starting combat modifiers
	pub combat_modifiers: Vec<Modifier>,
}

/// Builds an [`Actor`] fluently. Nothing is validated until [`Builder::build()`].
///
/// # Examples
/// ```
/// use dicebag::{Actor, Modifier};
///
/// let ogre = Actor::builder("Ogre")
/// 	.hp(59)
/// 	.ac(11)
/// 	.initiative(-1)
/// 	.attributes([("Strength", 4), ("Athletics", 6)])
/// 	.combat_modifier(Modifier::new(6, "greatclub"))
/// 	.build()?;
///
/// assert_eq!(ogre.max_hp(), 59);
/// assert_eq!(ogre.attribute("STRENGTH"), Some(4));
/// assert_eq!(ogre.combat_modifiers().len(), 1);
/// # Ok::<(), dicebag::actor::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Builder(ActorConfig);

impl Builder {
	/// Creates a new builder for an actor with the given name and no stats.
	#[must_use]
	pub fn new(name: &str) -> Self {
		Self(ActorConfig {
			name: name.into(),
			..ActorConfig::default()
		})
	}

	/// Sets the maximum (and starting) hit points.
	#[must_use]
	pub const fn hp(mut self, max_hp: i32) -> Self {
		self.0.max_hp = max_hp;
		self
	}

	/// Sets the armor class.
	#[must_use]
	pub const fn ac(mut self, ac: i32) -> Self {
		self.0.ac = ac;
		self
	}

	/// Sets the initiative modifier.
	#[must_use]
	pub const fn initiative(mut self, initiative: i32) -> Self {
		self.0.initiative = initiative;
		self
	}

	/// Sets a single attribute.
	#[must_use]
	pub fn attribute(mut self, key: &str, value: i32) -> Self {
		self.0.attributes.insert(key.to_lowercase(), value);
		self
	}

	/// Sets many attributes.
	#[must_use]
	pub fn attributes<'k>(mut self, attributes: impl IntoIterator<Item = (&'k str, i32)>) -> Self {
		self.0
			.attributes
			.extend(attributes.into_iter().map(|(key, val)| (key.to_lowercase(), val)));
		self
	}

	/// Adds a combat modifier.
	#[must_use]
	pub fn combat_modifier(mut self, modifier: Modifier) -> Self {
		self.0.combat_modifiers.push(modifier);
		self
	}

	/// Adds many combat modifiers.
	#[must_use]
	pub fn combat_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
		self.0.combat_modifiers.extend(modifiers);
		self
	}

	/// Rolls dice notation and uses the result as the maximum hit points.
	///
	/// # Errors
	/// If the notation can't be parsed or rolled, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::roller::Iter as IterRoller, Actor};
	///
	/// let mut rng = IterRoller::new([4, 6]);
	/// let goblin = Actor::builder("goblin").rolled_hp(&mut rng, "2d6")?.ac(15).build()?;
	/// assert_eq!(goblin.max_hp(), 12);
	/// # Ok::<(), dicebag::actor::Error>(())
	/// ```
	#[cfg(feature = "parse")]
	pub fn rolled_hp(self, roller: &mut impl Roller, notation: &str) -> Result<Self, Error> {
		let dice: Dice = notation.parse()?;
		let hp = roller.roll(&dice)?.value;
		Ok(self.hp(hp))
	}

	/// Rolls dice notation and uses the result as an attribute value.
	///
	/// # Errors
	/// If the notation can't be parsed or rolled, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::{dice::roller::Max as MaxRoller, Actor};
	///
	/// let hero = Actor::builder("hero")
	/// 	.hp(10)
	/// 	.ac(12)
	/// 	.rolled_attribute(&mut MaxRoller, "Strength", "3d6")?
	/// 	.build()?;
	/// assert_eq!(hero.attribute("strength"), Some(18));
	/// # Ok::<(), dicebag::actor::Error>(())
	/// ```
	#[cfg(feature = "parse")]
	pub fn rolled_attribute(self, roller: &mut impl Roller, key: &str, notation: &str) -> Result<Self, Error> {
		let dice: Dice = notation.parse()?;
		let value = roller.roll(&dice)?.value;
		Ok(self.attribute(key, value))
	}

	/// Gets the configuration built so far.
	#[must_use]
	#[inline]
	pub const fn config(&self) -> &ActorConfig {
		&self.0
	}

	/// Creates the actor.
	///
	/// # Errors
	/// See [`Actor::new()`].
	#[inline]
	pub fn build(self) -> Result<Actor, Error> {
		Actor::new(self.0)
	}
}
