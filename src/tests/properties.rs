use proptest::prelude::*;

use crate::{
	actor::{normalize_id, Actor},
	dice::{
		roller::{Iter as IterRoller, Roller},
		Advantage, Dice, Modifier, Percentile,
	},
};

fn advantage() -> impl Strategy<Value = Advantage> {
	prop_oneof![
		Just(Advantage::Normal),
		Just(Advantage::Advantage),
		Just(Advantage::Disadvantage),
	]
}

proptest! {
	#[test]
	fn value_is_kept_dice_plus_modifiers(
		count in 1_u32..20,
		faces in 1_u32..100,
		raw in prop::collection::vec(any::<u32>(), 40),
		mods in prop::collection::vec(-50_i32..50, 0..4),
		advantage in advantage(),
	) {
		let dice = Dice::builder()
			.count(count)
			.faces(faces)
			.modifiers(mods.iter().map(|&val| Modifier::unlabeled(val)))
			.advantage(advantage)
			.build();
		let mut rng = IterRoller::new(raw.iter().map(|val| val % faces));
		let rolled = rng.roll_raw(&dice).unwrap();

		let per_die = if advantage == Advantage::Normal { 1 } else { 2 };
		prop_assert_eq!(rolled.rolls.len(), count as usize * per_die);
		prop_assert!(rolled.rolls.iter().all(|roll| (1..=faces).contains(&roll.val)));

		let kept = rolled.rolls.iter().filter(|roll| roll.is_kept()).map(|roll| i64::from(roll.val)).sum::<i64>();
		let expected = kept + mods.iter().copied().map(i64::from).sum::<i64>();
		prop_assert_eq!(i64::from(rolled.total().unwrap()), expected);
	}

	#[test]
	fn advantage_keeps_the_better_die(first in 0_u32..20, second in 0_u32..20, advantage in advantage()) {
		let dice = Dice::builder().advantage(advantage).build();
		let outcome = IterRoller::new([first, second]).roll(&dice).unwrap();
		let expected = match advantage {
			Advantage::Normal => first + 1,
			Advantage::Advantage => first.max(second) + 1,
			Advantage::Disadvantage => first.min(second) + 1,
		};
		prop_assert_eq!(outcome.value, i32::try_from(expected).unwrap());
	}

	#[test]
	fn percentile_stays_in_range(bonus in -3_i32..=3, ones in 0_u32..10, tens in prop::collection::vec(0_u32..10, 4)) {
		let tens = tens[..=bonus.unsigned_abs() as usize].to_vec();
		let roll = Percentile::new(bonus, tens.clone(), ones);
		prop_assert!((1..=100).contains(&roll.value));
		prop_assert!(roll.succeeds(100));

		let kept = tens[roll.kept];
		if bonus > 0 {
			prop_assert_eq!(Some(&kept), tens.iter().min());
		} else if bonus < 0 {
			prop_assert_eq!(Some(&kept), tens.iter().max());
		}
	}

	#[test]
	fn ids_are_idempotent_and_clean(name in "\\PC{0,40}") {
		let id = normalize_id(&name);
		prop_assert_eq!(normalize_id(&id), id.clone());
		prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
		prop_assert!(!id.starts_with('_') && !id.ends_with('_'));
		prop_assert!(!id.contains("__"));
	}

	#[test]
	fn hp_stays_within_bounds(max_hp in 1_i32..500, changes in prop::collection::vec(-1000_i32..1000, 0..30)) {
		let mut actor = Actor::builder("target").hp(max_hp).ac(10).build().unwrap();
		for change in changes {
			if change >= 0 {
				actor.add_hp(change);
			} else {
				actor.sub_hp(-change);
			}
			prop_assert!((0..=actor.max_hp()).contains(&actor.hp()));
			prop_assert_eq!(actor.is_knocked_out(), actor.hp() == 0);
		}
	}
}

#[cfg(feature = "fastrand")]
proptest! {
	#[test]
	fn same_seed_same_session(seed in any::<u64>(), count in 1_u32..10, faces in 1_u32..100, advantage in advantage()) {
		use crate::dice::roller::FastRand as FastRandRoller;

		let dice = Dice::builder().count(count).faces(faces).advantage(advantage).build();
		let mut first = FastRandRoller::with_seed(seed);
		let mut second = FastRandRoller::with_seed(seed);
		for _ in 0..10 {
			let outcome = first.roll(&dice).unwrap();
			prop_assert!(outcome.dice_rolls.iter().all(|val| (1..=faces).contains(val)));
			prop_assert_eq!(outcome, second.roll(&dice).unwrap());
			prop_assert_eq!(first.percentile(-1), second.percentile(-1));
		}
	}
}

#[cfg(feature = "parse")]
proptest! {
	#[test]
	fn notation_parses(count in 1_u32..1000, faces in 1_u32..1000, modifier in proptest::option::of(-1000_i32..1000)) {
		let notation = match modifier {
			Some(val) => format!("{count}d{faces}{val:+}"),
			None => format!("{count}d{faces}"),
		};
		let dice: Dice = notation.parse().unwrap();
		prop_assert_eq!(dice.count, count);
		prop_assert_eq!(dice.faces, faces);
		prop_assert_eq!(dice.modifiers.first().map(Modifier::value), modifier);
		prop_assert_eq!(dice.to_string(), notation);
	}
}
