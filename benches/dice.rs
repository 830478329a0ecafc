#![feature(test)]

extern crate test;

use test::Bencher;

use dicebag::{
	dice::roller::{FastRand, Roller},
	Actor, Advantage, Dice, Modifier,
};

#[bench]
fn roll_1d20(b: &mut Bencher) {
	let dice = Dice::default();
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).unwrap());
}

#[bench]
fn roll_1d20_advantage(b: &mut Bencher) {
	let dice = Dice::builder()
		.modifiers([Modifier::new(3, "strength"), Modifier::new(2, "proficiency")])
		.advantage(Advantage::Advantage)
		.build();
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).unwrap());
}

#[bench]
fn roll_100d20(b: &mut Bencher) {
	let dice = Dice::new(100, 20);
	let mut rng = FastRand::default();
	b.iter(|| rng.roll(&dice).unwrap());
}

#[bench]
fn percentile_two_penalty_dice(b: &mut Bencher) {
	let mut rng = FastRand::default();
	b.iter(|| rng.percentile(-2));
}

#[bench]
fn actor_attack_roll(b: &mut Bencher) {
	let actor = Actor::builder("bench")
		.hp(50)
		.ac(15)
		.combat_modifiers([Modifier::new(4, "strength"), Modifier::new(3, "proficiency")])
		.build()
		.unwrap();
	let mut rng = FastRand::default();
	b.iter(|| actor.attack_roll(&mut rng, Advantage::Normal).unwrap());
}
