use crate::dice::{
	roller::{Iter as IterRoller, Max as MaxRoller, Roller},
	percentile::MAX_EXTRA_DICE,
	Percentile,
};

#[test]
fn digits_combine() {
	assert_eq!(Percentile::new(0, vec![2], 7).value, 27);
	assert_eq!(Percentile::new(0, vec![5], 0).value, 50);
	assert_eq!(Percentile::new(0, vec![0], 3).value, 3);
	assert_eq!(Percentile::new(0, vec![9], 9).value, 99);
}

#[test]
fn double_zero_is_hundred() {
	let roll = Percentile::new(0, vec![0], 0);
	assert_eq!(roll.value, 100);
	assert!(roll.succeeds(100));
	assert!(!roll.succeeds(99));
}

#[test]
fn target_boundary() {
	let roll = Percentile::new(0, vec![4], 5);
	assert!(roll.succeeds(45));
	assert!(roll.succeeds(46));
	assert!(!roll.succeeds(44));
	assert!(!roll.succeeds(0));
	assert!(!roll.succeeds(-10));
}

#[test]
fn target_of_hundred_always_succeeds() {
	for tens in 0..10 {
		for ones in 0..10 {
			assert!(Percentile::new(0, vec![tens], ones).succeeds(100));
		}
	}
}

#[test]
fn bonus_dice_keep_lowest_tens() {
	let roll = Percentile::new(2, vec![7, 3, 5], 1);
	assert_eq!(roll.kept, 1);
	assert_eq!(roll.value, 31);
}

#[test]
fn penalty_dice_keep_highest_tens() {
	let roll = Percentile::new(-1, vec![2, 6], 4);
	assert_eq!(roll.kept, 1);
	assert_eq!(roll.value, 64);
}

#[test]
fn bonus_can_reach_hundred_only_through_zero_tens() {
	// A bonus die that keeps a zero tens digit alongside a zero ones digit is still a 100.
	let roll = Percentile::new(1, vec![0, 4], 0);
	assert_eq!(roll.kept, 0);
	assert_eq!(roll.value, 100);
}

#[test]
fn draws_ones_then_every_tens_candidate() {
	let mut rng = IterRoller::new([3, 9, 1, 4]);
	let roll = rng.percentile(2);
	assert_eq!(roll.ones, 3);
	assert_eq!(roll.tens, vec![9, 1, 4]);
	assert_eq!(roll.value, 13);
	assert!(!rng.can_roll());

	let mut rng = IterRoller::new([3, 9, 1, 4, 2]);
	let roll = rng.percentile(-3);
	assert_eq!(roll.tens, vec![9, 1, 4, 2]);
	assert_eq!(roll.value, 93);
	assert!(!rng.can_roll());
}

#[test]
fn max_roller_percentile() {
	assert_eq!(MaxRoller.percentile(0).value, 99);
	assert_eq!(MaxRoller.percentile(3).value, 99);
	assert_eq!(MaxRoller.percentile(-3).tens.len(), 4);
}

#[test]
fn extra_dice_are_capped() {
	let roll = MaxRoller.percentile(i32::MIN);
	assert_eq!(roll.bonus, -MAX_EXTRA_DICE);
	assert_eq!(roll.tens.len(), 1 + MAX_EXTRA_DICE as usize);

	let roll = MaxRoller.percentile(i32::MAX);
	assert_eq!(roll.bonus, MAX_EXTRA_DICE);
	assert_eq!(roll.value, 99);

	let mut rng = IterRoller::new([1; 13]);
	assert_eq!(rng.percentile(MAX_EXTRA_DICE + 5).tens.len(), 11);
	assert!(rng.can_roll());
}

#[test]
fn outcome_detail() {
	let roll = Percentile::new(0, vec![0], 0);
	assert_eq!(roll.outcome().detail, "Rolled 1d100... values 100; *Result: 100*");
	assert_eq!(roll.outcome().value, 100);
}

#[cfg(feature = "fastrand")]
#[test]
fn bonus_dice_raise_success_rate() {
	use crate::dice::roller::FastRand as FastRandRoller;

	const TRIALS: usize = 4000;
	let mut roller = FastRandRoller::with_seed(0xd100);

	let rates = (-2..=2)
		.map(|bonus| {
			(0..TRIALS)
				.filter(|_| {
					let roll = roller.percentile(bonus);
					assert!((1..=100).contains(&roll.value));
					roll.succeeds(50)
				})
				.count()
		})
		.collect::<Vec<_>>();

	assert!(rates.windows(2).all(|pair| pair[0] < pair[1]), "rates not increasing: {rates:?}");
}
