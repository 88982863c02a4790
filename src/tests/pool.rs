use std::{borrow::Cow, sync::Arc};

use crate::{
	die::roller::{FastRand, Iter as IterRoller, Max as MaxRoller, Val as ValRoller},
	CombinedDie, Combiner, Dice, Die, DieRef, Pool, SidedDie,
};

#[test]
fn of_preserves_order() {
	let members = vec![die(4), die(6), die(8)];
	let dice = Dice::of(members.clone());

	let held = dice.dice().to_vec();
	assert_eq!(held.len(), members.len());
	assert!(held.iter().zip(&members).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn results_follow_pool_order() {
	let dice = Dice::new().with(SidedDie::numbered(4).unwrap()).with(SidedDie::numbered(20).unwrap());
	let results = dice.results_with(&mut MaxRoller);

	assert_eq!(results.iter().map(|result| result.value()).collect::<Vec<_>>(), [4, 20]);
	assert!(results.iter().all(|result| !result.is_rerollable()));
	assert!(results
		.iter()
		.zip(dice.dice())
		.all(|(result, die)| Arc::ptr_eq(result.die(), die)));
}

#[test]
fn rerollable_results_mix_in_snapshots() {
	let dice = Dice::of([die(6), Arc::new(Unrerollable) as DieRef<i32>, die(6)]);
	let results = dice.rerollable_results_with(&mut ValRoller(0));

	assert_eq!(
		results.iter().map(|result| result.is_rerollable()).collect::<Vec<_>>(),
		[true, false, true]
	);
	assert_eq!(results[0].reroll_with(&mut MaxRoller), Ok(6));
	assert!(results[1].reroll_with(&mut MaxRoller).is_err());
}

#[test]
fn combined_sides_are_every_combination() {
	let combined = CombinedDie::new(
		Dice::of([sided(&[1, 2]), sided(&[1, 2, 3])]),
		Combiner::sum(),
	);
	assert_eq!(combined.sides().as_ref(), [2, 3, 4, 3, 4, 5]);
	assert_eq!(combined.side_count(), 6);
	assert_eq!(combined.tuples(), [[1, 1], [1, 2], [1, 3], [2, 1], [2, 2], [2, 3]]);
}

#[test]
fn combined_sides_keep_duplicates() {
	let combined = CombinedDie::new(Dice::new().with_many(3, SidedDie::named("C").unwrap()), Combiner::sum());
	let sides = combined.sides();
	assert_eq!(sides.len(), 8);
	assert_eq!(sides.iter().filter(|&&side| side == 1).count(), 3);
}

#[test]
fn combined_die_with_no_members() {
	let combined = CombinedDie::new(Dice::new(), Combiner::<i32, i32>::sum());
	assert_eq!(combined.sides().as_ref(), [0]);
	assert_eq!(combined.tuples(), [Vec::<i32>::new()]);
	assert_eq!(combined.roll_with(&mut MaxRoller), 0);
}

#[test]
fn combined_rolls_stay_within_sides() {
	let combined = CombinedDie::new(
		Dice::of([die(6), die(6), sided(&[-1, 0, 1])]),
		Combiner::sum(),
	);
	let sides = combined.sides();
	let mut roller = FastRand::with_seed(0xfeed);
	for _ in 0..500 {
		assert!(sides.contains(&combined.roll_with(&mut roller)));
	}
}

#[test]
fn combined_roll_feeds_pool_order() {
	let combined = CombinedDie::new(Dice::of([die(6), die(6), die(6)]), Combiner::collect());
	assert_eq!(combined.roll_with(&mut IterRoller::new([5, 0, 2])), [6, 1, 3]);
}

#[test]
fn pools_of_pools() {
	let pair = CombinedDie::new(Dice::of([die(2), die(2)]), Combiner::<i32, i32>::sum()).into_ref();
	let outer = CombinedDie::new(Dice::of([Arc::clone(&pair), pair]), Combiner::max());

	let sides = outer.sides();
	assert_eq!(sides.len(), 16);
	assert_eq!(sides.iter().filter(|side| **side == Some(4)).count(), 7);
	assert_eq!(outer.roll_with(&mut MaxRoller), Some(4));
}

#[test]
fn combination_counts() {
	let dice = Dice::new().with_many(3, SidedDie::numbered(6).unwrap());
	assert_eq!(dice.combination_count(), Some(216));

	let huge = Dice::new().with_many(40, SidedDie::numbered(100).unwrap());
	assert_eq!(huge.combination_count(), None);
	let combined = CombinedDie::new(huge, Combiner::<i32, i32>::sum());
	assert_eq!(combined.side_count(), usize::MAX);
}

#[test]
fn dice_display() {
	let dice = Dice::of([sided(&[1, 2]), sided(&[-1, 0, 1])]);
	assert_eq!(dice.to_string(), "d[1,2]+d[-1,0,1]");
	assert_eq!(Dice::<i32>::new().to_string(), "");
}

#[test]
fn pool_of_pools_display() {
	let d10 = "d[1,2,3,4,5,6,7,8,9,10]";
	let tens = CombinedDie::new(Dice::new().with_many(10, SidedDie::numbered(10).unwrap()), Combiner::<i32, i32>::sum());
	let dice = Dice::new().with(tens).with(SidedDie::numbered(4).unwrap());
	assert_eq!(dice.to_string(), format!("({})+d[1,2,3,4]", [d10; 10].join("+")));
}

#[test]
fn nested_combined_summary() {
	let pair = CombinedDie::new(Dice::of([sided(&[1, 2]), sided(&[1, 2])]), Combiner::<i32, i32>::sum()).into_ref();
	let outer = CombinedDie::new(Dice::of([pair, sided(&[1, 2, 3])]), Combiner::max());
	assert_eq!(outer.summary().as_deref(), Some("((d[1,2]+d[1,2])+d[1,2,3])"));
	assert_eq!(outer.to_string(), "(d[1,2]+d[1,2])+d[1,2,3]");
	assert_eq!(SidedDie::numbered(3).unwrap().summary(), None);
}

fn die(sides: i32) -> DieRef<i32> {
	SidedDie::numbered(sides).unwrap().into_ref()
}

fn sided(sides: &[i32]) -> DieRef<i32> {
	SidedDie::new(sides.iter().copied()).unwrap().into_ref()
}

/// Die that always rolls a 3 and can't be rerolled
#[derive(Debug)]
struct Unrerollable;

impl Die<i32> for Unrerollable {
	fn sides(&self) -> Cow<'_, [i32]> {
		Cow::Borrowed(&[3])
	}

	fn supports_reroll(&self) -> bool {
		false
	}
}
