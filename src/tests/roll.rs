use std::{borrow::Cow, sync::Arc};

use crate::{
	die::roller::{FastRand, Iter as IterRoller, Max as MaxRoller, Val as ValRoller},
	roll::{Describe, RollResultFactory},
	CombinedDie, Combiner, Dice, Die, DieRef, DieResult, Error, ErrorKind, Pool, RollResult, SidedDie,
};

#[test]
fn value_combines_members() {
	let result = RollResult::roll_with(pool(&[6, 8]), Combiner::sum(), false, &mut IterRoller::new([2, 6]));
	assert_eq!(result.member_values(), [3, 7]);
	assert_eq!(result.value(), 10);
	assert_eq!(result.members().len(), 2);
}

#[test]
fn value_tracks_member_rerolls() {
	let mut roller = IterRoller::new([0, 0, 5]);
	let result = RollResult::roll_with(pool(&[6, 6]), Combiner::sum(), true, &mut roller);
	assert_eq!(result.value(), 2);

	result.members()[0].reroll_with(&mut roller).unwrap();
	assert_eq!(result.member_values(), [6, 1]);
	assert_eq!(result.value(), 7);
}

#[test]
fn rerolling_whole_result() {
	let result = RollResult::roll_with(pool(&[6, 6, 6]), Combiner::sum(), true, &mut ValRoller(0));
	assert!(result.is_rerollable());
	assert_eq!(result.value(), 3);

	assert_eq!(result.reroll_with(&mut IterRoller::new([1, 2, 3])), Ok(9));
	assert_eq!(result.member_values(), [2, 3, 4]);
}

#[test]
fn rerolling_skips_snapshot_members() {
	let dice = Dice::of([die(6), Arc::new(Stuck(2)) as DieRef<i32>]);
	let result = RollResult::roll_with(dice, Combiner::sum(), true, &mut ValRoller(0));
	assert_eq!(result.value(), 3);

	assert_eq!(result.reroll_with(&mut MaxRoller), Ok(8));
	assert_eq!(result.member_values(), [6, 2]);
}

#[test]
fn snapshot_results_refuse_reroll() {
	let result = RollResult::roll_with(pool(&[4, 4]), Combiner::sum(), false, &mut MaxRoller);
	assert!(!result.is_rerollable());
	assert!(result.members().iter().all(|member| !member.is_rerollable()));

	let err = result.reroll_with(&mut ValRoller(0)).unwrap_err();
	assert_eq!(err, Error::RerollUnsupported);
	assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
	assert_eq!(result.value(), 8);
}

#[test]
fn result_die_is_combined_pool() {
	let result = RollResult::roll_with(pool(&[2, 3]), Combiner::sum(), false, &mut MaxRoller);
	assert_eq!(result.die().sides().as_ref(), [2, 3, 4, 3, 4, 5]);
	assert_eq!(result.pool().len(), 2);
	assert_eq!(result.combiner().reduce([1, 1]), 2);

	let combined = result.to_combined_die();
	assert_eq!(combined.sides(), result.die().sides());
	assert!(combined.dice().iter().zip(result.pool().dice()).all(|(a, b)| Arc::ptr_eq(a, b)));
}

#[test]
fn result_in_another_pool() {
	let inner = RollResult::roll_with(pool(&[4, 4]), Combiner::sum(), false, &mut MaxRoller);
	let outer = Dice::new().with(inner.to_combined_die()).with(SidedDie::numbered(6).unwrap());
	let result = outer.roll_through(Combiner::sum(), false, &mut MaxRoller);
	assert_eq!(result.value(), 14);
}

#[test]
fn description() {
	let result = RollResult::roll_with(pool(&[2, 3]), Combiner::sum(), false, &mut IterRoller::new([1, 2]));
	assert_eq!(result.describe(None), "d[1,2]+d[1,2,3][2, 3]");
	assert_eq!(result.describe(Some(1)), "d[1,2]+d[1,2,3][2, 1 more...]");
	assert_eq!(result.to_string(), "d[1,2]+d[1,2,3][2, 3] = 5");
}

#[test]
fn description_of_pool_of_pools() {
	let tens = CombinedDie::new(Dice::new().with_many(10, SidedDie::numbered(10).unwrap()), Combiner::sum());
	let dice = Dice::new().with(tens).with(SidedDie::numbered(4).unwrap());
	let result = RollResult::roll_with(dice, Combiner::sum(), false, &mut MaxRoller);

	let d10s = ["d[1,2,3,4,5,6,7,8,9,10]"; 10].join("+");
	assert_eq!(result.describe(None), format!("({d10s})+d[1,2,3,4][100, 4]"));
	assert_eq!(result.to_string(), format!("({d10s})+d[1,2,3,4][100, 4] = 104"));
}

#[test]
fn random_results_stay_in_range() {
	let mut roller = FastRand::with_seed(7);
	for _ in 0..200 {
		let result = RollResult::roll_with(pool(&[6, 6, 6]), Combiner::sum(), true, &mut roller);
		assert!((3..=18).contains(&result.value()));
		assert!((3..=18).contains(&result.reroll_with(&mut roller).unwrap()));
	}
}

#[test]
fn factory_requires_combiner() {
	let factory = RollResultFactory::<i32, i32>::default();
	let err = factory.create_result_with(pool(&[6]), &mut MaxRoller).unwrap_err();
	assert_eq!(err, Error::MissingCombiner);
	assert_eq!(err.kind(), ErrorKind::Configuration);

	let result = factory.create_result_using(pool(&[6]), Combiner::sum(), &mut MaxRoller);
	assert_eq!(result.value(), 6);
}

#[test]
fn factory_uses_configured_combiner() {
	let factory = RollResultFactory::new()
		.with_combiner(Combiner::count_where(|val: &i32| *val >= 5))
		.rerollable(false);
	let result = factory
		.create_result_with(pool(&[6, 6, 6]), &mut IterRoller::new([5, 1, 4]))
		.unwrap();
	assert_eq!(result.value(), 2);
	assert!(!result.is_rerollable());
}

fn die(sides: i32) -> DieRef<i32> {
	SidedDie::numbered(sides).unwrap().into_ref()
}

fn pool(sides: &[i32]) -> Dice<i32> {
	sides.iter().map(|&count| die(count)).collect()
}

/// Die that is stuck on a single value and can't be rerolled
#[derive(Debug)]
struct Stuck(i32);

impl Die<i32> for Stuck {
	fn sides(&self) -> Cow<'_, [i32]> {
		Cow::Owned(vec![self.0])
	}

	fn supports_reroll(&self) -> bool {
		false
	}
}
