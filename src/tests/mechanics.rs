use std::sync::Arc;

use crate::{
	die::{
		result::{ResultRef, Snapshot},
		roller::{Iter as IterRoller, Max as MaxRoller},
		supplier::StandardDice,
	},
	roll::{apply_modifiers, Condition, DieRoll, Mechanics, RollModifier},
	Combiner, Dice, DieResult, Error, ErrorKind, RollResult, SidedDie,
};

#[test]
fn named_rolls_register_once() {
	let mut mechanics = Mechanics::new(StandardDice);
	let roll = mechanics
		.create_roll("check", pool("20"), Combiner::<i32, i32>::sum(), Vec::new())
		.unwrap();
	assert_eq!(roll.name(), "check");
	assert!(mechanics.contains("check"));

	let err = mechanics
		.create_roll("check", pool("6"), Combiner::<i32, i32>::sum(), Vec::new())
		.unwrap_err();
	assert_eq!(err, Error::DuplicateRoll("check".to_owned()));
	assert_eq!(err.kind(), ErrorKind::Configuration);
	assert_eq!(mechanics.roll_named::<i32>("check").unwrap().pool().len(), 1);
}

#[test]
fn lookup_is_typed() {
	let mut mechanics = Mechanics::default();
	mechanics
		.create_roll("successes", pool("6"), Combiner::count_where(|val: &i32| *val == 6), Vec::new())
		.unwrap();

	assert!(mechanics.roll_named::<usize>("successes").is_ok());
	let err = mechanics.roll_named::<i32>("successes").unwrap_err();
	assert_eq!(err, Error::RollNotFound("successes".to_owned()));
	assert_eq!(err.kind(), ErrorKind::NotFound);
	assert!(matches!(mechanics.roll_named::<usize>("missing"), Err(Error::RollNotFound(..))));
}

#[test]
fn rolling_by_name() {
	let mut mechanics = Mechanics::default();
	let d6 = mechanics.create_die("6").unwrap();
	mechanics
		.create_roll(
			"damage",
			Dice::of([Arc::clone(&d6), d6]),
			Combiner::<i32, i32>::sum(),
			vec![RollModifier::reroll(Condition::Lte(2))],
		)
		.unwrap();

	let result = mechanics
		.create_roll_result_with::<i32>("damage", &mut IterRoller::new([1, 4, 3]))
		.unwrap();
	assert_eq!(result.member_values(), [4, 5]);
	assert_eq!(result.value(), 9);

	assert!(mechanics.remove_roll("damage"));
	assert!(!mechanics.remove_roll("damage"));
	assert!(matches!(
		mechanics.create_roll_result_with::<i32>("damage", &mut MaxRoller),
		Err(Error::RollNotFound(..))
	));
}

#[test]
fn unknown_die_names() {
	let mechanics = Mechanics::default();
	assert!(matches!(mechanics.create_die("d6"), Err(Error::UnknownDie(..))));
	assert_eq!(mechanics.create_die("C").unwrap().side_count(), 2);
}

#[test]
fn modifiers_apply_in_order() {
	let result = RollResult::roll_with(pool("4"), Combiner::collect(), false, &mut MaxRoller);
	let modifiers = [append(1), append(2), append(3)];

	let result = apply_modifiers(result, &modifiers, &mut MaxRoller).unwrap();
	assert_eq!(result.value(), [4, 1, 2, 3]);
	assert_eq!(result.pool().len(), 4);
}

#[test]
fn failing_modifier_stops_the_fold() {
	let fail = RollModifier::named("fail", |_result, _roller| Err(Error::MissingCombiner));
	let result = RollResult::roll_with(pool("4"), Combiner::collect(), false, &mut MaxRoller);
	let err = apply_modifiers(result, &[append(1), fail, append(2)], &mut MaxRoller).unwrap_err();
	assert_eq!(err, Error::MissingCombiner);
}

#[test]
fn roll_modifiers_then_extras() {
	let roll = DieRoll::new("tagged", pool("4"), Combiner::collect(), vec![append(1)]);
	assert_eq!(roll.modifiers().len(), 1);
	assert_eq!(roll.modifiers()[0].name(), Some("append 1"));

	let result = roll.roll_with_modifiers(&[append(2)], &mut MaxRoller).unwrap();
	assert_eq!(result.value(), [4, 1, 2]);
	assert_eq!(roll.roll_with(&mut MaxRoller).unwrap().value(), [4, 1]);
}

#[test]
fn identity_modifier() {
	let identity = RollModifier::<i32, i32>::identity();
	assert_eq!(identity.name(), Some("identity"));

	let result = RollResult::roll_with(pool("8"), Combiner::sum(), false, &mut MaxRoller);
	assert_eq!(identity.apply(result, &mut MaxRoller).unwrap().value(), 8);
}

#[test]
fn reroll_modifier_leaves_snapshots() {
	let reroll = RollModifier::reroll(Condition::Eq(1));
	assert_eq!(reroll.name(), Some("r=1"));

	let result = RollResult::roll_with(pool("6"), Combiner::<i32, i32>::sum(), false, &mut IterRoller::new([0]));
	let result = reroll.apply(result, &mut MaxRoller).unwrap();
	assert_eq!(result.value(), 1);
}

#[test]
fn conditions() {
	assert_eq!(Condition::from_symbol_and_val("<=", 2).unwrap(), Condition::Lte(2));
	assert!(Condition::Gt(3).check(&4));
	assert!(!Condition::Gt(3).check(&3));
	assert!(Condition::Eq('x').check(&'x'));
	assert_eq!(Condition::Gte(5).to_string(), ">=5");

	let err = Condition::from_symbol_and_val("~", 1).unwrap_err();
	assert_eq!(err, Error::UnknownCondition("~".to_owned()));
	assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// Builds a pool of a single standard die.
fn pool(name: &str) -> Dice<i32> {
	Dice::new().with(SidedDie::named(name).unwrap())
}

/// Builds a modifier that adds a die fixed to `value` to the end of the pool, along with its result.
fn append(value: i32) -> RollModifier<i32, Vec<i32>> {
	RollModifier::named(format!("append {value}"), move |result: RollResult<i32, Vec<i32>>, _roller| {
		let die = SidedDie::fixed(value).into_ref();
		let mut pool = result.pool().clone();
		pool.push(Arc::clone(&die));
		let mut members = result.members().to_vec();
		members.push(Arc::new(Snapshot::new(die, value)) as ResultRef<i32>);
		Ok(RollResult::from_members(pool, result.combiner().clone(), members, result.is_rerollable()))
	})
}
