use chumsky::Parser;

use crate::{parse, Dice, Die, Error, ErrorKind, Pool, SidedDie};

#[test]
fn basic_die() {
	let die = parse::die().parse("d6").into_result().unwrap();
	assert_eq!(die.sides().as_ref(), [1, 2, 3, 4, 5, 6]);
}

#[test]
fn bare_side_count() {
	let die = parse::die().parse("12").into_result().unwrap();
	assert_eq!(die.side_count(), 12);
}

#[test]
fn negative_die() {
	let die = parse::die().parse("d-3").into_result().unwrap();
	assert_eq!(die.sides().as_ref(), [-1, -2, -3]);
}

#[test]
fn preset_dice() {
	assert_eq!("dF".parse::<SidedDie<i32>>().unwrap().sides().as_ref(), [-1, 0, 1]);
	assert_eq!("df".parse::<SidedDie<i32>>().unwrap().sides().as_ref(), [-1, 0, 1]);
	assert_eq!("dC".parse::<SidedDie<i32>>().unwrap().sides().as_ref(), [0, 1]);
	assert_eq!("dSuite".parse::<SidedDie<i32>>().unwrap().sides().as_ref(), [0, 1, 2, 4]);
}

#[test]
fn surrounding_whitespace() {
	assert_eq!(" d8 ".parse::<SidedDie<i32>>().unwrap().side_count(), 8);
}

#[test]
fn invalid_dice() {
	for notation in ["", "d", "d0", "dx", "6d", "d6d6", "d99999999999", "d2000000000", "d65536", "d-65536"] {
		let err = notation.parse::<SidedDie<i32>>().unwrap_err();
		assert!(matches!(err, Error::Parse(..)), "{notation:?} gave {err:?}");
		assert_eq!(err.kind(), ErrorKind::InvalidConstruction);
	}
}

#[test]
fn pool_with_counts() {
	let dice: Dice<i32> = "3d6".parse().unwrap();
	assert_eq!(dice.len(), 3);
	assert!(dice.dice().iter().all(|die| die.side_count() == 6));
}

#[test]
fn largest_counts() {
	let dice: Dice<i32> = "255d2".parse().unwrap();
	assert_eq!(dice.len(), 255);

	let die: SidedDie<i32> = "d65535".parse().unwrap();
	assert_eq!(die.side_count(), 65535);
	assert_eq!("d-65535".parse::<SidedDie<i32>>().unwrap().sides().last(), Some(&-65535));
}

#[test]
fn mixed_pool() {
	let dice: Dice<i32> = "2d6 + dF + d4".parse().unwrap();
	let sides = dice.dice().iter().map(|die| die.sides().into_owned()).collect::<Vec<_>>();
	assert_eq!(
		sides,
		[
			vec![1, 2, 3, 4, 5, 6],
			vec![1, 2, 3, 4, 5, 6],
			vec![-1, 0, 1],
			vec![1, 2, 3, 4]
		]
	);
}

#[test]
fn pool_parser_without_spaces() {
	let dice = parse::dice().parse("d20+d4+dc").into_result().unwrap();
	assert_eq!(
		dice.dice().iter().map(|die| die.side_count()).collect::<Vec<_>>(),
		[20, 4, 2]
	);
}

#[test]
fn invalid_pools() {
	for notation in ["", "+d6", "d6+", "2d", "d6 d6", "3x6", "99999999999999d6", "256d6", "d2000000000", "2d6+1000d4"] {
		assert!(
			matches!(notation.parse::<Dice<i32>>(), Err(Error::Parse(..))),
			"{notation:?} parsed"
		);
	}
}
