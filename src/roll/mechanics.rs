//! Named rolls, and the registry that game mechanics keep them in.

use alloc::{
	string::{String, ToString},
	sync::Arc,
	vec::Vec,
};
use core::{any::Any, fmt};
use std::collections::HashMap;

use tracing::debug;

use super::{modifier::apply_modifiers, RollModifier, RollResult};
#[cfg(feature = "fastrand")]
use crate::die::roller::FastRand;
use crate::{
	combine::Combiner,
	die::{
		roller::Roller,
		supplier::{DieSupplier, StandardDice},
		DieRef, Value,
	},
	error::{Error, Result},
	pool::Dice,
};

/// Roll with a name: a pool, the combiner for it, and the modifiers applied after every roll of it.
///
/// # Examples
/// ```
/// use dicebag::{
/// 	die::roller::Iter as IterRoller,
/// 	roll::{Condition, DieRoll, RollModifier},
/// 	Combiner, Dice, DieResult, SidedDie,
/// };
///
/// let attack = DieRoll::new(
/// 	"attack",
/// 	Dice::new().with_many(2, SidedDie::numbered(6)?),
/// 	Combiner::sum(),
/// 	vec![RollModifier::reroll(Condition::Eq(1))],
/// );
///
/// let result = attack.roll_with(&mut IterRoller::new([0, 3, 5]))?;
/// assert_eq!(result.member_values(), [6, 4]);
/// assert_eq!(result.value(), 10);
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DieRoll<T, V>
where
	T: Value,
	V: Value,
{
	/// Name of the roll
	name: String,

	/// Dice that get rolled
	pool: Dice<T>,

	/// Combiner for the dice values
	combiner: Combiner<T, V>,

	/// Modifiers applied to every roll, in order
	modifiers: Vec<RollModifier<T, V>>,

	/// Whether results are rerollable
	rerollable: bool,
}

impl<T: Value, V: Value> DieRoll<T, V> {
	/// Creates a named roll producing rerollable results.
	#[must_use]
	pub fn new(
		name: impl Into<String>,
		pool: Dice<T>,
		combiner: Combiner<T, V>,
		modifiers: Vec<RollModifier<T, V>>,
	) -> Self {
		Self {
			name: name.into(),
			pool,
			combiner,
			modifiers,
			rerollable: true,
		}
	}

	/// Sets whether results are rerollable.
	#[must_use]
	pub fn rerollable(mut self, rerollable: bool) -> Self {
		self.rerollable = rerollable;
		self
	}

	/// Gets the name of the roll.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Gets the dice that get rolled.
	#[must_use]
	pub const fn pool(&self) -> &Dice<T> {
		&self.pool
	}

	/// Gets the combiner for the dice values.
	#[must_use]
	pub const fn combiner(&self) -> &Combiner<T, V> {
		&self.combiner
	}

	/// Gets the modifiers applied to every roll.
	#[must_use]
	pub fn modifiers(&self) -> &[RollModifier<T, V>] {
		&self.modifiers
	}

	/// Rolls the dice and applies the roll's modifiers in order.
	///
	/// # Errors
	/// Any error produced by a modifier is returned.
	pub fn roll_with(&self, roller: &mut dyn Roller) -> Result<RollResult<T, V>> {
		self.roll_with_modifiers(&[], roller)
	}

	/// Rolls the dice, applies the roll's own modifiers, then applies some extra ones, all in order.
	///
	/// # Errors
	/// Any error produced by a modifier is returned.
	pub fn roll_with_modifiers(
		&self,
		extra: &[RollModifier<T, V>],
		roller: &mut dyn Roller,
	) -> Result<RollResult<T, V>> {
		let result = RollResult::roll_with(self.pool.clone(), self.combiner.clone(), self.rerollable, roller);
		let result = apply_modifiers(result, &self.modifiers, roller)?;
		apply_modifiers(result, extra, roller)
	}

	/// Rolls with a fresh [`FastRand`] roller. See [`Self::roll_with()`].
	///
	/// # Errors
	/// Any error produced by a modifier is returned.
	#[cfg(feature = "fastrand")]
	pub fn roll(&self) -> Result<RollResult<T, V>> {
		self.roll_with(&mut FastRand::default())
	}
}

/// Registry of named rolls for a game's mechanics, along with the supplier of the dice they're made of.
///
/// Every roll is registered under a unique name along with the type of value it produces, so a roll can only be
/// looked up again as the same type it was created with.
///
/// # Examples
/// ```
/// use dicebag::{die::roller::Max, roll::Mechanics, Combiner, Dice, DieResult, Error};
///
/// let mut mechanics = Mechanics::default();
/// let d6 = mechanics.create_die("6")?;
/// mechanics.create_roll("damage", Dice::of([d6.clone(), d6]), Combiner::<i32, i32>::sum(), Vec::new())?;
///
/// assert_eq!(mechanics.create_roll_result_with::<i32>("damage", &mut Max)?.value(), 12);
/// assert!(matches!(mechanics.roll_named::<usize>("damage"), Err(Error::RollNotFound(..))));
/// assert!(matches!(
/// 	mechanics.create_roll("damage", Dice::new(), Combiner::<i32, i32>::sum(), Vec::new()),
/// 	Err(Error::DuplicateRoll(..))
/// ));
/// # Ok::<(), dicebag::Error>(())
/// ```
pub struct Mechanics<T>
where
	T: Value,
{
	/// Supplier for dice looked up by name
	supplier: Arc<dyn DieSupplier<T> + Send + Sync>,

	/// Registered rolls, each a `DieRoll<T, V>` for the `V` it was created with
	rolls: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl<T: Value> Mechanics<T> {
	/// Creates a registry with no rolls that looks dice up from the given supplier.
	#[must_use]
	pub fn new(supplier: impl DieSupplier<T> + Send + Sync + 'static) -> Self {
		Self {
			supplier: Arc::new(supplier),
			rolls: HashMap::new(),
		}
	}

	/// Creates and registers a named roll.
	///
	/// # Errors
	/// If a roll with the same name is already registered, [`Error::DuplicateRoll`] is returned.
	pub fn create_roll<V: Value>(
		&mut self,
		name: impl Into<String>,
		pool: Dice<T>,
		combiner: Combiner<T, V>,
		modifiers: Vec<RollModifier<T, V>>,
	) -> Result<Arc<DieRoll<T, V>>> {
		self.register(DieRoll::new(name, pool, combiner, modifiers))
	}

	/// Registers an existing roll under its name.
	///
	/// # Errors
	/// If a roll with the same name is already registered, [`Error::DuplicateRoll`] is returned.
	pub fn register<V: Value>(&mut self, roll: DieRoll<T, V>) -> Result<Arc<DieRoll<T, V>>> {
		if self.rolls.contains_key(roll.name()) {
			return Err(Error::DuplicateRoll(roll.name().to_string()));
		}

		debug!(name = roll.name(), dice = roll.pool().len(), "registered roll");
		let roll = Arc::new(roll);
		self.rolls
			.insert(roll.name().to_string(), Arc::clone(&roll) as Arc<dyn Any + Send + Sync>);
		Ok(roll)
	}

	/// Looks up a registered roll producing values of type `V`.
	///
	/// # Errors
	/// If there's no roll with the name, or it produces a different type of value, [`Error::RollNotFound`] is
	/// returned.
	pub fn roll_named<V: Value>(&self, name: &str) -> Result<Arc<DieRoll<T, V>>> {
		self.rolls
			.get(name)
			.and_then(|roll| Arc::clone(roll).downcast::<DieRoll<T, V>>().ok())
			.ok_or_else(|| Error::RollNotFound(name.to_string()))
	}

	/// Checks whether a roll with the name is registered, whatever type of value it produces.
	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.rolls.contains_key(name)
	}

	/// Unregisters a roll, returning whether there was one with the name.
	pub fn remove_roll(&mut self, name: &str) -> bool {
		self.rolls.remove(name).is_some()
	}

	/// Iterates over the names of the registered rolls, in no particular order.
	pub fn roll_names(&self) -> impl Iterator<Item = &str> {
		self.rolls.keys().map(String::as_str)
	}

	/// Gets a die by name from the supplier.
	///
	/// # Errors
	/// Any error from the supplier is returned, [`Error::UnknownDie`] in particular.
	pub fn create_die(&self, name: &str) -> Result<DieRef<T>> {
		self.supplier.die_named(name)
	}

	/// Looks up a registered roll and rolls it.
	///
	/// # Errors
	/// If the roll isn't found, [`Error::RollNotFound`] is returned. Any error produced by one of its modifiers is
	/// returned too.
	pub fn create_roll_result_with<V: Value>(&self, name: &str, roller: &mut dyn Roller) -> Result<RollResult<T, V>> {
		self.roll_named::<V>(name)?.roll_with(roller)
	}

	/// Looks up a registered roll and rolls it with a fresh [`FastRand`] roller.
	///
	/// # Errors
	/// See [`Self::create_roll_result_with()`].
	#[cfg(feature = "fastrand")]
	pub fn create_roll_result<V: Value>(&self, name: &str) -> Result<RollResult<T, V>> {
		self.create_roll_result_with(name, &mut FastRand::default())
	}
}

impl Default for Mechanics<i32> {
	/// Creates a registry with no rolls that supplies the [`StandardDice`].
	fn default() -> Self {
		Self::new(StandardDice)
	}
}

impl<T: Value> fmt::Debug for Mechanics<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Mechanics")
			.field("rolls", &self.rolls.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}
