//! Lookup of combiners by the type of value they produce.

use alloc::boxed::Box;
use core::{
	any::{type_name, Any, TypeId},
	marker::PhantomData,
};
use std::collections::HashMap;

use super::Combiner;
use crate::{
	die::Value,
	error::{Error, Result},
};

/// Combiners for values of type `T`, keyed by the type of value they produce
///
/// # Examples
/// ```
/// use dicebag::{combine::CombinerRegistry, Combiner, Error};
///
/// let mut registry = CombinerRegistry::<i32>::new();
/// registry.register(Combiner::<i32, i32>::sum());
/// registry.register(Combiner::count_where(|val: &i32| *val == 6));
///
/// assert_eq!(registry.get::<i32>()?.reduce([1, 6, 6]), 13);
/// assert_eq!(registry.get::<usize>()?.reduce([1, 6, 6]), 2);
/// assert!(matches!(registry.get::<String>(), Err(Error::CombinerNotFound(..))));
/// # Ok::<(), dicebag::Error>(())
/// ```
#[derive(Debug)]
pub struct CombinerRegistry<T> {
	/// Registered combiners, each a `Combiner<T, V>` keyed by the `TypeId` of its `V`
	combiners: HashMap<TypeId, Box<dyn Any + Send + Sync>>,

	/// Ties the registry to its value type
	_values: PhantomData<fn(T)>,
}

impl<T: Value> CombinerRegistry<T> {
	/// Creates an empty registry.
	#[must_use]
	pub fn new() -> Self {
		Self {
			combiners: HashMap::new(),
			_values: PhantomData,
		}
	}

	/// Registers the combiner for its output type, returning whether it replaced an earlier one.
	pub fn register<V: Value>(&mut self, combiner: Combiner<T, V>) -> bool {
		self.combiners.insert(TypeId::of::<V>(), Box::new(combiner)).is_some()
	}

	/// Gets the combiner producing values of type `V`.
	///
	/// # Errors
	/// If no combiner producing `V` is registered, [`Error::CombinerNotFound`] is returned.
	pub fn get<V: Value>(&self) -> Result<Combiner<T, V>> {
		self.combiners
			.get(&TypeId::of::<V>())
			.and_then(|combiner| combiner.downcast_ref::<Combiner<T, V>>())
			.cloned()
			.ok_or(Error::CombinerNotFound(type_name::<V>()))
	}

	/// Checks whether a combiner producing values of type `V` is registered.
	#[must_use]
	pub fn contains<V: Value>(&self) -> bool {
		self.combiners.contains_key(&TypeId::of::<V>())
	}
}

impl<T: Value> Default for CombinerRegistry<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}
