//! Cartesian products of side lists.
//!
//! Products are always produced in lexicographic order: the first list varies slowest and the last list fastest, so
//! the product of `[a, b]` and `[x, y, z]` is `ax, ay, az, bx, by, bz`. Their length is the product of the lists'
//! lengths, which grows quickly; nothing here bounds it.

use alloc::{borrow::Cow, vec, vec::Vec};

use itertools::Itertools;

use super::Reducer;

/// Builds every combination of one value from each list.
///
/// An empty slice of lists has exactly one combination, which is empty. If any list is empty, there are none.
///
/// # Examples
/// ```
/// use dicebag::combine::product::cartesian;
///
/// assert_eq!(
/// 	cartesian(&[vec!['a', 'b'], vec!['x', 'y', 'z']]),
/// 	[['a', 'x'], ['a', 'y'], ['a', 'z'], ['b', 'x'], ['b', 'y'], ['b', 'z']],
/// );
/// assert_eq!(cartesian::<u8, Vec<u8>>(&[]), [Vec::<u8>::new()]);
/// assert!(cartesian(&[vec![1, 2], Vec::new()]).is_empty());
/// ```
#[must_use]
pub fn cartesian<T: Clone, L: AsRef<[T]>>(lists: &[L]) -> Vec<Vec<T>> {
	if lists.is_empty() {
		return vec![Vec::new()];
	}

	lists
		.iter()
		.map(|list| list.as_ref().iter().cloned())
		.multi_cartesian_product()
		.collect()
}

/// Counts the combinations [`cartesian()`] would build for lists of the given lengths, or `None` if the count doesn't
/// fit in a `usize`.
///
/// # Examples
/// ```
/// use dicebag::combine::product::count;
///
/// assert_eq!(count([2, 3, 4]), Some(24));
/// assert_eq!(count([]), Some(1));
/// assert_eq!(count([usize::MAX, 2]), None);
/// ```
#[must_use]
pub fn count(lens: impl IntoIterator<Item = usize>) -> Option<usize> {
	lens.into_iter().try_fold(1_usize, usize::checked_mul)
}

/// Builds one accumulator per combination of one value from each list, in lexicographic order.
///
/// The lists are split in half, each half's accumulators are built separately, and then every pair of them is merged.
/// A single list accumulates each of its values into a fresh seed, and no lists at all gives a lone seed.
pub(crate) fn partials<T, A, V>(reducer: &Reducer<T, A, V>, lists: &[Cow<'_, [T]>]) -> Vec<A>
where
	T: Clone,
	A: Clone,
{
	match lists {
		[] => vec![(reducer.seed)()],
		[only] => only
			.iter()
			.map(|val| (reducer.accumulate)((reducer.seed)(), val.clone()))
			.collect(),
		_ => {
			let (head, tail) = lists.split_at(lists.len() / 2);
			let head = partials(reducer, head);
			let tail = partials(reducer, tail);

			head.iter()
				.cartesian_product(tail.iter())
				.map(|(head, tail)| (reducer.merge)(head.clone(), tail.clone()))
				.collect()
		}
	}
}
