use std::fmt::Debug;

use pretty_assertions::assert_eq;

/// Asserts two collections hold the same elements, ignoring order.
pub fn assert_in_any_order<T: Eq + Ord + Debug>(
    actual: impl IntoIterator<Item = T>,
    expected: impl IntoIterator<Item = T>,
) {
    let mut actual: Vec<_> = actual.into_iter().collect();
    actual.sort();

    let mut expected: Vec<_> = expected.into_iter().collect();
    expected.sort();

    assert_eq!(actual, expected);
}
