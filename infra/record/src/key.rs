//! Key classification and ordering.
//!
//! Keys are plain strings. Some of them look like array indices (`"0"`, `"17"`), and
//! scripting hosts traditionally enumerate those first, in numeric order, before every
//! other key. [`KeyOrder::IndexFirst`] reproduces that rule; [`KeyOrder::Insertion`]
//! leaves the order alone.

use lineage_domain::config::KeyOrder;

/// Returns the numeric value of `key` when it is a canonical array index.
///
/// A canonical index is `"0"` or a run of ASCII digits without a leading zero whose
/// value is below `2^32 - 1`.
///
/// ```rust
/// use lineage_record::is_array_index;
///
/// assert_eq!(is_array_index("42"), Some(42));
/// assert_eq!(is_array_index("042"), None);
/// assert_eq!(is_array_index("-1"), None);
/// assert_eq!(is_array_index("4294967295"), None);
/// ```
#[must_use]
pub fn is_array_index(key: &str) -> Option<u32> {
    let bytes = key.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.iter().all(u8::is_ascii_digit) => {
            key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
        },
        _ => None,
    }
}

/// Reorders `items` in place according to `order`.
///
/// The sort is stable, so keys that are not array indices keep their relative
/// (insertion) order.
pub(crate) fn arrange<T>(items: &mut [T], order: KeyOrder, key: impl Fn(&T) -> &str) {
    if order == KeyOrder::IndexFirst {
        items.sort_by_key(|item| is_array_index(key(item)).map_or((1, 0), |n| (0, n)));
    }
}
