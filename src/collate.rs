//! Display ordering for entry names.
//!
//! Names are compared by their GB18030 encoding, which places common hanzi in
//! pinyin order and leaves ASCII in byte order. Storage and lookup never use
//! this ordering.

use std::borrow::Cow;
use std::cmp::Ordering;

use encoding_rs::GB18030;

fn sort_key(name: &str) -> Cow<'_, [u8]> {
    // The few code points the encoder cannot map become numeric character
    // references, which still give a stable order.
    let (bytes, _, _) = GB18030.encode(name);
    bytes
}

/// Byte-wise comparison of the GB18030 forms; a strict prefix sorts first.
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

pub fn less(a: &str, b: &str) -> bool {
    compare(a, b) == Ordering::Less
}

/// Sort names in place for display.
pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| compare(a, b));
}
