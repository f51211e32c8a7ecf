//! CURIE construction for the CIM vocabulary

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped in the local part of a CURIE
const LOCAL_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Build `prefix:local-name`, percent-escaping the local name
#[must_use]
pub fn gen_curie(name: &str, prefix: &str) -> String {
    format!("{prefix}:{}", utf8_percent_encode(name, LOCAL_NAME))
}
