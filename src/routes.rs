use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Learning Platform API version used by every `lp` route
pub const VERSION_LP: &str = "1.30";

/// Learning Environment API version
pub const VERSION_LE: &str = "1.52";

// unreserved characters stay as they are, space becomes %20
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Learning Platform route: `/d2l/api/lp/<version><path>`
pub(crate) fn lp(path: &str) -> String {
    format!("/d2l/api/lp/{}{}", VERSION_LP, path)
}

/// Percent-encode a query parameter value
pub(crate) fn query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Final whole-route substitution applied before signing
pub(crate) fn escape_route(route: &str) -> String {
    route.replace(' ', "%20")
}
