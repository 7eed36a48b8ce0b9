//! Key/value extraction from request targets and form-encoded bodies.
//!
//! The two parsers are intentionally not the same. A query pair must be
//! introduced by `?` or `&`, so the path in front of the query is never
//! mistaken for a key. A form body has no such anchor: any run of
//! characters other than `&` and `=` becomes a key.

use std::collections::HashMap;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

/// Decoded parameters. A key without `=` maps to `None`.
pub type Params = HashMap<String, Option<String>>;

static QUERY_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]([^&=]+)(?:=([^&]*))?").expect("query pattern is valid")
});

static FORM_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^&=]+)(?:=([^&]*))?").expect("form pattern is valid")
});

/// Parses `?key=value&key2` pairs out of a request target.
pub fn parse_query(target: &str) -> Params {
    collect(&QUERY_PAIR, target)
}

/// Parses `key=value&key2` pairs out of a form-encoded body.
pub fn parse_form(body: &str) -> Params {
    collect(&FORM_PAIR, body)
}

/// Percent-decodes `s`. `+` is left alone, malformed escapes are kept
/// verbatim and invalid UTF-8 is replaced.
pub fn unescape(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

fn collect(pattern: &Regex, input: &str) -> Params {
    let mut params = Params::new();

    for caps in pattern.captures_iter(input) {
        let key = unescape(&caps[1]);
        let value = caps.get(2).map(|m| unescape(m.as_str()));
        params.insert(key, value);
    }

    params
}
