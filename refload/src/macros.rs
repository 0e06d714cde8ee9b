//! Build-system macro substitution.
//!
//! Reference paths may embed `$(Name)` tokens that name project properties.
//! [`resolve_macros`] replaces each token with the value of the named
//! property, in a single left-to-right pass.
//!
//! # Tokenizing rules
//!
//! - A token starts at `$(` and ends at the first `)` after it. Everything
//!   strictly between is the property name, passed to the lookup verbatim.
//! - A `$(` with no `)` anywhere after it is not a token: it and the rest of
//!   the string are copied unchanged.
//! - A property that is undefined, or whose storage fails, becomes the empty
//!   string. The failure is written to the log and never returned.
//! - Substituted values are not scanned again, so a value containing `$(...)`
//!   appears literally in the output.

use crate::host::{LogSink, PropertyLookup};

const OPENER: &str = "$(";
const CLOSER: char = ')';

/// Resolve all `$(Name)` tokens in `path` against `lookup`.
///
/// Every resolved token is reported as `$(Name) = value`; every failed
/// lookup is reported as a failure line.
///
/// # Examples
///
/// ```
/// use refload::macros::resolve_macros;
/// use refload::MemoryLog;
/// use std::collections::HashMap;
///
/// let mut properties = HashMap::new();
/// properties.insert("foo".to_string(), "foo".to_string());
/// properties.insert("bar".to_string(), "bar".to_string());
/// let log = MemoryLog::new();
///
/// let resolved = resolve_macros(r"C:\$(foo)\$(bar).csproj", &properties, &log);
/// assert_eq!(resolved, r"C:\foo\bar.csproj");
/// assert_eq!(log.messages().len(), 2);
/// ```
pub fn resolve_macros(path: &str, lookup: &dyn PropertyLookup, log: &dyn LogSink) -> String {
    if path.is_empty() || !path.contains(OPENER) {
        return path.to_string();
    }

    let mut resolved = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find(OPENER) {
        let after_open = &rest[open + OPENER.len()..];
        let Some(close) = after_open.find(CLOSER) else {
            break;
        };

        resolved.push_str(&rest[..open]);
        let name = &after_open[..close];
        resolved.push_str(&lookup_property(name, lookup, log));
        rest = &after_open[close + 1..];
    }

    resolved.push_str(rest);
    resolved
}

fn lookup_property(name: &str, lookup: &dyn PropertyLookup, log: &dyn LogSink) -> String {
    match lookup.get(name) {
        Ok(Some(value)) => {
            log.write(&format!("$({name}) = {value}"));
            value
        }
        Ok(None) => {
            log.failure(&format!(
                "*** FAILED to resolve macro. ***\t$({name}) is not defined"
            ));
            String::new()
        }
        Err(e) => {
            log.failure(&format!("*** FAILED to resolve macro. ***\t{e}"));
            String::new()
        }
    }
}
