// ISO-8601 duration designator parsing

use regex::Regex;

lazy_static::lazy_static! {
    static ref DURATION_RE: Regex =
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").unwrap();
}

/// Parse a duration designator like "PT1H2M3S" into seconds. Any subset of
/// the hour/minute/second components may be present; missing components are
/// zero. Malformed input yields 0 (a deliberate conservative default — the
/// item will then fall below the shorts threshold), with a warning so the
/// exclusion is observable.
pub fn parse_iso8601(encoding: &str) -> u64 {
    let Some(caps) = DURATION_RE.captures(encoding) else {
        tracing::warn!(encoding, "unparseable duration, defaulting to 0s");
        return 0;
    };

    let component = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    component(1) * 3600 + component(2) * 60 + component(3)
}
