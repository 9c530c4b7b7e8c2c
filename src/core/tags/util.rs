//! core/tags/util.rs
//! Small parsing helpers shared by tag reading/writing.

/// Parse strings like:
/// - "3" -> (Some(3), None)
/// - "3/12" -> (Some(3), Some(12))
pub(crate) fn parse_slash_pair_u32(s: Option<&str>) -> (Option<u32>, Option<u32>) {
    let Some(s) = s else { return (None, None) };
    let s = s.trim();
    if s.is_empty() {
        return (None, None);
    }

    let mut parts = s.split('/');
    let a = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let b = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    (a, b)
}

/// Join a number/total pair back into "n" or "n/total".
pub(crate) fn join_slash_pair(n: Option<&str>, total: Option<&str>) -> Option<String> {
    let n = n.map(str::trim).filter(|s| !s.is_empty())?;
    match total.map(str::trim).filter(|s| !s.is_empty()) {
        Some(t) => Some(format!("{n}/{t}")),
        None => Some(n.to_string()),
    }
}

/// The part before '/' of a "n/total" string, trimmed.
pub(crate) fn number_part(s: &str) -> &str {
    s.split('/').next().unwrap_or("").trim()
}

/// Year portion of a date string: "1999-04-01" -> "1999".
pub(crate) fn year_part(date: &str) -> &str {
    date.split('-').next().unwrap_or("").trim()
}
