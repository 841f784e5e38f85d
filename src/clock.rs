/// Render whole seconds as `MM:SS`. Minutes past 99 keep all their digits.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Inverse of [`format_clock`]
pub fn parse_clock(text: &str) -> Option<u64> {
    let (mins, secs) = text.split_once(':')?;
    if mins.len() < 2 || secs.len() != 2 {
        return None;
    }
    if !mins.bytes().chain(secs.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mins: u64 = mins.parse().ok()?;
    let secs: u64 = secs.parse().ok()?;
    if secs >= 60 {
        return None;
    }
    mins.checked_mul(60)?.checked_add(secs)
}

pub fn format_total(elapsed: &[u64]) -> String {
    format_clock(elapsed.iter().sum())
}
