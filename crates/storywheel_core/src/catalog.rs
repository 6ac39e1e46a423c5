//! Static parameter catalog served to clients.

/// Cities a story can be set in.
pub fn places() -> Vec<&'static str> {
    vec!["Stockholm", "Göteborg", "Malmö"]
}

/// Decades a story can be set around: 1800 through 2000 in 50-year steps.
pub fn decades() -> Vec<i32> {
    let (start, end, step) = (1800, 2000, 50);
    let mut decades: Vec<i32> = (start..=end).step_by(step as usize).collect();
    if end % step != 0 {
        decades.push(end);
    }
    decades
}
