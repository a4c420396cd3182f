// ---------------------------------------------------------------------------
// Column-name normalization
// ---------------------------------------------------------------------------

/// Readable form of a header: trimmed, lowercased, spaces turned into
/// underscores and runs of underscores collapsed to one.
///
/// `"  State  of Residence "` → `"state_of_residence"`.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_was_underscore = false;
    for c in lowered.chars() {
        let c = if c == ' ' { '_' } else { c };
        if c == '_' {
            if !last_was_underscore {
                out.push(c);
            }
            last_was_underscore = true;
        } else {
            out.push(c);
            last_was_underscore = false;
        }
    }
    out
}

/// Match-only key: [`normalize`] with every non-ASCII-alphanumeric character
/// removed. Never used for display.
///
/// `"State-of-Residence"`, `"STATE_OF_RESIDENCE"` and `"State Of Residence"`
/// all map to `"stateofresidence"`.
pub fn canonical_key(raw: &str) -> String {
    normalize(raw)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
