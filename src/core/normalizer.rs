// File: src/core/normalizer.rs
//! Pure string transforms applied to both user answers and stored
//! definitions before they are compared.

/// Delimiters applied in order by [`split_answer`].
const DELIMITERS: [&str; 4] = ["、", ",", " ", ", "];

/// Trailing particles dropped from a variant (`快樂的` matches `快樂`).
const PARTICLES: [char; 3] = ['的', '地', '得'];

/// Splits free text into its variant fragments, trimming and dropping
/// empty pieces after each delimiter pass.
pub fn split_answer(text: &str) -> Vec<String> {
    let mut fragments = vec![text.trim().to_string()];
    for delimiter in DELIMITERS {
        fragments = fragments
            .iter()
            .flat_map(|fragment| fragment.split(delimiter))
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect();
    }
    fragments
}

/// Case-folds a single variant, unwraps a `(=synonym)` annotation and drops
/// a trailing particle.
///
/// Steps repeat until nothing changes, so the result is a fixed point:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(token: &str) -> String {
    let mut current = token.to_lowercase().trim().to_string();
    loop {
        let next = normalize_step(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_step(token: &str) -> String {
    let mut token = token.to_lowercase().trim().to_string();
    if let Some(inner) = unwrap_annotation(&token) {
        token = inner.trim().to_string();
    }
    if let Some(stem) = token.strip_suffix(&PARTICLES[..]) {
        token = stem.trim_end().to_string();
    }
    token
}

/// `(=inner)` → `inner`. Anything else is not an annotation.
fn unwrap_annotation(token: &str) -> Option<&str> {
    token.strip_prefix("(=")?.strip_suffix(')')
}
