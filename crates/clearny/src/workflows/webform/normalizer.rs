/// Canonicalize a free-form answer cell onto the questionnaire wire values:
/// trims, strips BOM and apostrophes, lowercases, and joins inner whitespace
/// with underscores, then folds common synonyms.
pub(crate) fn normalize_answer(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim_start_matches('\u{feff}')
        .replace('\'', "")
        .to_ascii_lowercase();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");

    if joined.is_empty() {
        return None;
    }

    let canonical = match joined.as_str() {
        "y" | "true" => "yes",
        "n" | "false" => "no",
        "unsure" | "not_sure" => "not_sure",
        other => other,
    };

    Some(canonical.to_string())
}

/// Split a multi-value cell ("possession; sale") into canonical entries.
pub(crate) fn split_multi(raw: &str) -> Vec<String> {
    raw.split([';', ','])
        .filter_map(normalize_answer)
        .collect()
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(raw: &str) -> Option<String> {
    normalize_answer(raw)
}
