use std::collections::HashSet;

/// Source tokens read as missing rather than as text.
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// True if `raw` stands for a missing value.
pub(crate) fn is_missing(raw: &str) -> bool {
    raw.trim().is_empty() || NA_TOKENS.contains(&raw)
}

/// Make header names usable as column keys: blank names become
/// `Unnamed: <index>`, repeated names get `.1`, `.2`, ... suffixes.
pub(crate) fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let mut name: String = name.into();
        if name.trim().is_empty() {
            name = format!("Unnamed: {}", idx);
        }
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, suffix);
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames_blank_and_repeated_headers() {
        let names = unique_headers(["id", "", "id", "id", " ", "id.1"]);
        assert_eq!(
            names,
            vec!["id", "Unnamed: 1", "id.1", "id.2", "Unnamed: 4", "id.1.1"]
        );
    }

    #[test]
    fn recognises_missing_tokens() {
        assert!(is_missing(""));
        assert!(is_missing("   "));
        assert!(is_missing("NaN"));
        assert!(is_missing("N/A"));
        assert!(is_missing("null"));
        assert!(!is_missing("Nil"));
        assert!(!is_missing("0"));
    }
}
