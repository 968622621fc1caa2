use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern"));

/// Turn a display name into a URL slug: accents are folded to ASCII,
/// everything that is not a letter or digit collapses into a single dash.
///
/// `"Défense & Sécurité"` becomes `"defense-securite"`.
pub fn parameterize(value: &str) -> String {
    let ascii: String = value
        .nfkd()
        .filter(|c| c.is_ascii())
        .collect::<String>()
        .to_ascii_lowercase();

    NON_SLUG_CHARS
        .replace_all(&ascii, "-")
        .trim_matches('-')
        .to_string()
}

/// The slug a URL or path points at: its last non-empty path segment.
/// Plain slugs come back unchanged.
pub fn slug_from_url(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let path = match url::Url::parse(trimmed) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => trimmed
            .split(['?', '#'])
            .next()
            .unwrap_or(trimmed)
            .to_string(),
    };

    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}
