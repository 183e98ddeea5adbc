use crate::config::settings::LanguageSettings;

/// Primary subtag of a language tag: `de-AT` → `de`.
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Language used for labels: the primary subtag when supported, otherwise the default.
pub fn resolve_language(code: &str, settings: &LanguageSettings) -> String {
    let primary = primary_subtag(code);
    if settings.supported.iter().any(|lang| *lang == primary) {
        primary
    } else {
        tracing::debug!(
            requested = code,
            fallback = %settings.default,
            "Unsupported language, using default"
        );
        settings.default.clone()
    }
}
