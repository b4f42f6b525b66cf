/// Short language code for room naming: the language part of a locale,
/// lowercased ("es-ES" -> "es", "pt_BR" -> "pt", "de" -> "de").
pub fn language_code(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

/// Room carrying translated text for one language of a service
pub fn language_room(service_code: &str, code: &str) -> String {
    format!("{}:{}", service_code, code)
}

/// Room carrying source-language transcript text for a service
pub fn transcript_room(service_code: &str) -> String {
    format!("{}:transcript", service_code)
}

/// Room carrying service status updates, joined as soon as the session
/// identity is known
pub fn heartbeat_room(service_code: &str) -> String {
    format!("{}:heartbeat", service_code)
}
