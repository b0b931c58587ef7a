//! TLS failure classification.

const SSL_ERROR_KEYWORDS: [&str; 7] = [
    "ssl",
    "certificate",
    "tls",
    "handshake",
    "x509",
    "self signed",
    "self-signed",
];

/// Whether an error message describes a TLS/certificate failure.
///
/// Case-insensitive substring match against a fixed keyword set.
pub fn is_ssl_error(message: &str) -> bool {
    let lowered = message.to_lowercase();
    SSL_ERROR_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
