//! Charset detection for fetched pages.

use chardetng::EncodingDetector;
use encoding_rs::{
    Encoding, IBM866, ISO_8859_5, KOI8_R, KOI8_U, UTF_8, WINDOWS_1251, X_MAC_CYRILLIC,
};

fn is_cyrillic_single_byte(encoding: &'static Encoding) -> bool {
    [
        WINDOWS_1251,
        KOI8_R,
        KOI8_U,
        IBM866,
        ISO_8859_5,
        X_MAC_CYRILLIC,
    ]
    .contains(&encoding)
}

/// Guesses the charset of a response body.
///
/// Valid UTF-8 (including empty input) is `"utf-8"`. Bodies dominated by bytes
/// in the windows-1251 letter range are `"windows-1251"` outright, since the
/// statistical guesser needs more text than a short snippet provides.
/// Otherwise `chardetng` decides, with every Cyrillic single-byte encoding
/// reported as `"windows-1251"`.
pub fn detect_encoding(bytes: &[u8]) -> &'static str {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8";
    }
    if looks_like_windows_1251(bytes) {
        return "windows-1251";
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guess = detector.guess(None, false);
    if is_cyrillic_single_byte(guess) {
        "windows-1251"
    } else if guess == UTF_8 {
        "utf-8"
    } else {
        guess.name()
    }
}

/// Decodes a response body with the detected charset.
///
/// Malformed sequences become U+FFFD; decoding never fails.
pub fn decode_body(bytes: &[u8]) -> String {
    let encoding = Encoding::for_label(detect_encoding(bytes).as_bytes()).unwrap_or(UTF_8);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::debug!("Body contained bytes invalid in {}", encoding.name());
    }
    text.into_owned()
}

// In windows-1251 the letters А..я occupy 0xC0..=0xFF. Russian or Ukrainian
// text is mostly such bytes; Western text uses them only for accents.
fn looks_like_windows_1251(bytes: &[u8]) -> bool {
    let cyrillic = bytes.iter().filter(|b| **b >= 0xC0).count();
    let latin = bytes.iter().filter(|b| b.is_ascii_alphabetic()).count();
    cyrillic > 0 && cyrillic >= latin
}
