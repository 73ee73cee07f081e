/// Lossily decode `body` and keep at most `max_chars` characters.
///
/// Used wherever an arbitrary upstream body ends up in a log line or an
/// error payload; the result never exceeds the bound and never fails on
/// invalid UTF-8.
pub fn bounded_excerpt(body: &[u8], max_chars: usize) -> String {
    String::from_utf8_lossy(body).chars().take(max_chars).collect()
}
