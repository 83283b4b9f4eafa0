/// Strips every CRLF pair from the feed, both real ones and the literal
/// four-character `\r\n` escape some exports leave behind.
///
/// This runs before the feed is split into lines, so a CRLF between two
/// records joins them into one line.
pub fn cleanse(raw: &str) -> String {
    raw.replace("\r\n", "").replace("\\r\\n", "")
}
