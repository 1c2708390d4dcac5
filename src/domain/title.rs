/// Maximum number of characters kept from the first user message.
pub const TITLE_MAX_CHARS: usize = 50;

const TITLE_ELLIPSIS: &str = "...";

/// Derives a conversation title from message content.
///
/// Counts characters, not bytes, so multi-byte text is never split mid-codepoint.
pub fn derive_title(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();

    if chars.next().is_some() {
        format!("{}{}", head, TITLE_ELLIPSIS)
    } else {
        head
    }
}
