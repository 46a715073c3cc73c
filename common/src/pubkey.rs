/// Shortens a node identifier for display when no alias is known.
pub trait PubkeyFormatter {
    fn truncate(&self, pubkey: &str) -> String;
}

/// Keeps the first `head` and last `tail` characters, joined by `...`.
///
/// Identifiers no longer than the truncated form would be are returned whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ellipsis {
    pub head: usize,
    pub tail: usize,
}

const SEPARATOR: &str = "...";

impl Default for Ellipsis {
    fn default() -> Self {
        Ellipsis { head: 10, tail: 10 }
    }
}

impl PubkeyFormatter for Ellipsis {
    fn truncate(&self, pubkey: &str) -> String {
        let len = pubkey.chars().count();
        if len <= self.head + self.tail + SEPARATOR.len() {
            return pubkey.to_string();
        }
        let head: String = pubkey.chars().take(self.head).collect();
        let tail: String = pubkey.chars().skip(len - self.tail).collect();
        format!("{head}{SEPARATOR}{tail}")
    }
}

/// Truncate with the default [`Ellipsis`] settings.
pub fn truncate_node_pubkey(pubkey: &str) -> String {
    Ellipsis::default().truncate(pubkey)
}
