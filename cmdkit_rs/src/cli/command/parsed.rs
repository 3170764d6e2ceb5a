//! ResolvedBinding - result of tokenizing one invocation's arguments.

/// Option keys and positional tokens of one invocation, prior to coercion.
///
/// Option entries keep command-line order so `allow_multiple` options see
/// every occurrence; single-valued lookups take the last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedBinding {
    /// `(key, raw value)` pairs; an empty value marks a naked flag
    pub options: Vec<(String, String)>,

    /// Positional tokens, `None` when none were seen
    pub positionals: Option<Vec<String>>,
}

impl ResolvedBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.push((key.into(), value.into()));
    }

    pub(crate) fn push_positional(&mut self, token: impl Into<String>) {
        self.positionals
            .get_or_insert_with(Vec::new)
            .push(token.into());
    }

    /// Raw value bound to `key`, last occurrence wins.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every raw value bound under any of `keys`, in command-line order.
    pub fn values_for(&self, keys: &[String]) -> Vec<&str> {
        self.options
            .iter()
            .filter(|(k, _)| keys.iter().any(|key| key == k))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn positionals(&self) -> &[String] {
        self.positionals.as_deref().unwrap_or(&[])
    }
}
