//! Ordered set of class tokens.

use compact_str::CompactString;
use smallvec::SmallVec;

/// Class tokens of an element, unique and kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: SmallVec<[CompactString; 4]>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(CompactString::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.position(token).is_some()
    }

    /// Append each token that is not already present, in argument order.
    pub fn add<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if !self.contains(token) {
                self.tokens.push(CompactString::from(token));
            }
        }
    }

    /// Remove the first of `tokens` that is present, then stop.
    ///
    /// Later arguments are not looked at once one token has been removed.
    /// Returns whether anything was removed.
    pub fn remove<I, S>(&mut self, tokens: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            if let Some(index) = self.position(token.as_ref()) {
                self.tokens.remove(index);
                return true;
            }
        }
        false
    }

    /// Flip membership of `token`, or force it when `force` is given.
    /// Returns whether the token is present afterwards.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = match force {
            Some(force) => force,
            None => !self.contains(token),
        };
        if present {
            self.add([token]);
        } else {
            self.remove([token]);
        }
        present
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(CompactString::as_str)
    }

    /// Tokens joined by single spaces.
    pub fn value(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }

    fn position(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.as_str() == token)
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}
