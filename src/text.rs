use std::fmt;

pub const NAME_CAPACITY: usize = 29;
pub const COLOR_CAPACITY: usize = 9;

/*
 * Owned text holding at most N characters. Anything longer is cut at the last
 * character that fits, the same way a fixed-width record field would keep only
 * its first N characters.
 */
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BoundedString<const N: usize> {
    inner: String,
}

pub type Name = BoundedString<NAME_CAPACITY>;
pub type Color = BoundedString<COLOR_CAPACITY>;

impl<const N: usize> BoundedString<N> {
    pub fn new(text: &str) -> Self {
        let text = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
        let inner = match text.char_indices().nth(N) {
            Some((cut, _)) => text[..cut].to_string(),
            None => text.to_string(),
        };
        BoundedString { inner }
    }

    /// Colors are stored with their first letter upper-cased.
    pub fn capitalized(text: &str) -> Self {
        let mut chars = text.chars();
        let joined = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        Self::new(&joined)
    }

    pub const fn capacity() -> usize {
        N
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<const N: usize> From<&str> for BoundedString<N> {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl<const N: usize> PartialEq<str> for BoundedString<N> {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedString<N> {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.inner)
    }
}

impl<const N: usize> fmt::Debug for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}
