//! Delimiter generation for multi-line output values

use uuid::Uuid;

/// Source of heredoc delimiters for multi-line values
pub trait DelimiterSource {
    /// Produce a delimiter for the next multi-line record
    fn next_delimiter(&mut self) -> String;
}

/// Random `EOF-<uuid>` delimiters
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidDelimiters;

impl UuidDelimiters {
    pub fn new() -> Self {
        Self
    }
}

impl DelimiterSource for UuidDelimiters {
    fn next_delimiter(&mut self) -> String {
        format!("EOF-{}", Uuid::new_v4())
    }
}

/// Fixed delimiters handed out in order, for deterministic output
#[derive(Debug, Clone)]
pub struct SequenceDelimiters {
    ids: std::vec::IntoIter<String>,
    fallback: UuidDelimiters,
}

impl SequenceDelimiters {
    /// Each id becomes `EOF-<id>`; once exhausted, falls back to random delimiters
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect::<Vec<_>>().into_iter(),
            fallback: UuidDelimiters,
        }
    }
}

impl DelimiterSource for SequenceDelimiters {
    fn next_delimiter(&mut self) -> String {
        match self.ids.next() {
            Some(id) => format!("EOF-{id}"),
            None => self.fallback.next_delimiter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_delimiters_are_unique() {
        let mut source = UuidDelimiters::new();
        let first = source.next_delimiter();
        let second = source.next_delimiter();

        assert!(first.starts_with("EOF-"));
        assert_eq!(first.len(), "EOF-".len() + 36);
        assert_ne!(first, second);
    }

    #[test]
    fn test_sequence_delimiters() {
        let mut source = SequenceDelimiters::new(["uuid4-1", "uuid4-2"]);
        assert_eq!(source.next_delimiter(), "EOF-uuid4-1");
        assert_eq!(source.next_delimiter(), "EOF-uuid4-2");
        assert!(source.next_delimiter().starts_with("EOF-"));
    }
}
