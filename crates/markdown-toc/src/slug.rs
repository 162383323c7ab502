use std::collections::HashMap;

/// Generates GitHub-compatible heading slugs, numbering repeats.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `text`, unique among the slugs this slugger has produced.
    pub fn slug(&mut self, text: &str) -> String {
        let original = slugify(text);
        let mut candidate = original.clone();

        while self.occurrences.contains_key(&candidate) {
            let count = self.occurrences.entry(original.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{original}-{count}");
        }

        self.occurrences.insert(candidate.clone(), 0);
        candidate
    }
}

/// Lowercase, keep letters, digits, `_` and `-`, turn spaces into `-`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|ch| match ch {
            ' ' => Some('-'),
            '-' | '_' => Some(ch),
            ch if ch.is_alphanumeric() => Some(ch),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_drops_punctuation_without_collapsing_dashes() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Foo - Bar"), "foo---bar");
        assert_eq!(slugify("snake_case()"), "snake_case");
        assert_eq!(slugify("Über Größe"), "über-größe");
    }

    #[test]
    fn repeated_headings_are_numbered() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.slug("Usage"), "usage");
        assert_eq!(slugger.slug("Usage"), "usage-1");
        assert_eq!(slugger.slug("Usage"), "usage-2");
        assert_eq!(slugger.slug("Usage 1"), "usage-1-1");
    }
}
