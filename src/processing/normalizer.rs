//! Text normalization applied before vectorization and skill filtering

use regex::Regex;

/// Strips URLs, retweet/cc markers, hashtags, mentions, punctuation and
/// non-ASCII characters, then collapses whitespace.
///
/// The step order is fixed: URL, hashtag and mention patterns must be removed
/// before punctuation stripping erases the characters they are anchored on.
/// `RT` and `cc` are removed wherever they occur, not only as whole words,
/// which is how the text the classifier was fitted on was prepared.
pub struct TextNormalizer {
    url_regex: Regex,
    marker_regex: Regex,
    hashtag_regex: Regex,
    mention_regex: Regex,
    punctuation_regex: Regex,
    non_ascii_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(r"http\S+(?:\s|$)").expect("Invalid URL regex"),
            marker_regex: Regex::new(r"RT|cc").expect("Invalid marker regex"),
            hashtag_regex: Regex::new(r"#\S+(?:\s|$)").expect("Invalid hashtag regex"),
            mention_regex: Regex::new(r"@\S+").expect("Invalid mention regex"),
            punctuation_regex: Regex::new(r"[[:punct:]]").expect("Invalid punctuation regex"),
            non_ascii_regex: Regex::new(r"[^\x00-\x7F]").expect("Invalid non-ASCII regex"),
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let cleaned = self.url_regex.replace_all(text, " ");
        let cleaned = self.marker_regex.replace_all(&cleaned, " ");
        let cleaned = self.hashtag_regex.replace_all(&cleaned, " ");
        let cleaned = self.mention_regex.replace_all(&cleaned, "  ");
        let cleaned = self.punctuation_regex.replace_all(&cleaned, " ");
        let cleaned = self.non_ascii_regex.replace_all(&cleaned, " ");
        self.whitespace_regex.replace_all(&cleaned, " ").into_owned()
    }
}
