//! Thresholds controlling when the analysis pipelines give up on a file.

/// Pipeline behavior options for [`crate::pipeline`] entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Smallest candidate file (in bytes) worth extracting.
    pub min_file_bytes: u64,
    /// Minimum number of characters of extracted text.
    pub min_text_chars: usize,
    /// Minimum number of words of extracted text.
    pub min_words: usize,
    /// Length (in characters) of the sample attached to readability reports.
    pub sample_chars: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            min_file_bytes: 100,
            min_text_chars: 50,
            min_words: 15,
            sample_chars: 500,
        }
    }
}

impl AnalysisOptions {
    /// Creates default analysis options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum candidate file size.
    pub fn with_min_file_bytes(mut self, min_file_bytes: u64) -> Self {
        self.min_file_bytes = min_file_bytes;
        self
    }

    /// Sets the minimum extracted character count.
    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    /// Sets the minimum extracted word count.
    pub fn with_min_words(mut self, min_words: usize) -> Self {
        self.min_words = min_words;
        self
    }

    /// Sets the sample length.
    pub fn with_sample_chars(mut self, sample_chars: usize) -> Self {
        self.sample_chars = sample_chars;
        self
    }
}
