use unicode_segmentation::UnicodeSegmentation;

/// Splits text into user-perceived characters.
///
/// All length and index computations of the masked input go
/// through the segmenter, so combining marks and joined emoji
/// stay together.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Segmenter {
    /// Extended grapheme clusters.
    #[default]
    Unicode,
    /// One segment per codepoint.
    ///
    /// This is the degraded fallback. It is __not__ correct for
    /// joined clusters like flags, skin-tone emoji or
    /// combining sequences; they will be split apart.
    Codepoint,
}

impl Segmenter {
    /// Split the text.
    pub fn segment<'a>(&self, s: &'a str) -> Vec<&'a str> {
        match self {
            Segmenter::Unicode => s.graphemes(true).collect(),
            Segmenter::Codepoint => s
                .char_indices()
                .map(|(idx, c)| &s[idx..idx + c.len_utf8()])
                .collect(),
        }
    }

    /// Number of segments.
    pub fn count(&self, s: &str) -> usize {
        match self {
            Segmenter::Unicode => s.graphemes(true).count(),
            Segmenter::Codepoint => s.chars().count(),
        }
    }

    /// Keep the first n segments.
    pub fn truncate<'a>(&self, s: &'a str, n: usize) -> &'a str {
        let end = match self {
            Segmenter::Unicode => s
                .grapheme_indices(true)
                .nth(n)
                .map(|(idx, _)| idx)
                .unwrap_or(s.len()),
            Segmenter::Codepoint => s
                .char_indices()
                .nth(n)
                .map(|(idx, _)| idx)
                .unwrap_or(s.len()),
        };
        &s[..end]
    }
}

/// Length of a display string in offset units.
#[inline]
pub(crate) fn display_len(s: &str) -> u32 {
    s.chars().count() as u32
}
