use regex::Regex;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Finds the word at the start or end of a text. Used for
/// word-wise navigation and deletion.
///
/// A word is the whitespace adjacent to the cut plus the segment
/// behind it. If that segment is made of word characters the whole
/// run is taken, otherwise a single punctuation unit. This way
/// word-deletion always makes progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WordFinder {
    /// Unicode word boundaries.
    #[default]
    Unicode,
    /// Regex approximation of `\b\w+\b`.
    ///
    /// Only ASCII letters, digits and `_` count as word characters.
    /// Every other non-whitespace char is a word of its own, which
    /// is wrong for most non-latin text.
    Regex,
}

static TRAILING: OnceLock<Regex> = OnceLock::new();
static LEADING: OnceLock<Regex> = OnceLock::new();

fn trailing_re() -> &'static Regex {
    TRAILING.get_or_init(|| {
        Regex::new(r"(?:[0-9A-Za-z_]+|[^0-9A-Za-z_\s])?\s*$").expect("valid regex")
    })
}

fn leading_re() -> &'static Regex {
    LEADING.get_or_init(|| {
        Regex::new(r"^\s*(?:[0-9A-Za-z_]+|[^0-9A-Za-z_\s])?").expect("valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegKind {
    Space,
    Word,
    Other,
}

fn seg_kind(seg: &str) -> SegKind {
    if seg.chars().all(char::is_whitespace) {
        SegKind::Space
    } else if seg.chars().any(|c| c.is_alphanumeric() || c == '_') {
        SegKind::Word
    } else {
        SegKind::Other
    }
}

impl WordFinder {
    /// Trailing word of the text, including any whitespace
    /// that follows it.
    pub fn trailing_word<'a>(&self, s: &'a str) -> &'a str {
        match self {
            WordFinder::Unicode => {
                let segs = s
                    .split_word_bound_indices()
                    .map(|(idx, seg)| (idx, seg_kind(seg)))
                    .collect::<Vec<_>>();

                let mut i = segs.len();
                while i > 0 && segs[i - 1].1 == SegKind::Space {
                    i -= 1;
                }
                if i > 0 {
                    if segs[i - 1].1 == SegKind::Word {
                        while i > 0 && segs[i - 1].1 == SegKind::Word {
                            i -= 1;
                        }
                    } else {
                        i -= 1;
                    }
                }

                match segs.get(i) {
                    Some((idx, _)) => &s[*idx..],
                    None => "",
                }
            }
            WordFinder::Regex => match trailing_re().find(s) {
                Some(m) => &s[m.start()..],
                None => "",
            },
        }
    }

    /// Leading word of the text, including any whitespace
    /// before it.
    pub fn leading_word<'a>(&self, s: &'a str) -> &'a str {
        match self {
            WordFinder::Unicode => {
                let segs = s
                    .split_word_bound_indices()
                    .map(|(idx, seg)| (idx + seg.len(), seg_kind(seg)))
                    .collect::<Vec<_>>();

                let mut i = 0;
                while i < segs.len() && segs[i].1 == SegKind::Space {
                    i += 1;
                }
                if i < segs.len() {
                    if segs[i].1 == SegKind::Word {
                        while i < segs.len() && segs[i].1 == SegKind::Word {
                            i += 1;
                        }
                    } else {
                        i += 1;
                    }
                }

                if i == 0 {
                    ""
                } else {
                    &s[..segs[i - 1].0]
                }
            }
            WordFinder::Regex => match leading_re().find(s) {
                Some(m) => &s[..m.end()],
                None => "",
            },
        }
    }
}
