use crate::contract::{CommentScore, DocumentOutcome, DocumentScore, ScoringPolicy, Sentiment};
use crate::lexicon::SentimentLexicon;

pub const POSITIVE_KEYWORDS: &[&str] = &["good", "positivo"];
pub const NEGATIVE_KEYWORDS: &[&str] = &["bad", "negativo"];

/// Compound scores within this distance of zero are neutral.
pub const LEXICON_NEUTRAL_BAND: f64 = 0.05;

/// Whole-document keyword polarity.
///
/// Plain substring matching on the lowercased text: positive terms win over
/// negative ones, and "goodbye" counts as "good".
pub fn keyword_polarity(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    if POSITIVE_KEYWORDS.iter().any(|term| lowered.contains(*term)) {
        1.0
    } else if NEGATIVE_KEYWORDS.iter().any(|term| lowered.contains(*term)) {
        -1.0
    } else {
        0.0
    }
}

pub fn keyword_sentiment(polarity: f64) -> Sentiment {
    if polarity > 0.0 {
        Sentiment::Positive
    } else if polarity < 0.0 {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

pub fn lexicon_sentiment(compound: f64) -> Sentiment {
    if compound > LEXICON_NEUTRAL_BAND {
        Sentiment::Positive
    } else if compound < -LEXICON_NEUTRAL_BAND {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Non-empty lines of a document, trimmed and numbered from 1.
pub fn split_comments(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .collect()
}

/// A ready-to-use scoring policy. The lexicon variant owns its loaded resource,
/// so a `Scorer` can only exist once the lexicon is available.
#[derive(Debug, Clone)]
pub enum Scorer {
    Keyword,
    Lexicon(SentimentLexicon),
}

impl Scorer {
    pub fn policy(&self) -> ScoringPolicy {
        match self {
            Self::Keyword => ScoringPolicy::Keyword,
            Self::Lexicon(_) => ScoringPolicy::Lexicon,
        }
    }

    pub fn lexicon_fingerprint(&self) -> Option<&str> {
        match self {
            Self::Keyword => None,
            Self::Lexicon(lexicon) => Some(lexicon.fingerprint()),
        }
    }

    pub fn score_document(&self, key: &str, text: &str) -> DocumentOutcome {
        match self {
            Self::Keyword => {
                let polarity = keyword_polarity(text);
                DocumentOutcome::Document(DocumentScore {
                    file: key.to_string(),
                    polarity,
                    sentiment: keyword_sentiment(polarity),
                })
            }
            Self::Lexicon(lexicon) => DocumentOutcome::Comments(
                split_comments(text)
                    .into_iter()
                    .map(|(comment_number, line)| {
                        let score = lexicon.polarity_scores(line).compound;
                        CommentScore {
                            comment_number,
                            text: line.to_string(),
                            score,
                            sentiment: lexicon_sentiment(score),
                        }
                    })
                    .collect(),
            ),
        }
    }
}
