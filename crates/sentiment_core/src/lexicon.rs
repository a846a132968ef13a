//! Valence-lexicon sentiment scoring.
//!
//! The lexicon is an external resource in the VADER text format: one entry per
//! line, tab separated, `token<TAB>mean_valence[<TAB>...]`. Only the first two
//! fields are used. Scoring follows the VADER heuristics (boosters, negation,
//! capitalization, contrastive "but", punctuation emphasis) and normalizes the
//! summed valence into a compound score in [-1, 1].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

const BOOSTER_INCREMENT: f64 = 0.293;
const BOOSTER_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const MAX_QUESTION_EMPHASIS: f64 = 0.96;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "effing", "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously",
    "flipping", "flippin", "fricking", "frickin", "frigging", "friggin", "fully", "greatly",
    "hella", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "uber", "unbelievably", "unusually", "utterly",
    "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "kindof", "kind-of", "less", "little", "marginally",
    "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta", "sortof", "sort-of",
];

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("sentiment lexicon not found at {}", .0.display())]
    Unavailable(PathBuf),

    #[error("failed to read sentiment lexicon {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sentiment lexicon entry on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("sentiment lexicon contains no entries")]
    Empty,
}

/// Proportions of negative, neutral and positive valence plus the normalized
/// compound score.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
    fingerprint: String,
}

impl SentimentLexicon {
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        if !path.is_file() {
            return Err(LexiconError::Unavailable(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> Result<Self, LexiconError> {
        let mut valences = HashMap::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            let measure = fields.next().ok_or_else(|| LexiconError::Parse {
                line: index + 1,
                message: format!("expected tab-separated token and valence, got '{line}'"),
            })?;
            if token.is_empty() {
                return Err(LexiconError::Parse {
                    line: index + 1,
                    message: "empty token".to_string(),
                });
            }
            let valence = measure
                .trim()
                .parse::<f64>()
                .map_err(|error| LexiconError::Parse {
                    line: index + 1,
                    message: format!("invalid valence '{}': {error}", measure.trim()),
                })?;
            if !valence.is_finite() {
                return Err(LexiconError::Parse {
                    line: index + 1,
                    message: format!("valence for '{token}' must be finite, got {valence}"),
                });
            }
            valences.insert(token.to_string(), valence);
        }

        if valences.is_empty() {
            return Err(LexiconError::Empty);
        }

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        Ok(Self {
            valences,
            fingerprint: format!("{:x}", hasher.finalize()),
        })
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    /// SHA-256 of the lexicon source text, hex encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    fn contains(&self, lowered: &str) -> bool {
        self.valences.contains_key(lowered)
    }

    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        let words = tokenize(text);
        let lowered: Vec<String> = words.iter().map(|word| word.to_lowercase()).collect();
        let cap_diff = has_cap_differential(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            let lower = lowered[i].as_str();
            let is_kind_of =
                lower == "kind" && lowered.get(i + 1).is_some_and(|next| next == "of");
            if booster_scalar(lower).is_some() || is_kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.word_valence(&words, &lowered, i, word, cap_diff));
        }

        apply_but_rule(&lowered, &mut sentiments);
        score_valence(&sentiments, text)
    }

    fn word_valence(
        &self,
        words: &[&str],
        lowered: &[String],
        i: usize,
        word: &str,
        cap_diff: bool,
    ) -> f64 {
        let lower = lowered[i].as_str();
        let Some(base) = self.valence(lower) else {
            return 0.0;
        };
        let mut valence = base;

        if lower == "no" && i + 1 < words.len() && self.contains(&lowered[i + 1]) {
            valence = 0.0;
        }
        let preceded_by_no = (i > 0 && lowered[i - 1] == "no")
            || (i > 1 && lowered[i - 2] == "no")
            || (i > 2
                && lowered[i - 3] == "no"
                && matches!(lowered[i - 1].as_str(), "or" | "nor"));
        if preceded_by_no {
            valence = base * NEGATION_SCALAR;
        }

        if is_upper(word) && cap_diff {
            if valence > 0.0 {
                valence += CAPS_INCREMENT;
            } else {
                valence -= CAPS_INCREMENT;
            }
        }

        for distance in 0..3 {
            if i <= distance {
                break;
            }
            let previous = i - (distance + 1);
            if self.contains(&lowered[previous]) {
                continue;
            }
            let mut scalar =
                booster_adjustment(words[previous], &lowered[previous], valence, cap_diff);
            if distance == 1 {
                scalar *= 0.95;
            } else if distance == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lowered, distance, i);
        }

        least_check(valence, lowered, i, |token| self.contains(token))
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .filter(|token| token.chars().count() > 1)
        .collect()
}

fn is_upper(word: &str) -> bool {
    let mut has_cased = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// True when some, but not all, words are fully capitalized.
fn has_cap_differential(words: &[&str]) -> bool {
    let upper = words.iter().filter(|word| is_upper(word)).count();
    upper > 0 && upper < words.len()
}

fn booster_scalar(lowered: &str) -> Option<f64> {
    if BOOSTERS_UP.contains(&lowered) {
        Some(BOOSTER_INCREMENT)
    } else if BOOSTERS_DOWN.contains(&lowered) {
        Some(BOOSTER_DECREMENT)
    } else {
        None
    }
}

fn booster_adjustment(word: &str, lowered: &str, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster_scalar(lowered) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if is_upper(word) && cap_diff {
        if valence > 0.0 {
            scalar += CAPS_INCREMENT;
        } else {
            scalar -= CAPS_INCREMENT;
        }
    }
    scalar
}

fn is_negation(lowered: &str) -> bool {
    NEGATIONS.contains(&lowered) || lowered.contains("n't")
}

fn negation_check(valence: f64, lowered: &[String], distance: usize, i: usize) -> f64 {
    let word = |offset: usize| lowered[i - offset].as_str();
    let intensifier = |token: &str| token == "so" || token == "this";
    match distance {
        0 => {
            if is_negation(word(1)) {
                return valence * NEGATION_SCALAR;
            }
        }
        1 => {
            if word(2) == "never" && intensifier(word(1)) {
                return valence * 1.25;
            }
            if word(2) == "without" && word(1) == "doubt" {
                return valence;
            }
            if is_negation(word(2)) {
                return valence * NEGATION_SCALAR;
            }
        }
        _ => {
            if word(3) == "never" && (intensifier(word(2)) || intensifier(word(1))) {
                return valence * 1.25;
            }
            if word(3) == "without" && (word(2) == "doubt" || word(1) == "doubt") {
                return valence;
            }
            if is_negation(word(3)) {
                return valence * NEGATION_SCALAR;
            }
        }
    }
    valence
}

fn least_check(
    valence: f64,
    lowered: &[String],
    i: usize,
    in_lexicon: impl Fn(&str) -> bool,
) -> f64 {
    if i == 0 || lowered[i - 1] != "least" || in_lexicon(&lowered[i - 1]) {
        return valence;
    }
    if i > 1 && matches!(lowered[i - 2].as_str(), "at" | "very") {
        return valence;
    }
    valence * NEGATION_SCALAR
}

/// Halves valence before the first "but" and boosts valence after it.
fn apply_but_rule(lowered: &[String], sentiments: &mut [f64]) {
    let Some(but_index) = lowered.iter().position(|word| word == "but") else {
        return;
    };
    for (index, sentiment) in sentiments.iter_mut().enumerate() {
        if index < but_index {
            *sentiment *= 0.5;
        } else if index > but_index {
            *sentiment *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_WEIGHT,
        _ => MAX_QUESTION_EMPHASIS,
    };
    exclamations as f64 * EXCLAMATION_WEIGHT + question_emphasis
}

pub fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut total: f64 = sentiments.iter().sum();
    if total > 0.0 {
        total += emphasis;
    } else if total < 0.0 {
        total -= emphasis;
    }
    let compound = normalize(total);

    let mut positive = 0.0;
    let mut negative = 0.0;
    let mut neutral = 0.0;
    for &sentiment in sentiments {
        if sentiment > 0.0 {
            positive += sentiment + 1.0;
        } else if sentiment < 0.0 {
            negative += sentiment - 1.0;
        } else {
            neutral += 1.0;
        }
    }
    if positive > negative.abs() {
        positive += emphasis;
    } else if positive < negative.abs() {
        negative -= emphasis;
    }

    let denominator = positive + negative.abs() + neutral;
    PolarityScores {
        neg: round_to((negative / denominator).abs(), 3),
        neu: round_to((neutral / denominator).abs(), 3),
        pos: round_to((positive / denominator).abs(), 3),
        compound: round_to(compound, 4),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const TEST_LEXICON: &str = "love\t3.2\t0.4\t[3, 3, 4, 3]\n\
                                terrible\t-2.1\t0.83\t[-2, -2, -3, -1]\n\
                                good\t1.9\t0.9\t[2, 1, 3, 2]\n\
                                bad\t-2.5\t0.67\t[-3, -2, -3, -2]\n\
                                great\t3.1\t0.7\t[3, 4, 3, 3]\n";

    fn lexicon() -> SentimentLexicon {
        SentimentLexicon::from_text(TEST_LEXICON).expect("test lexicon should parse")
    }

    fn compound(text: &str) -> f64 {
        lexicon().polarity_scores(text).compound
    }

    #[test]
    fn parses_vader_formatted_entries() {
        let lexicon = lexicon();
        assert_eq!(lexicon.len(), 5);
        assert_eq!(lexicon.valence("love"), Some(3.2));
        assert_eq!(lexicon.valence("meh"), None);
        assert_eq!(lexicon.fingerprint().len(), 64);
    }

    #[test]
    fn fingerprint_is_stable_for_identical_text() {
        let first = SentimentLexicon::from_text(TEST_LEXICON).expect("lexicon should parse");
        let second = SentimentLexicon::from_text(TEST_LEXICON).expect("lexicon should parse");
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn rejects_lines_without_valence() {
        let error = SentimentLexicon::from_text("good\t1.9\nbroken\n").expect_err("should fail");
        assert!(matches!(error, LexiconError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_non_numeric_valence() {
        let error = SentimentLexicon::from_text("good\tvery\n").expect_err("should fail");
        assert!(error.to_string().contains("line 1"));
    }

    #[test]
    fn rejects_non_finite_valence() {
        let error = SentimentLexicon::from_text("love\t3.2\ngood\tNaN\n")
            .expect_err("NaN valence should fail");
        assert!(matches!(error, LexiconError::Parse { line: 2, .. }));

        for text in ["great\tinf\n", "awful\t-inf\n"] {
            let error = SentimentLexicon::from_text(text).expect_err("infinite valence should fail");
            assert!(matches!(error, LexiconError::Parse { line: 1, .. }));
        }
    }

    #[test]
    fn rejects_empty_lexicon() {
        let error = SentimentLexicon::from_text("\n\n").expect_err("should fail");
        assert!(matches!(error, LexiconError::Empty));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("vader_lexicon.txt");
        let error = SentimentLexicon::load(&path).expect_err("missing file should fail");
        assert!(matches!(error, LexiconError::Unavailable(missing) if missing == path));
    }

    #[test]
    fn loads_lexicon_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
        file.write_all(TEST_LEXICON.as_bytes())
            .expect("lexicon should be written");
        let lexicon = SentimentLexicon::load(file.path()).expect("lexicon should load");
        assert_eq!(lexicon.len(), 5);
    }

    #[test]
    fn positive_and_negative_lines_score_on_opposite_sides() {
        let positive = compound("I love it");
        let negative = compound("This is terrible");
        assert!(positive > 0.6 && positive < 0.65, "got {positive}");
        assert!(negative < -0.45 && negative > -0.5, "got {negative}");
    }

    #[test]
    fn text_without_lexicon_words_is_neutral() {
        let scores = lexicon().polarity_scores("The parcel arrived on Tuesday");
        assert_eq!(scores.compound, 0.0);
        assert_eq!(scores.neu, 1.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(lexicon().polarity_scores(""), PolarityScores::default());
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(compound("this is good") > 0.0);
        assert!(compound("this is not good") < 0.0);
        assert!(compound("this isn't good") < 0.0);
    }

    #[test]
    fn boosters_increase_intensity() {
        assert!(compound("the food was very good") > compound("the food was good"));
        assert!(compound("the food was slightly good") < compound("the food was good"));
    }

    #[test]
    fn capitalized_emphasis_increases_intensity() {
        assert!(compound("the food was GOOD") > compound("the food was good"));
    }

    #[test]
    fn clause_after_but_dominates() {
        assert!(compound("the food was bad but the service was good") > 0.0);
        assert!(compound("the food was good but the service was bad") < 0.0);
    }

    #[test]
    fn exclamation_marks_add_emphasis() {
        assert!(compound("great!!!") > compound("great"));
        assert_eq!(compound("great!!!!!!"), compound("great!!!!"));
    }

    #[test]
    fn compound_stays_within_bounds() {
        let text = "love ".repeat(200);
        let scores = lexicon().polarity_scores(&format!("{text}!!!!"));
        assert!(scores.compound <= 1.0 && scores.compound > 0.99);

        let text = "terrible ".repeat(200);
        assert!(lexicon().polarity_scores(&text).compound >= -1.0);
    }

    #[test]
    fn proportions_sum_to_one() {
        let scores = lexicon().polarity_scores("good food but terrible parking");
        let sum = scores.neg + scores.neu + scores.pos;
        assert!((sum - 1.0).abs() < 0.01, "got {sum}");
    }
}
