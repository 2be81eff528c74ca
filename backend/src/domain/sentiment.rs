//! Comment-text normalisation and lexicon-based polarity scoring.
//!
//! The pipeline mirrors what the profile comments actually look like in the
//! wild: mixed case, accents, contractions, and heavy punctuation. Text is
//! case-folded, decomposed to NFD with combining marks stripped, expanded to
//! standard lexical forms, reduced to alphabetic characters, and whitespace
//! tokenised. Scoring averages AFINN-derived weights over stemmed tokens.

use std::collections::HashMap;
use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sentinel meaning "no usable signal".
///
/// An account whose comment thread normalises to zero tokens gets this value
/// rather than a neutral 0: the absence of any textual footprint is itself a
/// negative signal.
pub const NO_SIGNAL: f64 = -1.0;

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Weight table keyed by stem. Source words are stemmed at build time with
/// the same stemmer applied to input tokens, so lookups always agree.
static LEXICON: LazyLock<HashMap<String, f64>> = LazyLock::new(|| {
    WEIGHTS
        .iter()
        .map(|(word, weight)| (STEMMER.stem(word).into_owned(), f64::from(*weight)))
        .collect()
});

/// Compute the polarity of raw comment text.
///
/// Returns [`NO_SIGNAL`] when the text normalises to zero tokens; otherwise
/// the mean lexicon weight over all tokens (unmatched tokens weigh 0). A
/// non-finite intermediate is coerced to 0 rather than propagated.
pub fn score(text: &str) -> f64 {
    let tokens = normalise(text);
    if tokens.is_empty() {
        return NO_SIGNAL;
    }
    let total: f64 = tokens
        .iter()
        .map(|token| {
            LEXICON
                .get(STEMMER.stem(token).as_ref())
                .copied()
                .unwrap_or(0.0)
        })
        .sum();
    let value = total / tokens.len() as f64;
    if value.is_finite() { value } else { 0.0 }
}

/// Normalise raw text into lowercase alphabetic tokens.
pub fn normalise(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let expanded = expand_contractions(&stripped);
    // Non-alphabetic characters are removed, not replaced, matching how the
    // comment threads collapse emoji and markup runs.
    let alphabetic: String = expanded
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    alphabetic.split_whitespace().map(str::to_owned).collect()
}

/// Expand contractions to their standard lexical form, word by word.
fn expand_contractions(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        match word {
            "won't" => out.push_str("will not"),
            "can't" => out.push_str("cannot"),
            "shan't" => out.push_str("shall not"),
            "ain't" => out.push_str("am not"),
            "let's" => out.push_str("let us"),
            _ => expand_suffix(word, &mut out),
        }
    }
    out
}

fn expand_suffix(word: &str, out: &mut String) {
    const SUFFIXES: &[(&str, &str)] = &[
        ("n't", " not"),
        ("'re", " are"),
        ("'ve", " have"),
        ("'ll", " will"),
        ("'d", " would"),
        ("'m", " am"),
        ("'s", " is"),
    ];
    for (suffix, replacement) in SUFFIXES {
        if let Some(stemmed) = word.strip_suffix(suffix) {
            if !stemmed.is_empty() {
                out.push_str(stemmed);
                out.push_str(replacement);
                return;
            }
        }
    }
    out.push_str(word);
}

/// AFINN-derived weight table, trimmed to the vocabulary that actually shows
/// up on profile comment threads. Values follow the AFINN convention of
/// integers in [-5, 5].
#[rustfmt::skip]
const WEIGHTS: &[(&str, i8)] = &[
    ("abandon", -2), ("abuse", -3), ("abusive", -3), ("admire", 3),
    ("adorable", 3), ("afraid", -2), ("aggressive", -2), ("agree", 1),
    ("alarm", -2), ("amazing", 4), ("anger", -3), ("angry", -3),
    ("annoy", -2), ("annoying", -2), ("appreciate", 2), ("argue", -2),
    ("arrogant", -2), ("ashamed", -2), ("attack", -1), ("avoid", -1),
    ("awesome", 4), ("awful", -3), ("bad", -3), ("ban", -2),
    ("banned", -2), ("bastard", -5), ("beautiful", 3), ("benefit", 2),
    ("best", 3), ("betray", -3), ("bitch", -5), ("blame", -2),
    ("block", -1), ("bored", -2), ("boring", -3), ("boss", 1),
    ("brave", 2), ("brilliant", 4), ("broken", -1), ("bully", -2),
    ("calm", 2), ("cancer", -1), ("care", 2), ("champion", 2),
    ("charming", 3), ("cheat", -3), ("cheater", -3), ("cheating", -3),
    ("cheerful", 2), ("clean", 2), ("clever", 2), ("clutch", 2),
    ("cool", 1), ("crap", -3), ("crash", -2), ("creative", 2),
    ("cry", -1), ("cute", 2), ("damn", -4), ("dead", -3),
    ("dear", 2), ("defeat", -2), ("defend", 1), ("delight", 3),
    ("destroy", -3), ("die", -3), ("dirty", -2), ("disappointed", -2),
    ("disaster", -2), ("disgusting", -3), ("dishonest", -2), ("dislike", -2),
    ("dodge", -1), ("dope", 3), ("doubt", -1), ("dumb", -3),
    ("easy", 1), ("elite", 2), ("enemy", -2), ("enjoy", 2),
    ("epic", 3), ("evil", -3), ("excellent", 3), ("excited", 3),
    ("fail", -2), ("failure", -2), ("fair", 2), ("fake", -3),
    ("fan", 3), ("fantastic", 4), ("fast", 1), ("fault", -2),
    ("favorite", 2), ("fear", -2), ("fight", -1), ("filthy", -2),
    ("fine", 2), ("fraud", -4), ("free", 1), ("friend", 1),
    ("friendly", 2), ("fun", 4), ("funny", 4), ("garbage", -3),
    ("generous", 2), ("genius", 3), ("gift", 2), ("glad", 3),
    ("god", 1), ("good", 3), ("great", 3), ("greedy", -2),
    ("grief", -2), ("gross", -2), ("hack", -4), ("hacked", -4),
    ("hacker", -4), ("happy", 3), ("hate", -3), ("hated", -3),
    ("hater", -3), ("heart", 2), ("hell", -4), ("help", 2),
    ("helpful", 2), ("hero", 2), ("honest", 2), ("honor", 2),
    ("hope", 2), ("hopeless", -2), ("horrible", -3), ("hostile", -2),
    ("humble", 1), ("hurt", -2), ("idiot", -3), ("ignore", -1),
    ("impressive", 3), ("insult", -2), ("interesting", 2), ("jerk", -3),
    ("joke", 2), ("joy", 3), ("kick", -1), ("kill", -3),
    ("killed", -3), ("kind", 2), ("kudos", 3), ("lag", -2),
    ("lame", -2), ("laugh", 1), ("legend", 2), ("liar", -3),
    ("like", 2), ("lol", 3), ("lose", -3), ("loser", -3),
    ("lost", -3), ("love", 3), ("loved", 3), ("lovely", 3),
    ("loyal", 3), ("luck", 3), ("lucky", 3), ("mad", -3),
    ("mean", -2), ("mercy", 2), ("mess", -2), ("miss", -2),
    ("mistake", -2), ("nasty", -3), ("nice", 3), ("noob", -2),
    ("pain", -2), ("pathetic", -2), ("peace", 2), ("perfect", 3),
    ("please", 1), ("poison", -2), ("positive", 2), ("praise", 3),
    ("pretty", 1), ("pro", 2), ("problem", -2), ("proud", 2),
    ("quit", -1), ("rage", -2), ("respect", 2), ("rigged", -3),
    ("rude", -2), ("sad", -2), ("salty", -2), ("scam", -4),
    ("scammer", -4), ("scared", -2), ("shame", -2), ("sharp", 1),
    ("shit", -4), ("sick", -2), ("skill", 2), ("skilled", 2),
    ("smart", 1), ("smooth", 2), ("solid", 2), ("sorry", -1),
    ("spam", -2), ("stupid", -2), ("sucks", -3), ("super", 3),
    ("sweet", 2), ("terrible", -3), ("thank", 2), ("thanks", 2),
    ("toxic", -3), ("trash", -2), ("troll", -2), ("trust", 1),
    ("ugly", -3), ("useless", -2), ("warm", 1), ("weak", -2),
    ("welcome", 2), ("win", 4), ("winner", 4), ("wonderful", 4),
    ("worst", -3), ("worthless", -2), ("wow", 4), ("wrong", -2),
];
