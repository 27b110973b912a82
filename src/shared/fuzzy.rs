use std::cmp;

/// Levenshtein edit distance counted in chars.
pub(crate) fn distance(s1: &str, s2: &str) -> usize {
    if s1 == s2 {
        return 0;
    }

    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    let mut previous: Vec<usize> = (0..=s2.len()).collect();
    let mut current = vec![0usize; s2.len() + 1];
    s1.iter().enumerate().for_each(|(i, ic)| {
        current[0] = i + 1;
        s2.iter().enumerate().for_each(|(j, jc)| {
            let sub_cost = if ic == jc { 0 } else { 1 };
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            let substitution = previous[j] + sub_cost;
            current[j + 1] = cmp::min(deletion, cmp::min(insertion, substitution));
        });
        std::mem::swap(&mut previous, &mut current);
    });
    previous[s2.len()]
}

/// Scores how well `needle` matches `hay`, between 0 and 1.
/// Both are expected to be lowercase already.
///
/// Every needle token is matched against its best hay token, so
/// "melati" finds "posyandu melati 3".
pub(crate) fn score(needle: &str, hay: &str) -> f64 {
    let hay_tokens: Vec<_> = hay.split_whitespace().collect();
    let mut tokens = 0;
    let mut score: f64 = 0.0;
    for needle_token in needle.split_whitespace() {
        tokens += 1;
        score += hay_tokens
            .iter()
            .map(|hay_token| score_token(needle_token, hay_token))
            .fold(0.0, f64::max);
    }

    if tokens == 0 {
        0.0
    } else {
        score / tokens as f64
    }
}

fn score_token(needle: &str, hay: &str) -> f64 {
    // Typing in progress, "mel" should already find "melati".
    if hay.starts_with(needle) {
        return 1.0;
    }
    let dist = distance(needle, hay);
    let len = cmp::max(needle.chars().count(), hay.chars().count());
    1.0 - (dist as f64 / len as f64)
}

#[test]
fn fuzzy_empty_vs_empty() {
    assert_eq!(distance("", ""), 0);
}

#[test]
fn fuzzy_empty_vs_nonempty() {
    assert_eq!(distance("", "abc"), 3);
    assert_eq!(distance("abc", ""), 3);
}

#[test]
fn fuzzy_edits() {
    assert_eq!(distance("cat", "cut"), 1);
    assert_eq!(distance("cat", "cart"), 1);
    assert_eq!(distance("cart", "cat"), 1);
    assert_eq!(distance("kitten", "orange"), 6);
    assert_eq!(distance("intention", "execution"), 5);
}

#[test]
fn fuzzy_unicode() {
    assert_eq!(distance("café", "café"), 0);
    assert_eq!(distance("café", "cafe"), 1);
}

#[test]
fn score_prefers_exact_token() {
    let exact = score("melati", "posyandu melati 3");
    let typo = score("melato", "posyandu melati 3");
    let other = score("mawar", "posyandu melati 3");
    assert_eq!(exact, 1.0);
    assert!(typo > other);
    assert!(typo < exact);
}

#[test]
fn score_prefix() {
    assert_eq!(score("mel", "posyandu melati"), 1.0);
}

#[test]
fn score_empty_needle() {
    assert_eq!(score("", "posyandu melati"), 0.0);
}
