// File: src/fuzzy/phonetic.rs

/// Digraph and length folding, applied in order; later rules see the output
/// of earlier ones.
const DIGRAPH_RULES: &[(&str, &str)] = &[
    ("aa", "a"),
    ("ee", "e"),
    ("ii", "i"),
    ("oo", "o"),
    ("uu", "u"),
    ("ph", "f"),
    ("bh", "b"),
    ("dh", "d"),
    ("th", "t"),
    ("kh", "k"),
    ("gh", "g"),
    ("ch", "s"),
    ("sh", "s"),
    ("zh", "l"),
    ("j", "s"),
    ("c", "s"),
    ("z", "s"),
    ("ng", "n"),
    ("nj", "n"),
    ("rr", "r"),
    ("ll", "l"),
    ("nn", "n"),
    ("bb", "b"),
    ("pp", "p"),
    ("ff", "f"),
];

/// Voiced/unvoiced and similar consonant confusions.
const CONFUSION_RULES: &[(char, char)] = &[('b', 'p'), ('f', 'p'), ('d', 't'), ('g', 'k'), ('v', 'w')];

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

fn collapse_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = None;
    for c in s.chars() {
        if last != Some(c) {
            out.push(c);
            last = Some(c);
        }
    }
    out
}

fn fold_once(s: &str) -> String {
    let mut folded = s.to_string();
    for &(from, to) in DIGRAPH_RULES {
        if folded.contains(from) {
            folded = folded.replace(from, to);
        }
    }
    let folded: String = folded
        .chars()
        .map(|c| {
            CONFUSION_RULES
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |&(_, to)| to)
        })
        .collect();
    collapse_runs(&folded)
}

/// Folds Latin or Tanglish text so that spellings of the same sound agree.
///
/// The three steps (digraphs, consonant confusions, run collapse) are
/// repeated until the text stops changing: a confusion can recreate a digraph
/// (`fh` becomes `ph`), and the result must be a fixed point. Every pass
/// either shrinks the text or only maps letters that cannot reappear, so the
/// loop ends after a handful of passes.
///
/// Expects lower-cased text with separators already removed.
pub fn fold_phonetic(s: &str) -> String {
    let mut current = fold_once(s);
    loop {
        let next = fold_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// The folded consonants only: the loosest matching key.
pub fn skeleton(s: &str) -> String {
    let mut folded = fold_phonetic(s);
    folded.retain(|c| !VOWELS.contains(&c));
    folded
}
