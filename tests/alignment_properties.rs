// Property-style checks of the alignment and scoring over generated transcripts
// WHY: invariants must hold for any non-empty pair, not just hand-picked samples

use seams_eval::aligner::{align, align_with_capacity};
use seams_eval::metrics::{f1, precision, recall};
use seams_eval::normalizer::{clean_reference_text, normalize_reference_line};
use std::num::NonZeroUsize;

const VOCABULARY: &[&str] = &[
    "le", "chat", "dort", "il", "fait", "beau", "l'enfant", "joue", "d'accord", "merci", "oui",
    "non", ".", ",", "!", "?", "s'il", "vous", "plaît",
];

/// Small deterministic generator so failures are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }

    fn sentence(&mut self) -> String {
        let len = self.below(6);
        (0..len)
            .map(|_| VOCABULARY[self.below(VOCABULARY.len())])
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lines(&mut self, count: usize, speaker: bool) -> Vec<String> {
        (0..count)
            .map(|i| {
                let sentence = self.sentence();
                if speaker {
                    format!("p{}\t{}", i % 3, sentence)
                } else {
                    sentence
                }
            })
            .collect()
    }
}

#[test]
fn test_matched_bounded_by_line_counts() {
    let mut rng = Lcg(7);
    for _ in 0..200 {
        let (evaluated_count, reference_count) = (1 + rng.below(30), 1 + rng.below(30));
        let evaluated = rng.lines(evaluated_count, false);
        let reference = rng.lines(reference_count, true);

        let result = align(&evaluated, &reference);

        assert!(result.matched_count <= evaluated.len().min(reference.len()));
        assert_eq!(
            result.matched_count + result.unmatched_evaluated.len(),
            evaluated.len()
        );
        // Every reference line is matched, unmatched, pending or never pulled in
        assert!(
            result.matched_count + result.unmatched_reference.len() + result.pending_reference
                <= reference.len()
        );
    }
}

#[test]
fn test_scores_within_unit_interval() {
    let mut rng = Lcg(42);
    for _ in 0..200 {
        let (evaluated_count, reference_count) = (1 + rng.below(25), 1 + rng.below(25));
        let evaluated = rng.lines(evaluated_count, false);
        let reference = rng.lines(reference_count, true);

        let result = align(&evaluated, &reference);
        let p = precision(result.matched_count, evaluated.len());
        let r = recall(result.matched_count, reference.len());
        let f = f1(p, r);

        assert!((0.0..=1.0).contains(&p));
        assert!((0.0..=1.0).contains(&r));
        assert!((0.0..=1.0).contains(&f));
        if p == 0.0 && r == 0.0 {
            assert_eq!(f, 0.0);
        } else {
            assert!((f - 2.0 * p * r / (p + r)).abs() < 1e-12);
        }
    }
}

#[test]
fn test_match_indices_are_increasing() {
    let mut rng = Lcg(1234);
    for _ in 0..100 {
        let (evaluated_count, reference_count) = (1 + rng.below(40), 1 + rng.below(40));
        let evaluated = rng.lines(evaluated_count, false);
        let reference = rng.lines(reference_count, true);

        let result = align_with_capacity(&evaluated, &reference, NonZeroUsize::new(5).unwrap());

        for pair in result.matches.windows(2) {
            assert!(pair[0].evaluated_index < pair[1].evaluated_index);
            assert!(pair[0].reference_index < pair[1].reference_index);
        }
        // The window starts at 5 entries and grows by at most one per evaluated line
        assert!(result
            .matches
            .iter()
            .all(|m| m.window_position < 5 + m.evaluated_index));
    }
}

#[test]
fn test_identical_transcripts_fully_match() {
    let mut rng = Lcg(99);
    let sentences: Vec<String> = (0..50)
        .map(|i| format!("{} mot{i}", rng.sentence().replace(['.', ',', '!', '?'], "")))
        .collect();
    let reference: Vec<String> = sentences.iter().map(|s| format!("p1 {s}")).collect();

    let result = align(&sentences, &reference);

    assert_eq!(result.matched_count, sentences.len());
    assert!(result.unmatched_reference.is_empty());
    assert!(result.matches.iter().all(|m| m.window_position == 0));
}

#[test]
fn test_clean_reference_text_idempotent() {
    let mut rng = Lcg(5);
    for _ in 0..300 {
        let sentence = rng.sentence();
        let once = clean_reference_text(&sentence);
        assert_eq!(clean_reference_text(&once), once, "input: {sentence:?}");
    }
}

#[test]
fn test_normalize_reference_line_examples() {
    assert_eq!(normalize_reference_line("p1\tLe chat, il dort."), "le chat il dort");
    assert_eq!(normalize_reference_line("p2 l'enfant joue"), "l' enfant joue");
}

#[test]
fn test_example_match_and_miss() {
    let matched = align(["the cat sat ."], ["p1 le chat sat"]);
    assert_eq!(matched.matched_count, 1);

    let missed = align(["hello world"], ["p1 bonjour", "p2 le monde"]);
    assert_eq!(missed.matched_count, 0);
    assert_eq!(missed.unmatched_evaluated[0].text, "hello world");
    assert_eq!(missed.pending_reference, 2);
}
