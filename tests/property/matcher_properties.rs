//! Property tests for scoring, matching and out-of-scope classification
//!
//! Lexicon words are generated with an `x` prefix and query words with a
//! `q` prefix, so the two vocabularies never share a term and neither
//! contains a stopword.

use std::cmp::Ordering;

use proptest::prelude::*;

use student_desk::{
    AdmissionsFacts, Desk, DeskOptions, GuidanceFacts, Intent, JaccardScorer, KnowledgeBase,
    KnowledgeEntry, Lexicon, Payload, Query, Scorer, SimilarityMatcher, TokenSet,
};

fn word(prefix: char) -> impl Strategy<Value = String> {
    "[a-z]{2,8}".prop_map(move |w| format!("{prefix}{w}"))
}

fn phrase(prefix: char) -> impl Strategy<Value = String> {
    prop::collection::vec(word(prefix), 1..4).prop_map(|words| words.join(" "))
}

fn phrases(prefix: char) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(phrase(prefix), 1..5)
}

/// Term sets over a small vocabulary so ties are common
fn small_set() -> impl Strategy<Value = TokenSet> {
    prop::collection::vec(
        prop::sample::select(vec!["alpha", "beta", "gamma", "delta", "omega"]),
        0..4,
    )
    .prop_map(|words| TokenSet::from_text(&words.join(" "), false))
}

fn knowledge(out_of_scope: &[String], admissions: &[String], guidance: &[String]) -> KnowledgeBase {
    let admissions = admissions
        .iter()
        .enumerate()
        .map(|(i, pattern)| {
            KnowledgeEntry::new(
                &format!("a{i}"),
                "",
                pattern,
                Payload::Admissions(AdmissionsFacts::default()),
            )
            .unwrap()
        })
        .collect();
    let guidance = guidance
        .iter()
        .enumerate()
        .map(|(i, pattern)| {
            KnowledgeEntry::new(
                &format!("g{i}"),
                "",
                pattern,
                Payload::Guidance(GuidanceFacts::default()),
            )
            .unwrap()
        })
        .collect();

    KnowledgeBase::new(Lexicon::new("out_of_scope", out_of_scope), admissions, guidance).unwrap()
}

proptest! {
    #[test]
    fn disjoint_vocabulary_is_out_of_scope(
        out_of_scope in phrases('x'),
        admissions in phrases('x'),
        guidance in phrases('x'),
        query in prop::collection::vec(word('q'), 1..6),
        ignore_stopwords in any::<bool>(),
    ) {
        let options = DeskOptions {
            ignore_stopwords,
            ..DeskOptions::default()
        };
        let desk = Desk::new(knowledge(&out_of_scope, &admissions, &guidance), options).unwrap();
        let text = format!("What is the {}?", query.join(" "));

        let classification = desk.classify(&Query::new(&text));
        prop_assert_eq!(classification.intent, Intent::OutOfScope);
        prop_assert!(classification.confidence.abs() < f64::EPSILON);
        prop_assert!(classification.admissions_score.abs() < f64::EPSILON);
        prop_assert!(classification.guidance_score.abs() < f64::EPSILON);

        let response = desk.answer(&text);
        prop_assert!(response.keys.is_empty());
    }

    #[test]
    fn best_is_repeatable(query in small_set(), candidates in prop::collection::vec(small_set(), 1..8)) {
        let matcher = SimilarityMatcher::default();
        let first = matcher.best(&query, candidates.iter().enumerate());
        let second = matcher.best(&query, candidates.iter().enumerate());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn ties_resolve_by_insertion_order(
        query in small_set(),
        candidates in prop::collection::vec(small_set(), 1..8),
    ) {
        let matcher = SimilarityMatcher::default();
        let scores: Vec<_> = candidates.iter().map(|c| JaccardScorer.score(&query, c)).collect();
        let tied: Vec<usize> = (0..scores.len())
            .filter(|&i| scores.iter().all(|s| scores[i].rank(s) != Ordering::Less))
            .collect();

        let forward = matcher.best(&query, candidates.iter().enumerate()).unwrap();
        prop_assert_eq!(forward.item, tied[0]);
        prop_assert_eq!(forward.index, tied[0]);

        let reversed = matcher
            .best(&query, candidates.iter().enumerate().rev())
            .unwrap();
        prop_assert_eq!(reversed.item, tied[tied.len() - 1]);
        prop_assert_eq!(reversed.score, forward.score);
    }

    #[test]
    fn scores_are_bounded_and_symmetric(a in small_set(), b in small_set()) {
        let score = JaccardScorer.score(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score.value), "score {} out of range", score.value);
        prop_assert_eq!(score, JaccardScorer.score(&b, &a));
        prop_assert_eq!(score.value.abs() < f64::EPSILON, score.overlap == 0);
    }

    #[test]
    fn generated_text_scores_are_bounded(a in "\\PC{0,80}", b in "\\PC{0,80}") {
        let score = JaccardScorer.score(&TokenSet::from_text(&a, true), &TokenSet::from_text(&b, true));
        prop_assert!((0.0..=1.0).contains(&score.value));
    }
}
