use super::fixtures::{pos, sentence, two_sentences};
use crate::{
    Bounds, Context, ContextExtractor, CoveredText, Document, Feature, FeatureValue, Span,
};

fn oob_distance(feature: &Feature) -> Option<usize> {
    feature.value.as_str()?.strip_prefix("OOB")?.parse().ok()
}

fn ranged(begin: usize, end: usize) -> Vec<Context> {
    vec![
        Context::preceding_range(begin, end).unwrap(),
        Context::following_range(begin, end).unwrap(),
        Context::first_covered_range(begin, end).unwrap(),
        Context::last_covered_range(begin, end).unwrap(),
    ]
}

/// Every token, the chunk and the sentence of the fixture.
fn foci(doc: &Document) -> Vec<Span> {
    let mut foci = doc.spans("Token").to_vec();
    foci.extend(doc.spans("Chunk").iter().cloned());
    foci.extend(doc.spans("Sentence").iter().cloned());
    foci
}

const RANGES: [(usize, usize); 6] = [(0, 1), (0, 3), (1, 3), (2, 5), (3, 6), (0, 12)];

#[test]
fn test_ranged_contexts_emit_one_feature_per_position() {
    let (doc, _) = sentence();
    for focus in foci(&doc) {
        for &(begin, end) in RANGES.iter() {
            for context in ranged(begin, end) {
                let features = context
                    .extract(&doc, &focus, Bounds::Unbounded, &"Token".into(), &CoveredText::new())
                    .unwrap();
                assert_eq!(features.len(), end - begin, "{} around {}", context, focus);
            }
        }
    }
}

#[test]
fn test_ranged_count_holds_under_bounds() {
    let doc = two_sentences();
    for sentence in doc.spans("Sentence") {
        for focus in doc.covered("Token", sentence) {
            for &(begin, end) in RANGES.iter() {
                let extractor =
                    ContextExtractor::new("Token", CoveredText::new(), ranged(begin, end));
                let features = extractor.extract_within(&doc, &focus, sentence).unwrap();
                assert_eq!(features.len(), 4 * (end - begin));
            }
        }
    }
}

#[test]
fn test_out_of_bounds_distances_count_outward_from_one() {
    let (doc, _) = sentence();
    for focus in foci(&doc) {
        for end in 1..=12 {
            let preceding = Context::preceding(end).unwrap();
            let following = Context::following(end).unwrap();
            let extract = |context: &Context| {
                context
                    .extract(&doc, &focus, Bounds::Unbounded, &"Token".into(), &CoveredText::new())
                    .unwrap()
            };

            // preceding comes out farthest first
            let mut outward = extract(&preceding);
            outward.reverse();
            let distances: Vec<usize> = outward.iter().filter_map(oob_distance).collect();
            assert_eq!(distances, (1..=distances.len()).collect::<Vec<_>>());

            let distances: Vec<usize> = extract(&following).iter().filter_map(oob_distance).collect();
            assert_eq!(distances, (1..=distances.len()).collect::<Vec<_>>());
        }
    }
}

#[test]
fn test_once_out_of_bounds_always_out_of_bounds() {
    let doc = two_sentences();
    let it = doc.spans("Token")[4].clone();
    let sentence = doc.spans("Sentence")[1].clone();
    let extractor = ContextExtractor::new("Token", CoveredText::new(), vec![
        Context::following(5).unwrap(),
    ]);
    let features = extractor.extract_within(&doc, &it, &sentence).unwrap();
    let first_oob = features
        .iter()
        .position(|f| oob_distance(f).is_some())
        .unwrap();
    assert!(features[first_oob..].iter().all(|f| oob_distance(f).is_some()));
    assert_eq!(first_oob, 2);
}

#[test]
fn test_covered_emits_one_feature_per_contained_span() {
    let (doc, _) = sentence();
    let extractor = ContextExtractor::new("Token", CoveredText::new(), vec![Context::covered()]);
    for focus in foci(&doc) {
        let features = extractor.extract(&doc, &focus).unwrap();
        assert_eq!(features.len(), doc.covered("Token", &focus).len());
        assert!(features.iter().all(|f| oob_distance(f).is_none()));
    }
}

#[test]
fn test_aggregate_sizes() {
    let (doc, focus) = sentence();
    let children = vec![
        Context::preceding_range(1, 4).unwrap(),
        Context::covered(),
        Context::following(8).unwrap(),
    ];
    let run = |context: Context| {
        ContextExtractor::new("Token", pos(), vec![context])
            .extract(&doc, &focus)
            .unwrap()
    };

    let consumed = run(Context::bag(children.clone())).len();
    assert_eq!(consumed, 3 + 2 + 8);

    let counted: i64 = run(Context::count(children.clone()))
        .iter()
        .filter_map(|f| f.value.as_int())
        .sum();
    assert_eq!(counted as usize, consumed);

    assert_eq!(run(Context::ngram(children.clone())).len(), 1);
    for n in 1..=16 {
        let ngrams = run(Context::ngrams(n, children.clone()).unwrap());
        assert_eq!(ngrams.len(), (consumed + 1).saturating_sub(n));
    }
}

#[test]
fn test_extraction_is_idempotent() {
    let (doc, focus) = sentence();
    let extractor = ContextExtractor::new(
        "Token",
        pos(),
        vec![
            Context::preceding_range(2, 7).unwrap(),
            Context::count(vec![Context::following(4).unwrap()]),
            Context::ngrams(2, vec![Context::covered()]).unwrap(),
        ],
    );
    let first = extractor.extract(&doc, &focus).unwrap();
    let second = extractor.extract(&doc, &focus).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_values_are_never_floats() {
    let (doc, focus) = sentence();
    let features = ContextExtractor::new("Token", pos(), vec![Context::count(ranged(0, 3))])
        .extract(&doc, &focus)
        .unwrap();
    assert!(features.iter().all(|f| f.value.is_finite()));
    assert!(!features.iter().any(|f| matches!(f.value, FeatureValue::Float(_))));
}

#[test]
fn test_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();
    assert_send_sync::<Context>();
    assert_send_sync::<ContextExtractor>();

    let (doc, focus) = sentence();
    let extractor = ContextExtractor::new("Token", pos(), ranged(0, 4));
    let expected = extractor.extract(&doc, &focus).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| extractor.extract(&doc, &focus).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
