use subworder::{
    learn, runs, segment_text, Error, MergeApplier, MergeLearner, MergeList, Pair, PairTable,
    Stop, Word, END_OF_WORD,
};

const CORPUS: &str = "\
low low low low low lower lower newest newest newest newest newest newest
widest widest widest the_end wider, wildest. slow  slower\tslowest
";

#[test]
fn test_scenario_low_lower() {
    let training = learn("low low lower", 2);
    assert_eq!(
        training.merges().rules(),
        [Pair::new("l", "o"), Pair::new("lo", "w")]
    );
}

#[test]
fn test_scenario_single_rule() {
    let merges = MergeList::parse("a b").unwrap();
    let applier = MergeApplier::new(merges);
    let segmentation = applier.apply(Word::new("ab"));
    assert_eq!(segmentation.symbols(), ["ab", END_OF_WORD]);
    assert_eq!(segmentation.to_string(), "ab");
}

#[test]
fn test_scenario_zero_steps() {
    let training = learn(CORPUS, 0);
    assert!(training.merges().is_empty());
    for (text, segmentation) in training.segmentations() {
        assert_eq!(segmentation, Word::new(text).into_segmentation());
    }
}

#[test]
fn test_determinism() {
    let a = learn(CORPUS, 50);
    let b = learn(CORPUS, 50);
    assert_eq!(a.merges(), b.merges());
    assert_eq!(a.segment_text(CORPUS).unwrap(), b.segment_text(CORPUS).unwrap());
}

#[test]
fn test_tie_break_law() {
    let mut learner = MergeLearner::new(CORPUS);
    loop {
        let expected = {
            let table = learner.pairs();
            let max = table.iter().map(|(_, freq)| freq).max();
            let Some(max) = max else { break };
            table
                .iter()
                .filter(|&(_, freq)| freq == max)
                .map(|(pair, _)| pair)
                .min_by(|a, b| a.second.cmp(&b.second).then(a.first.cmp(&b.first)))
                .cloned()
        };
        assert_eq!(learner.step(), expected.as_ref());
    }
    assert!(learner.step().is_none());
}

#[test]
fn test_pair_count_conservation() {
    let mut learner = MergeLearner::new(CORPUS);
    while learner.step().is_some() {
        assert_eq!(learner.pairs(), &PairTable::build(learner.vocab()));
    }
}

#[test]
fn test_replay_matches_training() {
    let training = learn(CORPUS, 40);
    let expected = training.segment_text(CORPUS).unwrap();
    let applier = MergeApplier::new(training.merges().clone());
    assert_eq!(segment_text(&applier, CORPUS).unwrap(), expected);
}

#[test]
fn test_structure_round_trip() {
    for text in [CORPUS, "", "   ", "x", " a\u{a0}b \r\n"] {
        assert_eq!(runs(text).map(|r| r.as_str()).collect::<String>(), text);
    }
}

#[test]
fn test_output_keeps_layout() {
    let training = learn(CORPUS, 1000);
    let output = training.segment_text(CORPUS).unwrap();
    // 合并耗尽后每个训练词都是单个符号，输出与原文一致
    assert!(matches!(training.stop(), Stop::Exhausted { .. }));
    assert_eq!(output, CORPUS);
}

#[test]
fn test_persisted_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merges.txt");

    let training = learn(CORPUS, 30);
    training.merges().save(&path).unwrap();
    let merges = MergeList::load(&path).unwrap();
    assert_eq!(&merges, training.merges());

    let text = "the slowest wider newest";
    let expected = MergeApplier::new(training.merges().clone())
        .segment_text(text)
        .unwrap();
    assert_eq!(MergeApplier::new(merges).segment_text(text).unwrap(), expected);
}

#[test]
fn test_malformed_merge_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merges.txt");
    std::fs::write(&path, "l o\nlo w extra\n").unwrap();
    match MergeList::load(&path) {
        Err(Error::MalformedMergeList { line, .. }) => assert_eq!(line, 2),
        other => panic!("unexpected {other:?}"),
    }
}
