use mockall::mock;
use pairlab::cointegration::{CointegrationResult, CointegrationTest, EngleGranger};
use pairlab::data::{load_price_frame, synthetic_universe, write_zscore_csv, CsvSource};
use pairlab::screening::{screen_pairs, screen_pairs_with, ScreenConfig};
use pairlab::trading::{walk_forward, Signal, SpreadTrader, SweepGrid};
use pairlab::types::PriceFrame;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Mocks ---

mock! {
    pub Coint {}
    impl CointegrationTest for Coint {
        fn run(&self, y: &[f64], x: &[f64]) -> CointegrationResult;
    }
}

fn result_with_pvalue(p_value: f64) -> CointegrationResult {
    CointegrationResult {
        statistic: -p_value,
        p_value,
        critical_values: [-3.9, -3.3, -3.0],
    }
}

// --- Screening ---

#[test]
fn test_screen_calls_test_once_per_pair() {
    let frame = synthetic_universe(4, 30, 1).unwrap();

    // Row-major pair order: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
    let pvalues = [0.01, 0.5, 0.04, 0.9, 0.2, 0.001];
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let mut mock = MockCoint::new();
    mock.expect_run()
        .times(6)
        .returning(move |_, _| result_with_pvalue(pvalues[counter.fetch_add(1, Ordering::SeqCst)]));

    let result = screen_pairs_with(&frame, &ScreenConfig::with_cutoff(0.05), &mock).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 6);
    let pairs: Vec<(&str, &str)> = result
        .candidates
        .iter()
        .map(|c| (c.symbol_a.as_str(), c.symbol_b.as_str()))
        .collect();
    assert_eq!(pairs, vec![("SYN0", "SYN1"), ("SYN0", "SYN3"), ("SYN2", "SYN3")]);

    assert_eq!(result.pvalue_matrix[(0, 2)], 0.5);
    assert_eq!(result.pvalue_matrix[(2, 3)], 0.001);
    assert_eq!(result.score_matrix[(1, 3)], -0.2);
    for i in 0..4 {
        for j in 0..=i {
            assert_eq!(result.pvalue_matrix[(i, j)], 1.0);
            assert_eq!(result.score_matrix[(i, j)], 0.0);
        }
    }

    let ranked: Vec<f64> = result.ranked().iter().map(|c| c.p_value).collect();
    assert_eq!(ranked, vec![0.001, 0.01, 0.04]);
}

#[test]
fn test_screen_passes_columns_in_frame_order() {
    let frame = PriceFrame::new(
        (0..25).collect(),
        vec![
            ("A".to_string(), vec![1.0; 25]),
            ("B".to_string(), vec![2.0; 25]),
        ],
    )
    .unwrap();

    let mut mock = MockCoint::new();
    mock.expect_run()
        .withf(|y, x| y[0] == 1.0 && x[0] == 2.0)
        .times(1)
        .returning(|_, _| result_with_pvalue(0.3));

    let result = screen_pairs_with(&frame, &ScreenConfig::default(), &mock).unwrap();
    assert!(result.candidates.is_empty());
    assert_eq!(result.pvalue("A", "B"), Some(0.3));
}

#[test]
fn test_single_instrument_never_tests() {
    let frame = synthetic_universe(1, 30, 1).unwrap();
    let mut mock = MockCoint::new();
    mock.expect_run().times(0);

    let result = screen_pairs_with(&frame, &ScreenConfig::default(), &mock).unwrap();
    assert!(result.candidates.is_empty());
}

#[test]
fn test_non_finite_rejected_before_testing() {
    let mut b = vec![5.0; 30];
    b[3] = f64::INFINITY;
    let frame = PriceFrame::new(
        (0..30).collect(),
        vec![("A".to_string(), vec![1.0; 30]), ("B".to_string(), b)],
    )
    .unwrap();

    let mut mock = MockCoint::new();
    mock.expect_run().times(0);
    assert!(screen_pairs_with(&frame, &ScreenConfig::default(), &mock).is_err());
}

#[test]
fn test_swapped_columns_match_direct_engle_granger() {
    let frame = synthetic_universe(2, 200, 21).unwrap();
    let (a, b) = frame.pair("SYN0", "SYN1").unwrap();

    let forward = PriceFrame::new(
        frame.index().to_vec(),
        vec![("A".to_string(), a.to_vec()), ("B".to_string(), b.to_vec())],
    )
    .unwrap();
    let swapped = PriceFrame::new(
        frame.index().to_vec(),
        vec![("B".to_string(), b.to_vec()), ("A".to_string(), a.to_vec())],
    )
    .unwrap();

    let p_ab = screen_pairs(&forward, 0.05).unwrap().pvalue_matrix[(0, 1)];
    let p_ba = screen_pairs(&swapped, 0.05).unwrap().pvalue_matrix[(0, 1)];

    assert!((0.0..=1.0).contains(&p_ab));
    assert!((0.0..=1.0).contains(&p_ba));
    assert_eq!(p_ab, EngleGranger::new().run(a, b).p_value);
    assert_eq!(p_ba, EngleGranger::new().run(b, a).p_value);
}

// --- End to end ---

#[test]
fn test_screen_then_simulate_synthetic_universe() {
    let frame = synthetic_universe(6, 300, 17).unwrap();
    let result = screen_pairs(&frame, 0.05).unwrap();
    assert!(!result.candidates.is_empty());

    for pair in result.ranked() {
        let (s1, s2) = frame.pair(&pair.symbol_a, &pair.symbol_b).unwrap();
        let outcome = SpreadTrader::new(5, 60).run(s1, s2);
        assert!(outcome.pnl.is_finite());
        assert_eq!(outcome.zscores.len(), frame.len());
        // Nothing is defined before the long window fills
        assert!(outcome.zscores[..59].iter().all(Option::is_none));
    }

    let best = result.ranked()[0];
    let wf = walk_forward(&frame, &best.symbol_a, &best.symbol_b, &SweepGrid::default(), 0.7)
        .unwrap();
    assert_eq!(wf.train_rows + wf.test_rows, 300);
    assert!(wf.test_pnl.is_finite());
}

#[test]
fn test_short_entry_then_flatten_through_frame() {
    let frame = PriceFrame::new(
        (0..6).map(|i| 1_600_000_000 + i * 86_400).collect(),
        vec![
            ("A".to_string(), vec![10.0, 10.0, 10.0, 10.0, 7.0, 6.5]),
            ("B".to_string(), vec![1.0; 6]),
        ],
    )
    .unwrap();
    let (s1, s2) = frame.pair("A", "B").unwrap();
    let outcome = SpreadTrader::new(1, 3).run(s1, s2);

    assert_eq!(outcome.events.len(), 2);
    assert_eq!(outcome.events[0].index, 4);
    assert_eq!(outcome.events[0].signal, Signal::Sell);
    assert!((outcome.events[0].z_score + 2.0 / 3f64.sqrt()).abs() < 1e-9);
    assert_eq!(outcome.events[1].index, 5);
    assert_eq!(outcome.events[1].signal, Signal::Exit);
    assert!((outcome.pnl - 0.5).abs() < 1e-12);
}

#[test]
fn test_csv_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let prices = dir.path().join("prices.csv");

    let universe = synthetic_universe(2, 120, 5).unwrap();
    let (a, b) = universe.pair("SYN0", "SYN1").unwrap();
    {
        let mut file = std::fs::File::create(&prices).unwrap();
        writeln!(file, "date,AAA,BBB").unwrap();
        for (i, ts) in universe.index().iter().enumerate() {
            let date = chrono::DateTime::from_timestamp(*ts, 0)
                .unwrap()
                .format("%Y-%m-%d");
            writeln!(file, "{},{},{}", date, a[i], b[i]).unwrap();
        }
    }

    let source = CsvSource {
        timestamp_column: Some("date".to_string()),
        symbols: None,
    };
    let frame = load_price_frame(&prices, &source).unwrap();
    assert_eq!(frame.symbols(), &["AAA".to_string(), "BBB".to_string()]);
    assert_eq!(frame.index(), universe.index());

    let result = screen_pairs(&frame, 0.05).unwrap();
    assert_eq!(result.pvalue_matrix.shape(), (2, 2));

    let (s1, s2) = frame.pair("AAA", "BBB").unwrap();
    let outcome = SpreadTrader::new(2, 10).run(s1, s2);
    let zscores = dir.path().join("zscores.csv");
    write_zscore_csv(&zscores, frame.index(), &outcome.ratios, &outcome.zscores).unwrap();

    let text = std::fs::read_to_string(&zscores).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("timestamp,ratio,zscore"));
    assert_eq!(lines.count(), 120);
}
