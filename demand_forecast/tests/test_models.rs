use approx::assert_relative_eq;
use demand_forecast::models::exponential_smoothing::ExponentialSmoothing;
use demand_forecast::models::moving_average::SimpleMovingAverage;
use demand_forecast::models::weighted_moving_average::WeightedMovingAverage;
use demand_forecast::{
    compute_exponential_smoothing, compute_sma, compute_wma, DemandSeries, ForecastEngine,
    ForecastModel, MethodParameters,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

fn create_test_data() -> Vec<f64> {
    vec![120.0, 130.0, 110.0, 140.0, 160.0]
}

fn random_series(rng: &mut StdRng, min_len: usize) -> Vec<f64> {
    let len = rng.gen_range(min_len..=40);
    (0..len).map(|_| rng.gen_range(0.0..500.0)).collect()
}

#[test]
fn test_simple_moving_average() {
    let outcome = compute_sma(&create_test_data(), 3).unwrap();
    let annotated = outcome.annotated.values();

    assert_eq!(annotated.len(), 5);
    assert_eq!(&annotated[..3], &[None, None, None]);
    assert_relative_eq!(annotated[3].unwrap(), 120.0);
    assert_relative_eq!(annotated[4].unwrap(), 380.0 / 3.0);
    assert_eq!(format!("{:.2}", annotated[4].unwrap()), "126.67");

    // (110 + 140 + 160) / 3
    assert_relative_eq!(outcome.next_period, 410.0 / 3.0);
    assert_eq!(format!("{:.2}", outcome.next_period), "136.67");
}

#[test]
fn test_weighted_moving_average() {
    let outcome = compute_wma(&create_test_data(), &[3.0, 2.0, 1.0]).unwrap();
    let annotated = outcome.annotated.values();

    assert_eq!(&annotated[..3], &[None, None, None]);
    // (110*3 + 130*2 + 120*1) / 6
    assert_relative_eq!(annotated[3].unwrap(), 710.0 / 6.0);
    // (140*3 + 110*2 + 130*1) / 6
    assert_relative_eq!(annotated[4].unwrap(), 770.0 / 6.0);
    // (160*3 + 140*2 + 110*1) / 6
    assert_relative_eq!(outcome.next_period, 145.0);
}

#[test]
fn test_exponential_smoothing() {
    let outcome = compute_exponential_smoothing(&[100.0, 120.0, 90.0], 0.5, 100.0).unwrap();

    assert_eq!(
        outcome.annotated.values(),
        &[Some(100.0), Some(100.0), Some(110.0)]
    );
    assert_relative_eq!(outcome.next_period, 100.0);
}

#[test]
fn test_exponential_smoothing_alpha_zero_is_constant() {
    let series = create_test_data();
    let outcome = compute_exponential_smoothing(&series, 0.0, 95.5).unwrap();

    assert!(outcome.annotated.values().iter().all(|v| *v == Some(95.5)));
    assert_eq!(outcome.next_period, 95.5);
}

#[test]
fn test_exponential_smoothing_alpha_one_carries_forward() {
    let series = create_test_data();
    let outcome = compute_exponential_smoothing(&series, 1.0, 42.0).unwrap();

    assert_eq!(outcome.annotated.get(0), Some(42.0));
    for i in 1..series.len() {
        assert_relative_eq!(outcome.annotated.get(i).unwrap(), series[i - 1]);
    }
    assert_relative_eq!(outcome.next_period, 160.0);
}

#[rstest]
#[case(2)]
#[case(3)]
#[case(5)]
fn test_sma_window_equal_to_length(#[case] window: usize) {
    let series: Vec<f64> = create_test_data().into_iter().take(window).collect();
    let outcome = compute_sma(&series, window).unwrap();

    // The first defined period is `window`, one past the end of the series
    assert_eq!(outcome.annotated.len(), window);
    assert_eq!(outcome.annotated.defined_count(), 0);

    let mean = series.iter().sum::<f64>() / window as f64;
    assert_relative_eq!(outcome.next_period, mean);
}

#[test]
fn test_sma_matches_trailing_mean() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let series = random_series(&mut rng, 2);
        let window = rng.gen_range(2..=series.len().min(10));
        let outcome = compute_sma(&series, window).unwrap();

        for (i, value) in outcome.annotated.values().iter().enumerate() {
            if i < window {
                assert_eq!(*value, None);
            } else {
                let mean = series[i - window..i].iter().sum::<f64>() / window as f64;
                assert_relative_eq!(value.unwrap(), mean, max_relative = 1e-12);
            }
        }
    }
}

#[test]
fn test_wma_matches_weighted_combination() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let series = random_series(&mut rng, 3);
        let weights = [
            rng.gen_range(0.1..5.0),
            rng.gen_range(0.0..5.0),
            rng.gen_range(0.0..5.0),
        ];
        let total: f64 = weights.iter().sum();
        let outcome = compute_wma(&series, &weights).unwrap();

        for i in 3..series.len() {
            let expected = (series[i - 1] * weights[0]
                + series[i - 2] * weights[1]
                + series[i - 3] * weights[2])
                / total;
            assert_relative_eq!(
                outcome.annotated.get(i).unwrap(),
                expected,
                max_relative = 1e-12
            );
        }
    }
}

#[test]
fn test_repeated_calls_are_identical() {
    let series = DemandSeries::new(create_test_data());
    let engine = ForecastEngine::new();

    for params in [
        MethodParameters::Sma { window: 4 },
        MethodParameters::Wma {
            weights: [0.6, 0.3, 0.1],
        },
        MethodParameters::ExponentialSmoothing {
            alpha: 0.37,
            initial_forecast: 118.0,
        },
    ] {
        let first = engine.run(&series, &params).unwrap();
        let second = engine.run(&series, &params).unwrap();
        assert_eq!(first.next_period.to_bits(), second.next_period.to_bits());
        assert_eq!(first, second);
    }
}

#[test]
fn test_model_objects() {
    let series = DemandSeries::new(create_test_data());

    let sma = SimpleMovingAverage::new(3).unwrap();
    let wma = WeightedMovingAverage::new([3.0, 2.0, 1.0]).unwrap();
    let es = ExponentialSmoothing::new(0.5, 120.0).unwrap();

    let models: Vec<Box<dyn ForecastModel>> = vec![Box::new(sma), Box::new(wma), Box::new(es)];
    let columns: Vec<String> = models.iter().map(|m| m.column_name()).collect();
    assert_eq!(columns, vec!["SMA_3", "WMA_3", "Exp_Smoothing_0.5"]);

    for model in &models {
        let outcome = model.forecast(&series).unwrap();
        assert_eq!(outcome.annotated.len(), series.len());
        assert!(outcome.next_period > 100.0 && outcome.next_period < 170.0);
    }
}

#[test]
fn test_model_parameter_validation() {
    assert!(ExponentialSmoothing::new(1.5, 0.0).is_err());
    assert!(SimpleMovingAverage::new(1).is_err());
    assert!(WeightedMovingAverage::new([-1.0, 2.0, 1.0]).is_err());
}
