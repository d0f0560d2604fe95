use roadtrends::{
    lane_for_key, reduce, AggregationStrategy, AnalysisConfig, AnalysisMode, LaneAggregator,
};

fn trend_config(top_n: usize) -> AnalysisConfig {
    AnalysisConfig {
        mode: AnalysisMode::Trend,
        top_n,
        ..AnalysisConfig::default()
    }
}

#[test]
fn ranked_output_is_bounded_by_n() {
    for top_n in [1, 3, 10, 50] {
        let mut lane = LaneAggregator::new(&trend_config(top_n));
        for i in 0..25u64 {
            lane.reduce_key(format!("keyword:k{i:02}"), &[1; 3]);
        }
        let out = lane.flush();
        assert_eq!(out.len(), top_n.min(25));
    }
}

#[test]
fn ranked_output_orders_value_descending_then_key_ascending() {
    let mut lane = LaneAggregator::new(&trend_config(10));
    lane.reduce_key("keyword:zebra".to_string(), &[1, 1]);
    lane.reduce_key("keyword:alpha".to_string(), &[1, 1]);
    lane.reduce_key("keyword:mid".to_string(), &[1, 1, 1, 1]);
    assert_eq!(
        lane.flush(),
        vec![
            ("keyword:mid".to_string(), 4),
            ("keyword:alpha".to_string(), 2),
            ("keyword:zebra".to_string(), 2),
        ]
    );
}

#[test]
fn documented_tie_break_example_holds() {
    // keys keyword:test -> 3, keyword:road -> 3, keyword:car -> 5, N = 2
    let mut lane = LaneAggregator::new(&trend_config(2));
    lane.reduce_key("keyword:test".to_string(), &[1, 1, 1]);
    lane.reduce_key("keyword:road".to_string(), &[1, 1, 1]);
    lane.reduce_key("keyword:car".to_string(), &[1, 1, 1, 1, 1]);
    assert_eq!(
        lane.flush(),
        vec![
            ("keyword:car".to_string(), 5),
            ("keyword:road".to_string(), 3),
        ]
    );
}

#[test]
fn aggregation_is_order_independent() {
    let contributions: Vec<(String, Vec<u64>)> = (0..12)
        .map(|i| (format!("keyword:k{i:02}"), vec![1, 2, 3, (i % 4) as u64 + 1]))
        .collect();

    for strategy in [
        AggregationStrategy::Sum,
        AggregationStrategy::Max,
        AggregationStrategy::Min,
        AggregationStrategy::Avg,
        AggregationStrategy::Median,
        AggregationStrategy::Count,
    ] {
        let config = AnalysisConfig {
            aggregation: strategy,
            ..trend_config(6)
        };

        let mut forward = LaneAggregator::new(&config);
        for (key, values) in &contributions {
            forward.reduce_key(key.clone(), values);
        }

        let mut backward = LaneAggregator::new(&config);
        for (key, values) in contributions.iter().rev() {
            let mut reversed = values.clone();
            reversed.reverse();
            backward.reduce_key(key.clone(), &reversed);
        }

        assert_eq!(forward.flush(), backward.flush(), "strategy {strategy:?}");
    }
}

#[test]
fn median_floors_the_middle_pair_mean() {
    assert_eq!(reduce(AggregationStrategy::Median, &[1, 2, 3, 4]), 2);
    assert_eq!(reduce(AggregationStrategy::Median, &[2, 2, 5, 6]), 3);
}

#[test]
fn secondary_sort_flag_does_not_change_output() {
    let keys: Vec<(String, Vec<u64>)> = (0..30)
        .map(|i| (format!("location:l{:02}", 29 - i), vec![1; (i % 6) + 1]))
        .collect();

    let base = AnalysisConfig {
        mode: AnalysisMode::Location,
        top_n: 7,
        ..AnalysisConfig::default()
    };
    let mut standard = LaneAggregator::new(&base);
    let mut composite = LaneAggregator::new(&AnalysisConfig {
        secondary_sort: true,
        ..base.clone()
    });
    for (key, values) in &keys {
        standard.reduce_key(key.clone(), values);
        composite.reduce_key(key.clone(), values);
    }
    assert_eq!(standard.flush(), composite.flush());
}

#[test]
fn routing_is_deterministic_and_in_bounds() {
    let keys = [
        "brand:toyota",
        "location:question:pie",
        "keyword:jam",
        "score",
        "unknown_tag:value",
    ];
    for lane_count in [1, 2, 4, 9, 16] {
        for key in keys {
            let lane = lane_for_key(key, lane_count);
            assert!(lane < lane_count);
            assert_eq!(lane, lane_for_key(key, lane_count), "unstable route for {key}");
        }
    }
}
