mod support;

use recruitment_map::workflows::recruitment::{
    CandidateSource, CandidateStage, FilterOptions, MetricsAggregator, Position, PositionFilter,
    PositionStatus, TimelineEntry,
};
use support::{candidates, positions, today, MIXED_POSITIONS};

fn entry(month: &str, opened: usize, closed: usize) -> TimelineEntry {
    TimelineEntry {
        month: month.to_string(),
        opened,
        closed,
    }
}

#[test]
fn mixed_statuses_produce_expected_headline_figures() {
    let positions = positions(MIXED_POSITIONS);
    let metrics = MetricsAggregator::dashboard(&positions, today());

    assert_eq!(metrics.total_positions, 3);
    assert_eq!(metrics.active_positions, 1);
    assert_eq!(metrics.completed_positions, 1);
    assert_eq!(metrics.conversion_rate, 33.3);
    assert_eq!(metrics.avg_recruitment_time, 20);
    assert_eq!(metrics.avg_hr_time, 5);

    let departments: Vec<(&str, usize)> = metrics
        .positions_by_department
        .iter()
        .map(|entry| (entry.department.as_str(), entry.count))
        .collect();
    assert_eq!(
        departments,
        vec![("Tecnologia", 1), ("Operações", 1), ("Comercial", 1)]
    );

    let statuses: Vec<PositionStatus> = metrics
        .positions_by_status
        .iter()
        .map(|entry| entry.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            PositionStatus::Open,
            PositionStatus::Completed,
            PositionStatus::Cancelled
        ]
    );
}

#[test]
fn timeline_counts_openings_and_closings_per_month() {
    let positions = positions(MIXED_POSITIONS);
    let metrics = MetricsAggregator::dashboard(&positions, today());

    assert_eq!(
        metrics.timeline_data,
        vec![
            entry("2026-01", 1, 0),
            entry("2026-02", 0, 1),
            entry("2026-03", 1, 0),
            entry("2026-04", 0, 1),
            entry("2026-05", 1, 0),
            entry("2026-06", 0, 0),
        ]
    );
}

#[test]
fn status_filter_keeps_only_open_positions() {
    let positions = positions(MIXED_POSITIONS);
    let options = FilterOptions {
        status: vec![PositionStatus::Open],
        ..FilterOptions::default()
    };

    let filtered = PositionFilter::compile(&options, "").apply(&positions);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id.0, "p-open");

    let metrics = MetricsAggregator::dashboard(filtered, today());
    assert_eq!(metrics.total_positions, 1);
    assert_eq!(metrics.conversion_rate, 0.0);
}

#[test]
fn empty_dataset_yields_zeroes_and_a_full_timeline() {
    let none: Vec<Position> = Vec::new();
    let metrics = MetricsAggregator::dashboard(&none, today());

    assert_eq!(metrics.total_positions, 0);
    assert_eq!(metrics.active_positions, 0);
    assert_eq!(metrics.avg_recruitment_time, 0);
    assert_eq!(metrics.conversion_rate, 0.0);
    assert!(metrics.positions_by_department.is_empty());
    assert!(metrics.positions_by_status.is_empty());

    let months: Vec<&str> = metrics
        .timeline_data
        .iter()
        .map(|entry| entry.month.as_str())
        .collect();
    assert_eq!(
        months,
        vec!["2026-01", "2026-02", "2026-03", "2026-04", "2026-05", "2026-06"]
    );
    assert!(metrics
        .timeline_data
        .iter()
        .all(|entry| entry.opened == 0 && entry.closed == 0));
}

#[test]
fn average_durations_round_half_up_and_skip_missing_values() {
    let positions = positions(
        "\
a,A-1,Analista,Tecnologia,Recife,completed,external,tactical,clt,other,internal,,2026-02-01,Dir,Ana,Bia,Site,Requisito qualquer,10,3,2026-03-01\n\
b,B-1,Analista,Tecnologia,Recife,completed,external,tactical,clt,other,internal,,2026-02-01,Dir,Ana,Bia,Site,Requisito qualquer,11,4,2026-03-02\n\
c,C-1,Analista,Tecnologia,Recife,in_progress,external,tactical,clt,other,internal,,2026-02-01,Dir,Ana,Bia,Site,Requisito qualquer,,,\n",
    );

    let metrics = MetricsAggregator::dashboard(&positions, today());
    assert_eq!(metrics.avg_recruitment_time, 11);
    assert_eq!(metrics.avg_hr_time, 4);
    assert_eq!(metrics.conversion_rate, 66.7);
}

#[test]
fn candidate_metrics_cover_every_stage_and_rank_sources() {
    let candidates = candidates(
        "\
c1,P,Ana,ana@example.com,,linkedin,applied,8,2026-05-02\n\
c2,P,Bia,bia@example.com,,referral,screening,7,2026-05-03\n\
c3,P,Caio,caio@example.com,,referral,screening,,2026-05-04\n\
c4,P,Duda,duda@example.com,,website,rejected,6.5,2026-05-05\n",
    );

    let metrics = MetricsAggregator::candidates(&candidates);
    assert_eq!(metrics.total_candidates, 4);
    assert_eq!(metrics.candidates_by_stage.len(), 9);

    let screening = metrics
        .candidates_by_stage
        .iter()
        .find(|entry| entry.stage == CandidateStage::Screening)
        .expect("screening bucket");
    assert_eq!(screening.count, 2);
    assert_eq!(metrics.candidates_by_stage[8].stage, CandidateStage::Rejected);
    assert_eq!(metrics.candidates_by_stage[8].count, 1);

    assert_eq!(metrics.top_sources[0].source, CandidateSource::Referral);
    assert_eq!(metrics.top_sources[0].count, 2);
    assert_eq!(metrics.average_score, Some(7.2));
}
