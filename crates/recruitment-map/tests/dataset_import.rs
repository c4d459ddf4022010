mod support;

use std::io::Write;

use recruitment_map::workflows::import::{parse_date, DatasetImporter, ImportError};
use recruitment_map::workflows::recruitment::{
    FunnelEngine, MetricsAggregator, PositionId, PositionStatus,
};
use support::{now, today, CANDIDATE_HEADER, MIXED_POSITIONS, POSITION_HEADER};

fn write_csv(dir: &std::path::Path, name: &str, header: &str, rows: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("fixture file");
    file.write_all(header.as_bytes()).expect("header written");
    file.write_all(rows.as_bytes()).expect("rows written");
    path
}

#[test]
fn dataset_loads_from_csv_files_and_feeds_the_dashboard() {
    let dir = tempfile::tempdir().expect("temp dir");
    let positions = write_csv(dir.path(), "vagas.csv", POSITION_HEADER, MIXED_POSITIONS);
    let candidates = write_csv(
        dir.path(),
        "candidatos.csv",
        CANDIDATE_HEADER,
        "\
c1,p-open,Ana,ana@example.com,,linkedin,applied,8,2026-05-03\n\
c2,p-open,Bia,bia@example.com,,website,final_interview,9,2026-05-04\n\
c3,p-done,Caio,caio@example.com,,referral,hired,7.5,2026-03-15\n",
    );

    let dataset = DatasetImporter::from_paths(Some(&positions), Some(&candidates), now())
        .expect("dataset loads");
    assert_eq!(dataset.positions.len(), 3);
    assert_eq!(dataset.candidates.len(), 3);

    let cancelled = &dataset.positions[2];
    assert_eq!(cancelled.status, PositionStatus::Cancelled);
    assert_eq!(cancelled.closed_on, Some(parse_date("2026-02-20").expect("date")));
    assert_eq!(cancelled.created_at, now());

    let metrics = MetricsAggregator::dashboard(&dataset.positions, today());
    assert_eq!(metrics.total_positions, 3);

    let engine = FunnelEngine::new(dataset.candidates);
    let board = engine.board(&PositionId("p-open".to_string()));
    assert_eq!(board.iter().map(|column| column.count).sum::<usize>(), 2);
}

#[test]
fn missing_paths_produce_an_empty_dataset() {
    let dataset = DatasetImporter::from_paths(None, None, now()).expect("nothing to load");
    assert!(dataset.positions.is_empty());
    assert!(dataset.candidates.is_empty());
}

#[test]
fn unreadable_files_surface_io_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("ausente.csv");

    let error = DatasetImporter::from_paths(Some(&missing), None, now())
        .expect_err("missing file");
    assert!(matches!(error, ImportError::Io(_)));
}

#[test]
fn closing_dates_on_open_positions_are_dropped() {
    let dir = tempfile::tempdir().expect("temp dir");
    let positions = write_csv(
        dir.path(),
        "vagas.csv",
        POSITION_HEADER,
        "p9,TI-009,Suporte,Tecnologia,Recife,open,internal,operational,internship,other,internal,1500,2026-06-01,Dir,Ana,Bia,Site,Conhecimento em redes,,,2026-06-10\n",
    );

    let dataset =
        DatasetImporter::from_paths(Some(&positions), None, now()).expect("dataset loads");
    assert_eq!(dataset.positions[0].closed_on, None);
    assert_eq!(dataset.positions[0].salary, Some(1500.0));
}

#[test]
fn bad_dates_point_at_the_offending_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    let positions = write_csv(
        dir.path(),
        "vagas.csv",
        POSITION_HEADER,
        "\
p1,TI-001,Suporte,Tecnologia,Recife,open,internal,operational,clt,other,internal,,2026-06-01,Dir,Ana,Bia,Site,Conhecimento em redes,,,\n\
p2,TI-002,Suporte,Tecnologia,Recife,open,internal,operational,clt,other,internal,,01/06/2026,Dir,Ana,Bia,Site,Conhecimento em redes,,,\n",
    );

    let error =
        DatasetImporter::from_paths(Some(&positions), None, now()).expect_err("bad opening date");
    match error {
        ImportError::InvalidDate { line, field, value } => {
            assert_eq!(line, 3);
            assert_eq!(field, "opening_date");
            assert_eq!(value, "01/06/2026");
        }
        other => panic!("unexpected error: {other}"),
    }
}
