use crate::cli::{DashboardArgs, ExportArgs};
use crate::infra::build_service;
use chrono::Utc;
use recruitment_map::config::AppConfig;
use recruitment_map::error::AppError;
use recruitment_map::telemetry;
use recruitment_map::workflows::recruitment::DashboardView;

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let dataset = args.data.source().load(Utc::now())?;
    let service = build_service(&config, dataset);
    let today = args.filters.reference_date();
    let view = service.dashboard(&args.filters.options(), &args.filters.search, today)?;

    if args.json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &view)
            .map_err(std::io::Error::from)?;
        println!();
    } else {
        render_dashboard(&view, today);
    }
    Ok(())
}

pub(crate) async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(output_dir) = args.output_dir.clone() {
        config.reports.output_dir = output_dir;
    }
    telemetry::init(&config.telemetry)?;

    let dataset = args.data.source().load(Utc::now())?;
    let service = build_service(&config, dataset);
    let today = args.filters.reference_date();
    let snapshot = service.snapshot(&args.filters.options(), &args.filters.search, today)?;

    let report = service
        .exporter()
        .export_named(snapshot, &args.kind, &args.format, Utc::now())
        .await?;

    println!(
        "Relatório exportado: {} ({} linhas, {} bytes)",
        report.path.display(),
        report.rows,
        report.size_bytes
    );
    Ok(())
}

fn render_dashboard(view: &DashboardView, today: chrono::NaiveDate) {
    let metrics = &view.metrics;
    println!("Dashboard de recrutamento ({today})");
    if view.has_active_filters {
        println!("Filtros ativos aplicados");
    }

    println!("\nIndicadores");
    println!("- Total de vagas: {}", metrics.total_positions);
    println!("- Vagas ativas: {}", metrics.active_positions);
    println!("- Vagas finalizadas: {}", metrics.completed_positions);
    println!(
        "- Tempo médio de recrutamento: {} dias",
        metrics.avg_recruitment_time
    );
    println!("- Tempo médio RH: {} dias", metrics.avg_hr_time);
    println!("- Taxa de conversão: {}%", metrics.conversion_rate);

    if metrics.positions_by_department.is_empty() {
        println!("\nVagas por departamento: nenhuma");
    } else {
        println!("\nVagas por departamento");
        for entry in &metrics.positions_by_department {
            println!("- {}: {}", entry.department, entry.count);
        }
    }

    if !metrics.positions_by_status.is_empty() {
        println!("\nVagas por status");
        for entry in &metrics.positions_by_status {
            println!("- {}: {}", entry.status_label, entry.count);
        }
    }

    println!("\nEvolução mensal (abertas / fechadas)");
    for entry in &metrics.timeline_data {
        println!("- {}: {} / {}", entry.month, entry.opened, entry.closed);
    }

    let candidates = &view.candidates;
    println!("\nCandidatos: {}", candidates.total_candidates);
    for entry in candidates
        .candidates_by_stage
        .iter()
        .filter(|entry| entry.count > 0)
    {
        println!("- {}: {}", entry.stage_label, entry.count);
    }
    if let Some(score) = candidates.average_score {
        println!("Nota média: {score}");
    }
    if let Some(top) = candidates.top_sources.first() {
        println!("Principal fonte: {} ({})", top.source.as_str(), top.count);
    }
}
