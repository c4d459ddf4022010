#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use recruitment_map::workflows::import::DatasetImporter;
use recruitment_map::workflows::recruitment::{
    Candidate, ExportError, ExportNotifier, ExportedReport, Position,
};

pub const POSITION_HEADER: &str = "id,position_code,job_title,department,location,status,recruitment_type,position_level,contract_type,request_type,service_type,salary,opening_date,approver,hr_responsible,manager_responsible,source_of_capture,requirements,recruitment_time,hr_process_duration,closed_on\n";

pub const CANDIDATE_HEADER: &str =
    "id,position_id,name,email,phone,source,current_stage,score,applied_at\n";

/// Three positions: one open, one completed, one cancelled.
pub const MIXED_POSITIONS: &str = "\
p-open,TI-001,Desenvolvedor Backend,Tecnologia,Recife,open,external,tactical,clt,headcount_increase,internal,8500,2026-05-02,Diretoria,Ana,Bruno,LinkedIn,Rust e PostgreSQL,,,\n\
p-done,OP-010,Instalador Solar,Operações,Caruaru,completed,internal,operational,clt,replacement,internal,3200,2026-03-10,Diretoria,Ana,Carla,Indicação,NR-10 e NR-35 em dia,20,5,2026-04-02\n\
p-cancel,CO-003,Executivo de Vendas,Comercial,Recife,cancelled,external,strategic,contractor,other,mixed,,2026-01-15,Diretoria,Ana,Davi,Site,Experiência com vendas B2B,,,2026-02-20\n";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 14, 5, 0)
        .single()
        .expect("valid timestamp")
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date")
}

pub fn positions(rows: &str) -> Vec<Position> {
    let csv = format!("{POSITION_HEADER}{rows}");
    DatasetImporter::positions_from_reader(Cursor::new(csv), now()).expect("positions fixture")
}

pub fn candidates(rows: &str) -> Vec<Candidate> {
    let csv = format!("{CANDIDATE_HEADER}{rows}");
    DatasetImporter::candidates_from_reader(Cursor::new(csv)).expect("candidates fixture")
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<ExportedReport>>,
    pub failures: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn successes(&self) -> Vec<ExportedReport> {
        self.successes.lock().expect("notifier mutex poisoned").clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ExportNotifier for RecordingNotifier {
    fn export_succeeded(&self, report: &ExportedReport) {
        self.successes
            .lock()
            .expect("notifier mutex poisoned")
            .push(report.clone());
    }

    fn export_failed(&self, kind: &str, error: &ExportError) {
        self.failures
            .lock()
            .expect("notifier mutex poisoned")
            .push(format!("{kind}: {error}"));
    }
}
