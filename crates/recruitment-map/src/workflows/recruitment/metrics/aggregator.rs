use super::super::domain::{Candidate, CandidateSource, Position, PositionStatus};
use super::super::funnel::StageRegistry;
use super::views::{
    CandidateMetrics, DashboardMetrics, DepartmentCount, SourceCount, StageCount, StatusCount,
    TimelineEntry,
};
use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashMap;

const TIMELINE_MONTHS: u32 = 6;

/// Pure reduction of position and candidate snapshots into dashboard figures.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// `today` anchors the trailing six-month timeline.
    pub fn dashboard<'a, I>(positions: I, today: NaiveDate) -> DashboardMetrics
    where
        I: IntoIterator<Item = &'a Position>,
    {
        let months = trailing_months(today);
        let mut timeline: Vec<TimelineEntry> = months
            .iter()
            .map(|month| TimelineEntry {
                month: month.format("%Y-%m").to_string(),
                opened: 0,
                closed: 0,
            })
            .collect();
        let month_slot: HashMap<(i32, u32), usize> = months
            .iter()
            .enumerate()
            .map(|(slot, month)| ((month.year(), month.month()), slot))
            .collect();

        let mut total_positions = 0;
        let mut active_positions = 0;
        let mut completed_positions = 0;
        let mut recruitment_days = Mean::default();
        let mut hr_days = Mean::default();
        let mut departments = FirstSeenCounter::default();
        let mut statuses = FirstSeenCounter::default();

        for position in positions {
            total_positions += 1;
            if position.status.is_active() {
                active_positions += 1;
            }
            if position.status == PositionStatus::Completed {
                completed_positions += 1;
            }

            recruitment_days.add(position.recruitment_time);
            hr_days.add(position.hr_process_duration);
            departments.add(position.department.clone());
            statuses.add(position.status);

            let opened = (position.opening_date.year(), position.opening_date.month());
            if let Some(slot) = month_slot.get(&opened) {
                timeline[*slot].opened += 1;
            }
            if let Some(closed_on) = position.closing_date() {
                if let Some(slot) = month_slot.get(&(closed_on.year(), closed_on.month())) {
                    timeline[*slot].closed += 1;
                }
            }
        }

        DashboardMetrics {
            total_positions,
            active_positions,
            completed_positions,
            avg_recruitment_time: recruitment_days.rounded_days(),
            avg_hr_time: hr_days.rounded_days(),
            conversion_rate: percentage(completed_positions, total_positions),
            positions_by_department: departments
                .into_counts()
                .into_iter()
                .map(|(department, count)| DepartmentCount { department, count })
                .collect(),
            positions_by_status: statuses
                .into_counts()
                .into_iter()
                .map(|(status, count)| StatusCount {
                    status,
                    status_label: status.label(),
                    count,
                })
                .collect(),
            timeline_data: timeline,
        }
    }

    pub fn candidates<'a, I>(candidates: I) -> CandidateMetrics
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        let mut total_candidates = 0;
        let mut stage_counts = HashMap::new();
        let mut sources: FirstSeenCounter<CandidateSource> = FirstSeenCounter::default();
        let mut score_total = 0.0_f64;
        let mut scored = 0_usize;

        for candidate in candidates {
            total_candidates += 1;
            *stage_counts.entry(candidate.current_stage).or_insert(0_usize) += 1;
            sources.add(candidate.source);
            if let Some(score) = candidate.score {
                score_total += f64::from(score);
                scored += 1;
            }
        }

        let candidates_by_stage = StageRegistry::all()
            .map(|stage| StageCount {
                stage: stage.id,
                stage_label: stage.name,
                count: stage_counts.get(&stage.id).copied().unwrap_or(0),
            })
            .collect();

        let mut top_sources: Vec<SourceCount> = sources
            .into_counts()
            .into_iter()
            .map(|(source, count)| SourceCount { source, count })
            .collect();
        top_sources.sort_by(|a, b| b.count.cmp(&a.count));

        let average_score = if scored == 0 {
            None
        } else {
            Some(round_one_decimal(score_total / scored as f64))
        };

        CandidateMetrics {
            total_candidates,
            candidates_by_stage,
            top_sources,
            average_score,
        }
    }
}

/// First day of each of the six months ending with `today`'s month, oldest first.
fn trailing_months(today: NaiveDate) -> Vec<NaiveDate> {
    let current = today.with_day(1).unwrap_or(today);
    (0..TIMELINE_MONTHS)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_one_decimal(part as f64 / whole as f64 * 100.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Running mean that ignores missing samples.
#[derive(Debug, Default)]
struct Mean {
    sum: u64,
    samples: u64,
}

impl Mean {
    fn add(&mut self, value: Option<u32>) {
        if let Some(value) = value {
            self.sum += u64::from(value);
            self.samples += 1;
        }
    }

    fn rounded_days(&self) -> u32 {
        if self.samples == 0 {
            return 0;
        }
        // Half-up on non-negative integers.
        let rounded = (self.sum * 2 + self.samples) / (self.samples * 2);
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }
}

/// Group-by counter that remembers the order keys were first observed in.
#[derive(Debug)]
struct FirstSeenCounter<K> {
    slots: HashMap<K, usize>,
    counts: Vec<(K, usize)>,
}

impl<K> Default for FirstSeenCounter<K> {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            counts: Vec::new(),
        }
    }
}

impl<K: Clone + Eq + std::hash::Hash> FirstSeenCounter<K> {
    fn add(&mut self, key: K) {
        match self.slots.get(&key) {
            Some(slot) => self.counts[*slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    fn into_counts(self) -> Vec<(K, usize)> {
        self.counts
    }
}
