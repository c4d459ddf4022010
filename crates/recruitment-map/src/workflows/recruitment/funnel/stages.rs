use super::super::domain::CandidateStage;
use serde::Serialize;

/// One column of the recruiting funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunnelStage {
    pub id: CandidateStage,
    pub name: &'static str,
    /// Position in the funnel, 1-based. `None` for stages outside the ordered funnel.
    pub order: Option<u8>,
    pub terminal: bool,
}

const ORDERED: [FunnelStage; 8] = [
    stage(CandidateStage::Applied, "Aplicaram", 1),
    stage(CandidateStage::Screening, "Triagem", 2),
    stage(CandidateStage::PhoneInterview, "Entrevista Telefônica", 3),
    stage(CandidateStage::TechnicalTest, "Teste Técnico", 4),
    stage(CandidateStage::InPersonInterview, "Entrevista Presencial", 5),
    stage(CandidateStage::FinalInterview, "Entrevista Final", 6),
    stage(CandidateStage::OfferMade, "Proposta Enviada", 7),
    stage(CandidateStage::Hired, "Contratado", 8),
];

const REJECTED: FunnelStage = FunnelStage {
    id: CandidateStage::Rejected,
    name: "Rejeitado",
    order: None,
    terminal: false,
};

const fn stage(id: CandidateStage, name: &'static str, order: u8) -> FunnelStage {
    FunnelStage {
        id,
        name,
        order: Some(order),
        terminal: order as usize == ORDERED_LEN,
    }
}

const ORDERED_LEN: usize = 8;

/// Static catalog of funnel stages.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageRegistry;

impl StageRegistry {
    /// The eight ordered stages, `applied` first and `hired` last.
    pub const fn stages() -> &'static [FunnelStage; ORDERED_LEN] {
        &ORDERED
    }

    /// Ordered stages followed by the out-of-band `rejected` stage.
    pub fn all() -> impl Iterator<Item = FunnelStage> {
        ORDERED.into_iter().chain(std::iter::once(REJECTED))
    }

    pub const fn rejected() -> FunnelStage {
        REJECTED
    }

    pub fn get(id: CandidateStage) -> FunnelStage {
        match id {
            CandidateStage::Rejected => REJECTED,
            other => ORDERED
                .into_iter()
                .find(|entry| entry.id == other)
                .unwrap_or(REJECTED),
        }
    }

    /// Stage whose order is one above `id`; `None` for the terminal stage and for `rejected`.
    pub fn stage_after(id: CandidateStage) -> Option<FunnelStage> {
        let order = Self::get(id).order?;
        ORDERED
            .into_iter()
            .find(|entry| entry.order == Some(order + 1))
    }
}

impl CandidateStage {
    pub fn name(self) -> &'static str {
        StageRegistry::get(self).name
    }

    pub fn order(self) -> Option<u8> {
        StageRegistry::get(self).order
    }
}
