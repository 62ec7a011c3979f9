use crate::nav::screen::Screen;
use crate::patient::{find_by_id, Patient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    Prescription,
    Treatment,
    Notes,
}

impl DraftKind {
    /// Screen a resumed draft of this kind reopens.
    pub fn resume_screen(self) -> Screen {
        match self {
            DraftKind::Prescription => Screen::Consultation,
            DraftKind::Treatment => Screen::TreatmentAssignment,
            DraftKind::Notes => Screen::PatientOverview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: u32,
    pub patient: Patient,
    pub kind: DraftKind,
    pub progress: u8,
    pub saved: String,
}

/// Unfinished work the doctor can pick up again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBook {
    drafts: Vec<Draft>,
}

impl DraftBook {
    pub fn new(drafts: Vec<Draft>) -> Self {
        Self { drafts }
    }

    /// Drafts shown on first launch, built from the mock roster.
    pub fn seeded() -> Self {
        let seed = [
            (1, "ZN001", DraftKind::Prescription, 70, "15m ago"),
            (2, "ZN045", DraftKind::Treatment, 40, "2h ago"),
            (3, "ZN023", DraftKind::Notes, 80, "5h ago"),
            (4, "ZN089", DraftKind::Prescription, 10, "1d ago"),
            (5, "ZN104", DraftKind::Treatment, 60, "2d ago"),
        ];
        let drafts = seed
            .into_iter()
            .filter_map(|(id, patient_id, kind, progress, saved)| {
                Some(Draft {
                    id,
                    patient: find_by_id(patient_id)?,
                    kind,
                    progress,
                    saved: saved.to_owned(),
                })
            })
            .collect();
        Self { drafts }
    }

    pub fn drafts(&self) -> &[Draft] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Draft> {
        self.drafts.iter().find(|d| d.id == id)
    }

    pub fn delete(&mut self, id: u32) -> bool {
        let before = self.drafts.len();
        self.drafts.retain(|d| d.id != id);
        self.drafts.len() != before
    }

    pub fn clear_all(&mut self) {
        self.drafts.clear();
    }

    pub fn resume(&self, id: u32) -> Option<(Screen, Patient)> {
        let draft = self.get(id)?;
        Some((draft.kind.resume_screen(), draft.patient.clone()))
    }
}
