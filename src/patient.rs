use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Waiting,
    Scheduled,
    Completed,
}

/// Patient record as supplied by the clinic's data source. Never mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub status: PatientStatus,
    /// Minutes in the queue; only meaningful while `status` is `Waiting`.
    #[serde(default)]
    pub wait_minutes: Option<u32>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub last_visit: Option<String>,
}

impl Patient {
    pub fn new(id: &str, name: &str, age: u32, gender: Gender, status: PatientStatus) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            age,
            gender,
            status,
            wait_minutes: None,
            allergies: Vec::new(),
            last_visit: None,
        }
    }

    pub fn waiting(mut self, minutes: u32) -> Self {
        self.wait_minutes = Some(minutes);
        self
    }

    pub fn with_allergy(mut self, allergy: &str) -> Self {
        self.allergies.push(allergy.to_owned());
        self
    }

    pub fn with_last_visit(mut self, last_visit: &str) -> Self {
        self.last_visit = Some(last_visit.to_owned());
        self
    }

    pub fn wait_time(&self) -> Option<u32> {
        match self.status {
            PatientStatus::Waiting => self.wait_minutes,
            PatientStatus::Scheduled | PatientStatus::Completed => None,
        }
    }

    /// Short label used by headers, e.g. `Priya Sharma (ZN001)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// Mock clinic queue used in place of a real patient service.
pub fn roster() -> Vec<Patient> {
    use Gender::*;
    use PatientStatus::*;
    vec![
        Patient::new("ZN001", "Priya Sharma", 28, Female, Waiting)
            .waiting(10)
            .with_allergy("Penicillin"),
        Patient::new("ZN045", "Rajesh Kumar", 35, Male, Scheduled).with_last_visit("2025-11-10"),
        Patient::new("ZN023", "Anita Desai", 42, Female, Scheduled).with_last_visit("New Patient"),
        Patient::new("ZN089", "Vikram Singh", 55, Male, Scheduled).with_last_visit("2025-10-05"),
        Patient::new("ZN092", "Meera Patel", 31, Female, Scheduled).with_last_visit("2025-11-01"),
        Patient::new("ZN104", "Sanjay Gupta", 45, Male, Scheduled).with_last_visit("New Patient"),
    ]
}

pub fn find_by_id(id: &str) -> Option<Patient> {
    roster().into_iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Case-insensitive match on name or id. An empty query returns everyone.
pub fn search(query: &str) -> Vec<Patient> {
    let needle = query.trim().to_lowercase();
    roster()
        .into_iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.id.to_lowercase().contains(&needle)
        })
        .collect()
}
