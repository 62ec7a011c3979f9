use crate::capture::{CaptureConfig, CaptureSurface, EncodedImage, RegionSize};
use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Capture region used before the presentation layer reports a real size.
pub const DEFAULT_PEN_REGION: RegionSize = RegionSize::new(600, 400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrescriptionMode {
    #[default]
    Template,
    Photo,
    Pen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub duration: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl Medication {
    pub fn new(name: &str, dosage: &str, duration: &str) -> Self {
        Self {
            name: name.to_owned(),
            dosage: dosage.to_owned(),
            duration: duration.to_owned(),
            instructions: String::new(),
            active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateForm {
    pub template_name: String,
    pub chief_complaint: String,
    pub diagnosis: String,
    pub instructions: String,
    pub medications: Vec<Medication>,
}

impl Default for TemplateForm {
    fn default() -> Self {
        Self {
            template_name: "Acne Treatment (Standard)".into(),
            chief_complaint: "Acne breakout on face".into(),
            diagnosis: "Acne Vulgaris (Moderate)".into(),
            instructions: "Avoid direct sunlight. Wash face twice daily.".into(),
            medications: vec![
                Medication::new("Doxycycline 100mg Capsules", "2 times daily", "7 days"),
                Medication::new("Benzoyl Peroxide Gel 2.5%", "Apply at night", "30 days"),
            ],
        }
    }
}

impl TemplateForm {
    /// Flips a medication on or off. Returns the new state, or `None` for a bad index.
    pub fn toggle_medication(&mut self, index: usize) -> Option<bool> {
        let medication = self.medications.get_mut(index)?;
        medication.active = !medication.active;
        Some(medication.active)
    }

    pub fn add_medication(&mut self, medication: Medication) {
        self.medications.push(medication);
    }

    pub fn active_medications(&self) -> Vec<Medication> {
        self.medications.iter().filter(|m| m.active).cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoCapture {
    image: Option<EncodedImage>,
}

impl PhotoCapture {
    pub fn capture(&mut self, image: EncodedImage) {
        self.image = Some(image);
    }

    pub fn retake(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        self.image.as_ref()
    }
}

/// Finished prescription handed to review.
#[derive(Debug, Clone, PartialEq)]
pub struct Prescription {
    pub patient_id: String,
    pub mode: PrescriptionMode,
    pub diagnosis: String,
    pub medications: Vec<Medication>,
    pub instructions: String,
    pub photo: Option<EncodedImage>,
    pub pen: Option<EncodedImage>,
    pub created_at: DateTime<Local>,
}

/// Everything the doctor is editing for one patient's prescription.
#[derive(Debug, Clone)]
pub struct ConsultationWorkspace {
    patient_id: String,
    mode: PrescriptionMode,
    pub form: TemplateForm,
    pub photo: PhotoCapture,
    pub surface: CaptureSurface,
}

impl ConsultationWorkspace {
    pub fn new(patient_id: &str, capture: CaptureConfig) -> Self {
        Self {
            patient_id: patient_id.to_owned(),
            mode: PrescriptionMode::default(),
            form: TemplateForm::default(),
            photo: PhotoCapture::default(),
            surface: CaptureSurface::new(DEFAULT_PEN_REGION, capture),
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn mode(&self) -> PrescriptionMode {
        self.mode
    }

    /// Switching modes keeps whatever was entered in the others.
    pub fn select_mode(&mut self, mode: PrescriptionMode) {
        if self.mode != mode {
            tracing::debug!(from = ?self.mode, to = ?mode, "prescription mode changed");
            self.mode = mode;
        }
    }

    /// Builds the prescription for the selected mode without consuming any input.
    pub fn send(&self) -> Result<Prescription> {
        let (photo, pen) = match self.mode {
            PrescriptionMode::Template => (None, None),
            PrescriptionMode::Photo => match self.photo.image() {
                Some(image) => (Some(image.clone()), None),
                None => bail!("no prescription photo captured"),
            },
            PrescriptionMode::Pen => {
                if !self.surface.has_ink()? {
                    bail!("handwritten prescription is empty");
                }
                (None, Some(self.surface.export_snapshot()?))
            }
        };

        Ok(Prescription {
            patient_id: self.patient_id.clone(),
            mode: self.mode,
            diagnosis: self.form.diagnosis.clone(),
            medications: self.form.active_medications(),
            instructions: self.form.instructions.clone(),
            photo,
            pen,
            created_at: Local::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{Contact, PointerKind, Tool};

    fn workspace() -> ConsultationWorkspace {
        ConsultationWorkspace::new("ZN001", CaptureConfig::default())
    }

    #[test]
    fn template_send_keeps_only_active_medications() {
        let mut workspace = workspace();
        assert_eq!(workspace.form.toggle_medication(1), Some(false));
        assert_eq!(workspace.form.toggle_medication(9), None);
        let rx = workspace.send().expect("send");
        assert_eq!(rx.mode, PrescriptionMode::Template);
        assert_eq!(rx.medications.len(), 1);
        assert_eq!(rx.medications[0].name, "Doxycycline 100mg Capsules");
        assert_eq!(rx.diagnosis, "Acne Vulgaris (Moderate)");
    }

    #[test]
    fn photo_mode_requires_a_capture() {
        let mut workspace = workspace();
        workspace.select_mode(PrescriptionMode::Photo);
        assert!(workspace.send().is_err());

        let photo = EncodedImage {
            width: 1,
            height: 1,
            png: vec![1, 2, 3],
        };
        workspace.photo.capture(photo.clone());
        assert_eq!(workspace.send().expect("send").photo, Some(photo));

        workspace.photo.retake();
        assert!(workspace.photo.image().is_none());
    }

    #[test]
    fn pen_mode_exports_the_surface() {
        let mut workspace = workspace();
        workspace.select_mode(PrescriptionMode::Pen);
        assert!(workspace.send().is_err());

        let pen = Contact::new(1, PointerKind::Pen, (10.0, 10.0));
        workspace.surface.on_contact_down(&pen);
        workspace.surface.on_contact_move(&pen.moved_to((80.0, 40.0)));
        workspace.surface.on_contact_up(&pen);

        let rx = workspace.send().expect("send");
        let snapshot = rx.pen.expect("pen snapshot");
        assert_eq!((snapshot.width, snapshot.height), (1200, 800));
        assert!(rx.photo.is_none());
    }

    #[test]
    fn pen_mode_refuses_fully_erased_surface() {
        let mut workspace = workspace();
        workspace.select_mode(PrescriptionMode::Pen);
        let pen = Contact::new(1, PointerKind::Pen, (10.0, 10.0));
        workspace.surface.on_contact_down(&pen);
        workspace.surface.on_contact_move(&pen.moved_to((40.0, 10.0)));
        workspace.surface.on_contact_up(&pen);

        workspace.surface.set_tool(Tool::Eraser);
        workspace.surface.on_contact_down(&pen);
        workspace.surface.on_contact_move(&pen.moved_to((40.0, 10.0)));
        workspace.surface.on_contact_up(&pen);

        assert!(workspace.send().is_err());
    }

    #[test]
    fn mode_switch_keeps_other_inputs() {
        let mut workspace = workspace();
        workspace.form.diagnosis = "Contact dermatitis".into();
        workspace.select_mode(PrescriptionMode::Pen);
        workspace.select_mode(PrescriptionMode::Template);
        assert_eq!(workspace.send().expect("send").diagnosis, "Contact dermatitis");
    }
}
