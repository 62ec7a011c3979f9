use doctor_panel::capture::{Contact, HeadlessDisplay, PointerKind};
use doctor_panel::consultation::PrescriptionMode;
use doctor_panel::nav::{BottomNavItem, PharmacyStatus, Screen, ScreenView, TaskEvent};
use doctor_panel::patient::find_by_id;
use doctor_panel::{DoctorPanel, PanelSettings};
use std::time::{Duration, Instant};

fn panel() -> DoctorPanel {
    DoctorPanel::new(PanelSettings::default(), Box::new(HeadlessDisplay::default()))
}

fn open_consultation(panel: &mut DoctorPanel, id: &str, now: Instant) {
    panel.login(now);
    panel.navigate(Screen::PatientOverview, find_by_id(id), now);
    panel.navigate(Screen::ConsultationSession, None, now);
    panel.navigate(Screen::Consultation, None, now);
}

#[test]
fn consultation_to_success_for_priya() {
    let mut panel = panel();
    let t0 = Instant::now();
    open_consultation(&mut panel, "ZN001", t0);

    let workspace = panel.workspace_mut().expect("workspace open");
    workspace.select_mode(PrescriptionMode::Pen);
    let pen = Contact::new(1, PointerKind::Pen, (20.0, 20.0));
    workspace.surface.on_contact_down(&pen);
    workspace.surface.on_contact_move(&pen.moved_to((120.0, 60.0)));
    workspace.surface.on_contact_up(&pen);

    panel.send_prescription(t0).expect("send");
    match panel.view() {
        ScreenView::Review {
            patient,
            prescription: Some(rx),
        } => {
            assert_eq!(patient.id, "ZN001");
            assert_eq!(rx.mode, PrescriptionMode::Pen);
            assert!(rx.pen.is_some());
        }
        other => panic!("expected review, got {other:?}"),
    }

    panel.confirm_review(t0).expect("confirm");
    assert_eq!(panel.view().screen(), Screen::Success);
    assert_eq!(panel.tasks().pharmacy_status(), Some(PharmacyStatus::Preparing));
    assert_eq!(
        panel.tick(t0 + Duration::from_secs(5)),
        vec![TaskEvent::PharmacyReady]
    );

    panel.assign_treatment(t0).expect("assign");
    assert_eq!(panel.view().screen(), Screen::TreatmentAssignment);
    panel.finish_treatment(t0).expect("finish");
    assert_eq!(panel.nav().current_screen(), Screen::Dashboard);
    assert!(panel
        .tick(t0 + Duration::from_secs(60))
        .iter()
        .all(|event| !matches!(event, TaskEvent::RedirectDue(_))));
}

#[test]
fn back_from_review_returns_to_consultation_in_every_mode() {
    for mode in [
        PrescriptionMode::Template,
        PrescriptionMode::Photo,
        PrescriptionMode::Pen,
    ] {
        let mut panel = panel();
        let now = Instant::now();
        open_consultation(&mut panel, "ZN045", now);
        panel.workspace_mut().expect("workspace").select_mode(mode);
        panel.navigate(Screen::Review, None, now);

        let transition = panel.back(now).expect("review has a back target");
        assert_eq!(transition.to, Screen::Consultation);
        assert_eq!(panel.view().screen(), Screen::Consultation);
        assert_eq!(panel.workspace().map(|ws| ws.mode()), Some(mode));
    }
}

#[test]
fn patient_survives_detour_through_agnostic_screens() {
    let mut panel = panel();
    let now = Instant::now();
    panel.login(now);
    panel.navigate(Screen::PatientOverview, find_by_id("ZN001"), now);
    panel.bottom_nav(BottomNavItem::Settings, now);
    panel.navigate(Screen::Help, None, now);
    panel.navigate(Screen::PatientOverview, None, now);

    assert_eq!(panel.view().patient().map(|p| p.name.as_str()), Some("Priya Sharma"));
}

#[test]
fn patient_scoped_screen_without_patient_shows_dashboard() {
    let mut panel = panel();
    let now = Instant::now();
    panel.login(now);
    panel.navigate(Screen::Settings, None, now);
    panel.navigate(Screen::PatientOverview, None, now);
    assert_eq!(panel.nav().current_screen(), Screen::PatientOverview);
    assert_eq!(panel.view(), ScreenView::Dashboard);
    assert!(panel.workspace().is_none());
}

#[test]
fn cancelled_redirect_keeps_success_screen() {
    let mut panel = panel();
    let t0 = Instant::now();
    open_consultation(&mut panel, "ZN001", t0);
    panel.send_prescription(t0).expect("send");
    panel.confirm_review(t0).expect("confirm");

    assert!(panel.cancel_redirect());
    panel.tick(t0 + Duration::from_secs(30));
    assert_eq!(panel.view().screen(), Screen::Success);
}

#[test]
fn leaving_success_cancels_its_redirect() {
    let mut panel = panel();
    let t0 = Instant::now();
    open_consultation(&mut panel, "ZN001", t0);
    panel.send_prescription(t0).expect("send");
    panel.confirm_review(t0).expect("confirm");

    panel.bottom_nav(BottomNavItem::Drafts, t0 + Duration::from_secs(2));
    assert!(panel.tick(t0 + Duration::from_secs(30)).is_empty());
    assert_eq!(panel.nav().current_screen(), Screen::Drafts);
}

#[test]
fn resumed_draft_opens_its_screen_with_patient() {
    let mut panel = panel();
    let now = Instant::now();
    panel.login(now);
    panel.bottom_nav(BottomNavItem::Drafts, now);

    let transition = panel.resume_draft(2, now).expect("draft 2");
    assert_eq!(transition.to, Screen::TreatmentAssignment);
    assert_eq!(panel.view().patient().map(|p| p.id.as_str()), Some("ZN045"));
    assert!(panel.resume_draft(99, now).is_none());
}

#[test]
fn session_clock_runs_only_on_session_screen() {
    let mut panel = panel();
    let t0 = Instant::now();
    panel.login(t0);
    panel.navigate(Screen::ConsultationSession, find_by_id("ZN023"), t0);
    assert_eq!(
        panel.session_clock(t0 + Duration::from_secs(65)).as_deref(),
        Some("00:01:05")
    );
    panel.navigate(Screen::Consultation, None, t0);
    assert_eq!(panel.session_clock(t0 + Duration::from_secs(65)), None);
}

#[test]
fn navigating_to_review_after_drawing_exposes_the_snapshot() {
    let mut panel = panel();
    let now = Instant::now();
    open_consultation(&mut panel, "ZN001", now);

    let workspace = panel.workspace_mut().expect("workspace open");
    workspace.select_mode(PrescriptionMode::Pen);
    let pen = Contact::new(3, PointerKind::Pen, (50.0, 50.0));
    workspace.surface.on_contact_down(&pen);
    workspace.surface.on_contact_move(&pen.moved_to((90.0, 70.0)));
    workspace.surface.on_contact_up(&pen);

    panel.navigate(Screen::Review, None, now);
    let ScreenView::Review {
        patient,
        prescription: Some(rx),
    } = panel.view()
    else {
        panic!("review should carry the staged prescription");
    };
    assert_eq!(patient.id, "ZN001");
    assert!(rx.pen.as_ref().is_some_and(|png| !png.is_empty()));
}

#[test]
fn review_drops_prescription_once_workspace_is_cleared() {
    let mut panel = panel();
    let now = Instant::now();
    open_consultation(&mut panel, "ZN001", now);

    let workspace = panel.workspace_mut().expect("workspace open");
    workspace.select_mode(PrescriptionMode::Pen);
    let pen = Contact::new(1, PointerKind::Pen, (30.0, 30.0));
    workspace.surface.on_contact_down(&pen);
    workspace.surface.on_contact_move(&pen.moved_to((100.0, 40.0)));
    workspace.surface.on_contact_up(&pen);
    panel.send_prescription(now).expect("send");

    panel.back(now).expect("back to consultation");
    panel.workspace_mut().expect("workspace kept").surface.clear();
    panel.navigate(Screen::Review, None, now);

    assert!(matches!(
        panel.view(),
        ScreenView::Review {
            prescription: None,
            ..
        }
    ));
    assert!(panel.confirm_review(now).is_err());
    assert_eq!(panel.nav().current_screen(), Screen::Review);
}
