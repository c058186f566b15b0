use super::common::*;
use crate::workflows::onboarding::domain::{DocumentKind, PartnerTier, PhotoKind, UploadPolicy};
use crate::workflows::onboarding::progress::completion;
use crate::workflows::onboarding::state::{ApplicationState, ProfileUpdate, VehicleUpdate};

#[test]
fn empty_application_scores_zero() {
    let state = ApplicationState::new(PartnerTier::FreelanceDriver);
    assert_eq!(completion(&state), 0);
}

#[test]
fn fully_filled_freelance_application_scores_one_hundred() {
    // Freelance drivers carry 4 required documents; with the 5 profile
    // fields and 2 mandatory captures that is 11 items in total.
    let mut state = filled_profile_state(PartnerTier::FreelanceDriver);
    attach_required_documents(&mut state);
    attach_mandatory_photos(&mut state);

    let breakdown = state.completion();
    assert_eq!(breakdown.profile.filled, 5);
    assert_eq!(breakdown.documents.filled, 4);
    assert_eq!(breakdown.photos.filled, 2);
    assert_eq!(breakdown.percent, 100);
}

#[test]
fn completion_is_monotonic_as_fields_fill() {
    let mut state = ApplicationState::new(PartnerTier::TouristDriver);
    let policy = UploadPolicy::default();
    let mut last = completion(&state);

    let fills: Vec<Box<dyn Fn(&mut ApplicationState)>> = vec![
        Box::new(|s| {
            s.update_profile(ProfileUpdate {
                full_name: Some("Kumari Silva".to_string()),
                ..ProfileUpdate::default()
            })
        }),
        Box::new(|s| {
            s.update_profile(ProfileUpdate {
                email: Some("kumari@example.com".to_string()),
                ..ProfileUpdate::default()
            })
        }),
        Box::new(|s| {
            s.update_profile(ProfileUpdate {
                phone: Some("+94712345678".to_string()),
                ..ProfileUpdate::default()
            })
        }),
        Box::new(|s| {
            s.update_vehicle(VehicleUpdate {
                registration: Some("SP CAR-9921".to_string()),
                ..VehicleUpdate::default()
            })
        }),
        Box::new(|s| {
            s.update_vehicle(VehicleUpdate {
                make_model_year: Some("Nissan Caravan 2020".to_string()),
                ..VehicleUpdate::default()
            })
        }),
    ];
    for fill in fills {
        fill(&mut state);
        let now = completion(&state);
        assert!(now >= last, "completion went backwards: {last} -> {now}");
        last = now;
    }

    for &kind in crate::workflows::onboarding::catalog::required_documents(state.tier()) {
        state
            .attach_document(kind, pdf("doc.pdf"), &policy)
            .expect("document accepted");
        let now = completion(&state);
        assert!(now >= last);
        last = now;
    }

    for kind in PhotoKind::mandatory() {
        state
            .attach_photo(kind, image("capture.jpg"), &policy)
            .expect("photo accepted");
        let now = completion(&state);
        assert!(now >= last);
        last = now;
    }

    assert_eq!(last, 100);
}

#[test]
fn document_domain_weight_scales_with_the_tier() {
    // Chauffeur guides have 7 required documents (14 items in total), so a
    // single document moves the needle less than it does for a freelance
    // driver (11 items). The domains are proportional, not fixed thirds.
    let policy = UploadPolicy::default();

    let mut chauffeur = ApplicationState::new(PartnerTier::ChauffeurGuide);
    chauffeur
        .attach_document(DocumentKind::NationalId, pdf("id.pdf"), &policy)
        .expect("document accepted");
    assert_eq!(completion(&chauffeur), 7); // round(100 * 1/14)

    let mut freelance = ApplicationState::new(PartnerTier::FreelanceDriver);
    freelance
        .attach_document(DocumentKind::NationalId, pdf("id.pdf"), &policy)
        .expect("document accepted");
    assert_eq!(completion(&freelance), 9); // round(100 * 1/11)
}

#[test]
fn optional_photos_do_not_move_completion() {
    let mut state = filled_profile_state(PartnerTier::FreelanceDriver);
    attach_required_documents(&mut state);
    attach_mandatory_photos(&mut state);
    let before = completion(&state);

    let policy = UploadPolicy::default();
    state
        .attach_photo(PhotoKind::VehicleInterior, image("interior.jpg"), &policy)
        .expect("photo accepted");
    state
        .attach_photo(PhotoKind::VideoIntro, video("intro.mp4"), &policy)
        .expect("video accepted");

    assert_eq!(completion(&state), before);
}

#[test]
fn surplus_documents_cap_at_the_requirement() {
    let mut state = ApplicationState::new(PartnerTier::FreelanceDriver);
    let policy = UploadPolicy::default();
    for kind in [
        DocumentKind::DrivingLicense,
        DocumentKind::NationalId,
        DocumentKind::VehicleRevenueLicense,
        DocumentKind::VehicleInsurance,
        DocumentKind::VehiclePermit,
        DocumentKind::MedicalReport,
    ] {
        state
            .attach_document(kind, pdf("doc.pdf"), &policy)
            .expect("document accepted");
    }

    let breakdown = state.completion();
    assert_eq!(breakdown.documents.required, 4);
    assert_eq!(breakdown.documents.filled, 4, "filled count caps at the requirement");
}
