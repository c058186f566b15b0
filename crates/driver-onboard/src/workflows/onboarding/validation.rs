use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::catalog;
use super::domain::{OnboardingStep, PhotoKind};
use super::state::ApplicationState;

/// Field-keyed error messages produced by a validation pass. Empty map means
/// the step is ready to leave.
pub type FieldErrors = BTreeMap<String, String>;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern"))
}

/// Run the validator guarding the given step. Pure: the same state always
/// yields the same error map, and nothing is mutated.
pub fn validate_step(state: &ApplicationState, step: OnboardingStep) -> FieldErrors {
    match step {
        OnboardingStep::Profile => validate_profile(state),
        OnboardingStep::Documents => validate_documents(state),
        OnboardingStep::LiveCapture => validate_photos(state),
        // The review step has no field validator; its only gate is the
        // terms checkbox, enforced at submission time.
        OnboardingStep::Review => FieldErrors::new(),
    }
}

fn validate_profile(state: &ApplicationState) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let profile = state.profile();
    let vehicle = state.vehicle();

    if profile.full_name.trim().is_empty() {
        errors.insert(
            "full_name".to_string(),
            "Full name is required".to_string(),
        );
    }

    if !email_pattern().is_match(profile.email.trim()) {
        errors.insert(
            "email".to_string(),
            "A valid email address is required".to_string(),
        );
    }

    let digits: String = profile
        .phone
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if !phone_pattern().is_match(&digits) {
        errors.insert(
            "phone".to_string(),
            "Phone number must be 10-15 digits, optionally starting with +".to_string(),
        );
    }

    if vehicle.registration.trim().is_empty() {
        errors.insert(
            "vehicle_registration".to_string(),
            "Vehicle registration number is required".to_string(),
        );
    }

    if vehicle.make_model_year.trim().is_empty() {
        errors.insert(
            "vehicle_make_model_year".to_string(),
            "Vehicle make, model, and year are required".to_string(),
        );
    }

    if catalog::requires_license_number(state.tier())
        && profile.license_number.trim().is_empty()
    {
        errors.insert(
            "license_number".to_string(),
            "SLTDA license number is required for this tier".to_string(),
        );
    }

    errors
}

fn validate_documents(state: &ApplicationState) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let required = catalog::required_documents(state.tier()).len();
    let attached = state.documents().len();

    // The quota is a count, never a per-kind match: uploads kept from an
    // earlier tier choice still satisfy it.
    if attached < required {
        errors.insert(
            "documents".to_string(),
            format!("{attached} of {required} required documents attached"),
        );
    }

    errors
}

fn validate_photos(state: &ApplicationState) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for kind in PhotoKind::mandatory() {
        if !state.photos().contains_key(&kind) {
            errors.insert(
                kind.storage_key().to_string(),
                format!("{} capture is required", kind.label()),
            );
        }
    }

    errors
}
