use super::common::*;
use crate::workflows::onboarding::domain::{OnboardingStep, PartnerTier};
use crate::workflows::onboarding::state::{ApplicationState, NavigationError};

#[test]
fn next_is_blocked_by_a_failing_validator() {
    let mut state = ApplicationState::new(PartnerTier::FreelanceDriver);

    let outcome = state.next();
    assert!(!outcome.moved);
    assert_eq!(state.current_step(), OnboardingStep::Profile);
    assert!(!state.errors().is_empty());
}

#[test]
fn next_clears_stored_errors_on_success() {
    let mut state = filled_profile_state(PartnerTier::FreelanceDriver);

    // Force an error map first by failing the documents step later on.
    assert!(state.next().moved);
    assert!(!state.next().moved);
    assert!(!state.errors().is_empty());

    attach_required_documents(&mut state);
    assert!(state.next().moved);
    assert!(state.errors().is_empty());
    assert_eq!(state.current_step(), OnboardingStep::LiveCapture);
}

#[test]
fn next_never_advances_past_the_review_step() {
    let mut state = review_ready_state(PartnerTier::FreelanceDriver);
    assert_eq!(state.current_step(), OnboardingStep::Review);

    let outcome = state.next();
    assert_eq!(outcome.step, OnboardingStep::Review);
    assert_eq!(state.current_step(), OnboardingStep::Review);
}

#[test]
fn back_is_unconditional_and_floors_at_step_one() {
    let mut state = ApplicationState::new(PartnerTier::FreelanceDriver);

    let outcome = state.back();
    assert!(outcome.moved);
    assert_eq!(state.current_step(), OnboardingStep::Profile);
}

#[test]
fn back_retains_entered_data_and_stored_errors() {
    let mut state = filled_profile_state(PartnerTier::TouristDriver);
    assert!(state.next().moved);

    // Fail the documents step to populate the error map.
    assert!(!state.next().moved);
    let errors_before = state.errors().clone();

    state.back();
    assert_eq!(state.current_step(), OnboardingStep::Profile);
    assert_eq!(state.errors(), &errors_before, "back never revalidates");
    assert_eq!(state.profile().full_name, "Nimal Perera");
}

#[test]
fn back_then_next_round_trip_reproduces_the_error_map() {
    let mut state = filled_profile_state(PartnerTier::TouristDriver);
    assert!(state.next().moved);
    let blocked = state.next();
    assert!(!blocked.moved);

    state.back();
    let replay = state.next();
    assert!(replay.moved, "profile step is still valid");
    assert_eq!(state.current_step(), OnboardingStep::Documents);

    let blocked_again = state.next();
    assert!(!blocked_again.moved);
    assert_eq!(
        blocked_again.errors, blocked.errors,
        "deterministic validator yields the same error map after the round trip"
    );
}

#[test]
fn jump_to_a_visited_step_is_permitted() {
    let mut state = review_ready_state(PartnerTier::FreelanceDriver);
    assert_eq!(state.current_step(), OnboardingStep::Review);

    state
        .jump_to(OnboardingStep::Profile)
        .expect("earlier steps stay reachable");
    assert_eq!(state.current_step(), OnboardingStep::Profile);

    // The review step was already reached, so jumping forward to it again
    // is allowed.
    state
        .jump_to(OnboardingStep::Review)
        .expect("previously reached step stays reachable");
    assert_eq!(state.current_step(), OnboardingStep::Review);
}

#[test]
fn jump_to_an_unreached_step_is_refused() {
    let mut state = ApplicationState::new(PartnerTier::FreelanceDriver);

    match state.jump_to(OnboardingStep::LiveCapture) {
        Err(NavigationError::StepNotReached { requested }) => {
            assert_eq!(requested, OnboardingStep::LiveCapture);
        }
        other => panic!("expected refusal, got {other:?}"),
    }
    assert_eq!(state.current_step(), OnboardingStep::Profile);
}

#[test]
fn step_numbering_round_trips() {
    for step in OnboardingStep::ordered() {
        assert_eq!(OnboardingStep::from_number(step.number()), Some(step));
    }
    assert_eq!(OnboardingStep::from_number(0), None);
    assert_eq!(OnboardingStep::from_number(5), None);
}
