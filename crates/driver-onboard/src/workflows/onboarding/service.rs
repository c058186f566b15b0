use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::domain::{
    ApplicantId, BankDetails, DocumentKind, EmergencyContact, FileHandle, FileRejection,
    OnboardingStep, PartnerTier, PhotoKind, UploadPolicy,
};
use super::state::{
    ApplicationSnapshot, ApplicationState, NavigationError, NavigationOutcome, ProfileUpdate,
    VehicleUpdate,
};
use super::submission::{
    MediaStore, ProfileStore, SubmissionOrchestrator, SubmissionRefusal, SubmissionReport,
    SubmissionSettings, WalletService,
};
use super::validation::FieldErrors;

/// Service owning the live onboarding sessions and the submission path.
///
/// Each applicant has at most one in-flight application; the session map is
/// the only shared state and every operation locks it for the duration of
/// the mutation. A fully successful submission removes the session, which is
/// the workflow's terminal transition.
pub struct OnboardingService<P, W, M> {
    sessions: Mutex<HashMap<ApplicantId, ApplicationState>>,
    orchestrator: SubmissionOrchestrator<P, W, M>,
    upload_policy: UploadPolicy,
}

/// Combined patch applied by the UI as fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationUpdate {
    pub tier: Option<PartnerTier>,
    pub profile: Option<ProfileUpdate>,
    pub vehicle: Option<VehicleUpdate>,
    pub emergency_contact: Option<EmergencyContact>,
    pub bank_details: Option<BankDetails>,
    pub agreed_to_terms: Option<bool>,
}

/// Error raised by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no onboarding session exists for this applicant")]
    NotFound,
    #[error(transparent)]
    File(#[from] FileRejection),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Refused(#[from] SubmissionRefusal),
}

impl<P, W, M> OnboardingService<P, W, M>
where
    P: ProfileStore + 'static,
    W: WalletService + 'static,
    M: MediaStore + 'static,
{
    pub fn new(
        profiles: Arc<P>,
        wallets: Arc<W>,
        media: Arc<M>,
        settings: SubmissionSettings,
        upload_policy: UploadPolicy,
    ) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            orchestrator: SubmissionOrchestrator::new(profiles, wallets, media, settings),
            upload_policy,
        }
    }

    /// Open (or resume) the applicant's session. A fresh session starts
    /// empty on the profile step with the requested tier.
    pub fn begin(&self, applicant: ApplicantId, tier: PartnerTier) -> ApplicationSnapshot {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions
            .entry(applicant)
            .or_insert_with(|| ApplicationState::new(tier))
            .snapshot()
    }

    pub fn snapshot(&self, applicant: &ApplicantId) -> Result<ApplicationSnapshot, SessionError> {
        self.with_session(applicant, |state| state.snapshot())
    }

    pub fn errors(&self, applicant: &ApplicantId) -> Result<FieldErrors, SessionError> {
        self.with_session(applicant, |state| state.errors().clone())
    }

    pub fn completion(&self, applicant: &ApplicantId) -> Result<u8, SessionError> {
        self.with_session(applicant, |state| state.completion().percent)
    }

    pub fn update(
        &self,
        applicant: &ApplicantId,
        update: ApplicationUpdate,
    ) -> Result<ApplicationSnapshot, SessionError> {
        self.with_session(applicant, |state| {
            if let Some(tier) = update.tier {
                state.set_tier(tier);
            }
            if let Some(profile) = update.profile {
                state.update_profile(profile);
            }
            if let Some(vehicle) = update.vehicle {
                state.update_vehicle(vehicle);
            }
            if let Some(contact) = update.emergency_contact {
                state.set_emergency_contact(Some(contact));
            }
            if let Some(details) = update.bank_details {
                state.set_bank_details(Some(details));
            }
            if let Some(agreed) = update.agreed_to_terms {
                state.set_agreed_to_terms(agreed);
            }
            state.snapshot()
        })
    }

    pub fn attach_document(
        &self,
        applicant: &ApplicantId,
        kind: DocumentKind,
        file: FileHandle,
    ) -> Result<ApplicationSnapshot, SessionError> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let state = sessions.get_mut(applicant).ok_or(SessionError::NotFound)?;
        state.attach_document(kind, file, &self.upload_policy)?;
        Ok(state.snapshot())
    }

    pub fn attach_photo(
        &self,
        applicant: &ApplicantId,
        kind: PhotoKind,
        file: FileHandle,
    ) -> Result<ApplicationSnapshot, SessionError> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let state = sessions.get_mut(applicant).ok_or(SessionError::NotFound)?;
        state.attach_photo(kind, file, &self.upload_policy)?;
        Ok(state.snapshot())
    }

    pub fn next(&self, applicant: &ApplicantId) -> Result<NavigationOutcome, SessionError> {
        self.with_session(applicant, |state| state.next())
    }

    pub fn back(&self, applicant: &ApplicantId) -> Result<NavigationOutcome, SessionError> {
        self.with_session(applicant, |state| state.back())
    }

    pub fn jump(
        &self,
        applicant: &ApplicantId,
        step: OnboardingStep,
    ) -> Result<NavigationOutcome, SessionError> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let state = sessions.get_mut(applicant).ok_or(SessionError::NotFound)?;
        Ok(state.jump_to(step)?)
    }

    /// Run the submission orchestrator against the applicant's session.
    ///
    /// A fully successful report consumes the session; a refusal or partial
    /// failure leaves it on the review step so the applicant can retry.
    pub fn submit(
        &self,
        applicant: &ApplicantId,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReport, SessionError> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let state = sessions.get(applicant).ok_or(SessionError::NotFound)?;

        let report = self.orchestrator.submit(applicant, state, submitted_at)?;
        if report.succeeded() {
            sessions.remove(applicant);
        }
        Ok(report)
    }

    fn with_session<T>(
        &self,
        applicant: &ApplicantId,
        operation: impl FnOnce(&mut ApplicationState) -> T,
    ) -> Result<T, SessionError> {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        let state = sessions.get_mut(applicant).ok_or(SessionError::NotFound)?;
        Ok(operation(state))
    }
}
