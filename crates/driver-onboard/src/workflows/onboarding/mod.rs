//! Driver and guide onboarding: tiered document requirements, the four-step
//! application state machine, completion scoring, and the multi-resource
//! submission orchestrator.

pub mod catalog;
pub mod domain;
pub mod progress;
pub mod router;
pub mod service;
pub mod state;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{required_documents, requires_license_number, tier_catalog, TierProfile};
pub use domain::{
    ApplicantId, BankDetails, DocumentKind, EmergencyContact, FileHandle, FileRejection,
    OnboardingStep, PartnerTier, PersonalProfile, PhotoKind, UploadPolicy, VehicleDetails,
    VehicleType, VerificationStatus, DEFAULT_MAX_UPLOAD_BYTES,
};
pub use progress::{completion, completion_breakdown, CompletionBreakdown, DomainProgress};
pub use router::onboarding_router;
pub use service::{ApplicationUpdate, OnboardingService, SessionError};
pub use state::{
    ApplicationSnapshot, ApplicationState, NavigationError, NavigationOutcome, ProfileUpdate,
    VehicleUpdate,
};
pub use submission::{
    MediaKind, MediaReference, MediaStore, ProfilePatch, ProfileRecord, ProfileStore,
    ResourceOutcome, ResourceResult, StoreError, SubmissionOrchestrator, SubmissionRefusal,
    SubmissionReport, SubmissionResource, SubmissionSettings, WalletService,
};
pub use validation::{validate_step, FieldErrors};
