use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::catalog;
use super::domain::{
    ApplicantId, BankDetails, DocumentKind, EmergencyContact, FileHandle, OnboardingStep,
    PartnerTier, PersonalProfile, PhotoKind, VehicleDetails, VerificationStatus,
};
use super::state::ApplicationState;

/// Remote partner-profile collaborator.
///
/// `upsert_profile` must be idempotent by applicant id so a retried
/// submission re-writes the same record instead of duplicating it.
pub trait ProfileStore: Send + Sync {
    fn upsert_profile(
        &self,
        applicant: &ApplicantId,
        record: &ProfileRecord,
    ) -> Result<(), StoreError>;

    fn patch_profile(
        &self,
        applicant: &ApplicantId,
        patch: &ProfilePatch,
    ) -> Result<(), StoreError>;
}

/// Wallet collaborator; a wallet is only ever initialized with a currency.
pub trait WalletService: Send + Sync {
    fn initialize_wallet(&self, applicant: &ApplicantId, currency: &str)
        -> Result<(), StoreError>;
}

/// Blob-store collaborator for documents and live captures.
///
/// Implementations derive the storage location from the applicant and the
/// media kind's stable key, so re-uploading the same kind overwrites rather
/// than accumulates.
pub trait MediaStore: Send + Sync {
    fn upload(
        &self,
        applicant: &ApplicantId,
        kind: MediaKind,
        file: &FileHandle,
    ) -> Result<MediaReference, StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Document(DocumentKind),
    Photo(PhotoKind),
}

impl MediaKind {
    pub const fn storage_key(self) -> &'static str {
        match self {
            MediaKind::Document(kind) => kind.storage_key(),
            MediaKind::Photo(kind) => kind.storage_key(),
        }
    }
}

/// Reference returned by the media store for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    pub reference_id: String,
    pub storage_path: String,
}

/// Failure surfaced by any collaborator call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("collaborator rejected the write: {0}")]
    Rejected(String),
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// The flattened profile write performed as the first submission step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub tier: PartnerTier,
    pub profile: PersonalProfile,
    pub vehicle: VehicleDetails,
    pub emergency_contact: Option<EmergencyContact>,
    pub bank_details: Option<BankDetails>,
    pub status: VerificationStatus,
    pub submitted_at: DateTime<Utc>,
    pub live_video_reference: Option<String>,
}

impl ProfileRecord {
    pub fn from_state(state: &ApplicationState, submitted_at: DateTime<Utc>) -> Self {
        Self {
            tier: state.tier(),
            profile: state.profile().clone(),
            vehicle: state.vehicle().clone(),
            emergency_contact: state.emergency_contact().cloned(),
            bank_details: state.bank_details().cloned(),
            status: VerificationStatus::PendingVerification,
            submitted_at,
            live_video_reference: None,
        }
    }
}

/// Partial follow-up write against an already upserted profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub live_video_reference: Option<String>,
}

/// One remote resource touched during submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionResource {
    Profile,
    Wallet,
    Document(DocumentKind),
    Photo(PhotoKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceOutcome {
    Succeeded {
        #[serde(skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
    },
    Failed {
        error: String,
    },
    /// Planned but never attempted because an earlier write failed.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceResult {
    pub resource: SubmissionResource,
    pub outcome: ResourceOutcome,
}

/// Per-resource account of a submission attempt.
///
/// Completed writes are never rolled back; on failure the report shows what
/// already landed so a retry can be judged safe.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub applicant: ApplicantId,
    pub submitted_at: DateTime<Utc>,
    pub resources: Vec<ResourceResult>,
}

impl SubmissionReport {
    pub fn succeeded(&self) -> bool {
        self.resources
            .iter()
            .all(|result| matches!(result.outcome, ResourceOutcome::Succeeded { .. }))
    }

    pub fn first_failure(&self) -> Option<&ResourceResult> {
        self.resources
            .iter()
            .find(|result| matches!(result.outcome, ResourceOutcome::Failed { .. }))
    }
}

/// Raised before any collaborator is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionRefusal {
    #[error("submission is only available from the review step (currently on {current:?})")]
    NotOnReviewStep { current: OnboardingStep },
    #[error("the terms of service have not been accepted")]
    TermsNotAccepted,
}

#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    pub wallet_currency: String,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            wallet_currency: "LKR".to_string(),
        }
    }
}

enum PlannedWrite {
    Profile,
    Wallet,
    Media {
        resource: SubmissionResource,
        kind: MediaKind,
        file: FileHandle,
    },
}

impl PlannedWrite {
    fn resource(&self) -> SubmissionResource {
        match self {
            PlannedWrite::Profile => SubmissionResource::Profile,
            PlannedWrite::Wallet => SubmissionResource::Wallet,
            PlannedWrite::Media { resource, .. } => *resource,
        }
    }
}

/// Persists a finished application through the external collaborators.
///
/// Writes run sequentially in a fixed order: the profile and wallet must
/// exist before any media references the applicant id. The first failure
/// aborts the remaining writes and is reported per resource.
pub struct SubmissionOrchestrator<P, W, M> {
    profiles: Arc<P>,
    wallets: Arc<W>,
    media: Arc<M>,
    settings: SubmissionSettings,
}

impl<P, W, M> SubmissionOrchestrator<P, W, M>
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
    ) -> Self {
        Self {
            profiles,
            wallets,
            media,
            settings,
        }
    }

    pub fn submit(
        &self,
        applicant: &ApplicantId,
        state: &ApplicationState,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReport, SubmissionRefusal> {
        if state.current_step() != OnboardingStep::Review {
            return Err(SubmissionRefusal::NotOnReviewStep {
                current: state.current_step(),
            });
        }
        if !state.agreed_to_terms() {
            return Err(SubmissionRefusal::TermsNotAccepted);
        }

        let plan = self.plan_writes(state);
        let record = ProfileRecord::from_state(state, submitted_at);

        info!(
            applicant = %applicant.0,
            tier = state.tier().label(),
            writes = plan.len(),
            "submitting application"
        );

        let mut resources = Vec::with_capacity(plan.len());
        let mut aborted = false;

        for write in plan {
            let resource = write.resource();
            if aborted {
                resources.push(ResourceResult {
                    resource,
                    outcome: ResourceOutcome::Skipped,
                });
                continue;
            }

            let outcome = self.execute(applicant, &record, write);
            if let ResourceOutcome::Failed { error } = &outcome {
                warn!(
                    applicant = %applicant.0,
                    resource = ?resource,
                    error = %error,
                    "submission write failed, aborting remaining writes"
                );
                aborted = true;
            }
            resources.push(ResourceResult { resource, outcome });
        }

        let report = SubmissionReport {
            applicant: applicant.clone(),
            submitted_at,
            resources,
        };

        if report.succeeded() {
            info!(applicant = %applicant.0, "application submitted for verification");
        }

        Ok(report)
    }

    fn plan_writes(&self, state: &ApplicationState) -> Vec<PlannedWrite> {
        let mut plan = vec![PlannedWrite::Profile, PlannedWrite::Wallet];

        // Only the current tier's required kinds are uploaded, in catalog
        // order; stray attachments from an earlier tier choice stay local.
        for &kind in catalog::required_documents(state.tier()) {
            if let Some(file) = state.documents().get(&kind) {
                plan.push(PlannedWrite::Media {
                    resource: SubmissionResource::Document(kind),
                    kind: MediaKind::Document(kind),
                    file: file.clone(),
                });
            }
        }

        for kind in PhotoKind::ordered() {
            if let Some(file) = state.photos().get(&kind) {
                plan.push(PlannedWrite::Media {
                    resource: SubmissionResource::Photo(kind),
                    kind: MediaKind::Photo(kind),
                    file: file.clone(),
                });
            }
        }

        plan
    }

    fn execute(
        &self,
        applicant: &ApplicantId,
        record: &ProfileRecord,
        write: PlannedWrite,
    ) -> ResourceOutcome {
        match write {
            PlannedWrite::Profile => match self.profiles.upsert_profile(applicant, record) {
                Ok(()) => ResourceOutcome::Succeeded { reference: None },
                Err(err) => ResourceOutcome::Failed {
                    error: err.to_string(),
                },
            },
            PlannedWrite::Wallet => {
                match self
                    .wallets
                    .initialize_wallet(applicant, &self.settings.wallet_currency)
                {
                    Ok(()) => ResourceOutcome::Succeeded { reference: None },
                    Err(err) => ResourceOutcome::Failed {
                        error: err.to_string(),
                    },
                }
            }
            PlannedWrite::Media { kind, file, .. } => {
                let reference = match self.media.upload(applicant, kind, &file) {
                    Ok(reference) => reference,
                    Err(err) => {
                        return ResourceOutcome::Failed {
                            error: err.to_string(),
                        }
                    }
                };

                // The intro video is additionally linked onto the profile
                // record so the directory can play it back.
                if let MediaKind::Photo(photo) = kind {
                    if photo.is_video() {
                        let patch = ProfilePatch {
                            live_video_reference: Some(reference.reference_id.clone()),
                        };
                        if let Err(err) = self.profiles.patch_profile(applicant, &patch) {
                            return ResourceOutcome::Failed {
                                error: err.to_string(),
                            };
                        }
                    }
                }

                ResourceOutcome::Succeeded {
                    reference: Some(reference.reference_id),
                }
            }
        }
    }
}
