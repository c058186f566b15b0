use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::onboarding::catalog;
use crate::workflows::onboarding::domain::{
    ApplicantId, FileHandle, PartnerTier, PhotoKind, UploadPolicy,
};
use crate::workflows::onboarding::service::OnboardingService;
use crate::workflows::onboarding::state::{ApplicationState, ProfileUpdate, VehicleUpdate};
use crate::workflows::onboarding::submission::{
    MediaKind, MediaReference, MediaStore, ProfilePatch, ProfileRecord, ProfileStore, StoreError,
    SubmissionOrchestrator, SubmissionSettings, WalletService,
};

pub(super) fn applicant() -> ApplicantId {
    ApplicantId("driver-0001".to_string())
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, 3, 9, 30, 0).single().expect("valid timestamp")
}

pub(super) fn image(name: &str) -> FileHandle {
    FileHandle {
        file_name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        size_bytes: 512 * 1024,
    }
}

pub(super) fn pdf(name: &str) -> FileHandle {
    FileHandle {
        file_name: name.to_string(),
        content_type: "application/pdf".to_string(),
        size_bytes: 256 * 1024,
    }
}

pub(super) fn video(name: &str) -> FileHandle {
    FileHandle {
        file_name: name.to_string(),
        content_type: "video/mp4".to_string(),
        size_bytes: 4 * 1024 * 1024,
    }
}

/// A state with every step-1 field filled for the given tier.
pub(super) fn filled_profile_state(tier: PartnerTier) -> ApplicationState {
    let mut state = ApplicationState::new(tier);
    state.update_profile(ProfileUpdate {
        full_name: Some("Nimal Perera".to_string()),
        email: Some("nimal.perera@example.com".to_string()),
        phone: Some("+94 77 123 4567".to_string()),
        whatsapp: Some("+94 77 123 4567".to_string()),
        bio: Some("Fifteen years driving the hill country.".to_string()),
        years_experience: Some(15),
        license_number: Some("C-2041".to_string()),
        ..ProfileUpdate::default()
    });
    state.update_vehicle(VehicleUpdate {
        registration: Some("WP CAB-1234".to_string()),
        make_model_year: Some("Toyota KDH 2018".to_string()),
        ..VehicleUpdate::default()
    });
    state
}

pub(super) fn attach_required_documents(state: &mut ApplicationState) {
    let policy = UploadPolicy::default();
    for &kind in catalog::required_documents(state.tier()) {
        state
            .attach_document(kind, pdf(&format!("{}.pdf", kind.storage_key())), &policy)
            .expect("document accepted");
    }
}

pub(super) fn attach_mandatory_photos(state: &mut ApplicationState) {
    let policy = UploadPolicy::default();
    for kind in PhotoKind::mandatory() {
        state
            .attach_photo(kind, image(&format!("{}.jpg", kind.storage_key())), &policy)
            .expect("photo accepted");
    }
}

/// Walk a fully filled application to the review step with terms accepted.
pub(super) fn review_ready_state(tier: PartnerTier) -> ApplicationState {
    let mut state = filled_profile_state(tier);
    attach_required_documents(&mut state);
    attach_mandatory_photos(&mut state);

    assert!(state.next().moved, "profile step should pass");
    assert!(state.next().moved, "documents step should pass");
    assert!(state.next().moved, "live capture step should pass");
    state.set_agreed_to_terms(true);
    state
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    pub(super) records: Arc<Mutex<HashMap<ApplicantId, ProfileRecord>>>,
    pub(super) patches: Arc<Mutex<Vec<(ApplicantId, ProfilePatch)>>>,
}

impl ProfileStore for MemoryProfiles {
    fn upsert_profile(
        &self,
        applicant: &ApplicantId,
        record: &ProfileRecord,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        guard.insert(applicant.clone(), record.clone());
        Ok(())
    }

    fn patch_profile(
        &self,
        applicant: &ApplicantId,
        patch: &ProfilePatch,
    ) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        let record = guard
            .get_mut(applicant)
            .ok_or_else(|| StoreError::Rejected("unknown applicant".to_string()))?;
        if let Some(reference) = &patch.live_video_reference {
            record.live_video_reference = Some(reference.clone());
        }
        self.patches
            .lock()
            .expect("patch mutex poisoned")
            .push((applicant.clone(), patch.clone()));
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryWallets {
    pub(super) wallets: Arc<Mutex<HashMap<ApplicantId, String>>>,
}

impl WalletService for MemoryWallets {
    fn initialize_wallet(
        &self,
        applicant: &ApplicantId,
        currency: &str,
    ) -> Result<(), StoreError> {
        let mut guard = self.wallets.lock().expect("wallet mutex poisoned");
        guard.insert(applicant.clone(), currency.to_string());
        Ok(())
    }
}

/// Media store with optional failure injection by storage key.
#[derive(Default, Clone)]
pub(super) struct MemoryMedia {
    pub(super) uploads: Arc<Mutex<HashMap<String, MediaReference>>>,
    pub(super) fail_keys: Arc<Mutex<Vec<&'static str>>>,
}

impl MemoryMedia {
    pub(super) fn failing_on(keys: &[&'static str]) -> Self {
        let media = Self::default();
        media
            .fail_keys
            .lock()
            .expect("fail-key mutex poisoned")
            .extend_from_slice(keys);
        media
    }

    pub(super) fn heal(&self) {
        self.fail_keys
            .lock()
            .expect("fail-key mutex poisoned")
            .clear();
    }

    pub(super) fn upload_count(&self) -> usize {
        self.uploads.lock().expect("upload mutex poisoned").len()
    }
}

impl MediaStore for MemoryMedia {
    fn upload(
        &self,
        applicant: &ApplicantId,
        kind: MediaKind,
        _file: &FileHandle,
    ) -> Result<MediaReference, StoreError> {
        let key = kind.storage_key();
        if self
            .fail_keys
            .lock()
            .expect("fail-key mutex poisoned")
            .contains(&key)
        {
            return Err(StoreError::Unavailable(format!("upload of {key} timed out")));
        }

        let storage_path = format!("driver-media/{}/{}", applicant.0, key);
        let reference = MediaReference {
            reference_id: storage_path.clone(),
            storage_path: storage_path.clone(),
        };
        self.uploads
            .lock()
            .expect("upload mutex poisoned")
            .insert(storage_path, reference.clone());
        Ok(reference)
    }
}

pub(super) type TestOrchestrator = SubmissionOrchestrator<MemoryProfiles, MemoryWallets, MemoryMedia>;
pub(super) type TestService = OnboardingService<MemoryProfiles, MemoryWallets, MemoryMedia>;

pub(super) fn build_orchestrator(
    media: MemoryMedia,
) -> (
    TestOrchestrator,
    Arc<MemoryProfiles>,
    Arc<MemoryWallets>,
    Arc<MemoryMedia>,
) {
    let profiles = Arc::new(MemoryProfiles::default());
    let wallets = Arc::new(MemoryWallets::default());
    let media = Arc::new(media);
    let orchestrator = SubmissionOrchestrator::new(
        profiles.clone(),
        wallets.clone(),
        media.clone(),
        SubmissionSettings::default(),
    );
    (orchestrator, profiles, wallets, media)
}

pub(super) fn build_service() -> (
    TestService,
    Arc<MemoryProfiles>,
    Arc<MemoryWallets>,
    Arc<MemoryMedia>,
) {
    let profiles = Arc::new(MemoryProfiles::default());
    let wallets = Arc::new(MemoryWallets::default());
    let media = Arc::new(MemoryMedia::default());
    let service = OnboardingService::new(
        profiles.clone(),
        wallets.clone(),
        media.clone(),
        SubmissionSettings::default(),
        UploadPolicy::default(),
    );
    (service, profiles, wallets, media)
}
