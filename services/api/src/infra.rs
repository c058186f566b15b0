use driver_onboard::workflows::onboarding::{
    ApplicantId, FileHandle, MediaKind, MediaReference, MediaStore, PartnerTier, ProfilePatch,
    ProfileRecord, ProfileStore, StoreError, WalletService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory partner profile store. Upserts are keyed by applicant id, so a
/// retried submission overwrites the same record.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    records: Arc<Mutex<HashMap<ApplicantId, ProfileRecord>>>,
}

impl InMemoryProfileStore {
    pub(crate) fn records(&self) -> Vec<(ApplicantId, ProfileRecord)> {
        self.records
            .lock()
            .expect("profile mutex poisoned")
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }
}

impl ProfileStore for InMemoryProfileStore {
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
        Ok(())
    }
}

/// In-memory wallet service; re-initialization is a no-op overwrite.
#[derive(Default, Clone)]
pub(crate) struct InMemoryWalletService {
    wallets: Arc<Mutex<HashMap<ApplicantId, String>>>,
}

impl InMemoryWalletService {
    pub(crate) fn currency_for(&self, applicant: &ApplicantId) -> Option<String> {
        self.wallets
            .lock()
            .expect("wallet mutex poisoned")
            .get(applicant)
            .cloned()
    }
}

impl WalletService for InMemoryWalletService {
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

/// In-memory media store with stable per-kind storage paths.
#[derive(Default, Clone)]
pub(crate) struct InMemoryMediaStore {
    uploads: Arc<Mutex<HashMap<String, FileHandle>>>,
}

impl InMemoryMediaStore {
    pub(crate) fn upload_count(&self) -> usize {
        self.uploads.lock().expect("media mutex poisoned").len()
    }
}

impl MediaStore for InMemoryMediaStore {
    fn upload(
        &self,
        applicant: &ApplicantId,
        kind: MediaKind,
        file: &FileHandle,
    ) -> Result<MediaReference, StoreError> {
        let storage_path = format!("driver-media/{}/{}", applicant.0, kind.storage_key());
        self.uploads
            .lock()
            .expect("media mutex poisoned")
            .insert(storage_path.clone(), file.clone());
        Ok(MediaReference {
            reference_id: storage_path.clone(),
            storage_path,
        })
    }
}

pub(crate) fn parse_tier(raw: &str) -> Result<PartnerTier, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "chauffeur_guide" | "chauffeur-guide" => Ok(PartnerTier::ChauffeurGuide),
        "national_guide" | "national-guide" => Ok(PartnerTier::NationalGuide),
        "tourist_driver" | "tourist-driver" => Ok(PartnerTier::TouristDriver),
        "freelance_driver" | "freelance-driver" => Ok(PartnerTier::FreelanceDriver),
        other => Err(format!(
            "unknown tier '{other}', expected one of chauffeur_guide, national_guide, tourist_driver, freelance_driver"
        )),
    }
}
