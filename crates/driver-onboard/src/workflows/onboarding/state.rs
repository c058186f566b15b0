use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog;
use super::domain::{
    BankDetails, DocumentKind, EmergencyContact, FileHandle, FileRejection, OnboardingStep,
    PartnerTier, PersonalProfile, PhotoKind, UploadPolicy, VehicleDetails, VehicleType,
};
use super::progress::{self, CompletionBreakdown};
use super::validation::{self, FieldErrors};

/// The single in-progress application aggregate.
///
/// One applicant owns one instance for the lifetime of the onboarding
/// session; it is handed explicitly to every operation and dropped on a
/// successful submission. Nothing here touches remote storage.
#[derive(Debug, Clone)]
pub struct ApplicationState {
    tier: PartnerTier,
    profile: PersonalProfile,
    vehicle: VehicleDetails,
    emergency_contact: Option<EmergencyContact>,
    bank_details: Option<BankDetails>,
    documents: BTreeMap<DocumentKind, FileHandle>,
    photos: BTreeMap<PhotoKind, FileHandle>,
    current_step: OnboardingStep,
    furthest_step: OnboardingStep,
    errors: FieldErrors,
    agreed_to_terms: bool,
}

impl Default for ApplicationState {
    fn default() -> Self {
        // The least-privileged tier is the starting point until the
        // applicant picks otherwise.
        Self::new(PartnerTier::FreelanceDriver)
    }
}

impl ApplicationState {
    pub fn new(tier: PartnerTier) -> Self {
        Self {
            tier,
            profile: PersonalProfile::default(),
            vehicle: VehicleDetails::default(),
            emergency_contact: None,
            bank_details: None,
            documents: BTreeMap::new(),
            photos: BTreeMap::new(),
            current_step: OnboardingStep::Profile,
            furthest_step: OnboardingStep::Profile,
            errors: FieldErrors::new(),
            agreed_to_terms: false,
        }
    }

    pub fn tier(&self) -> PartnerTier {
        self.tier
    }

    pub fn profile(&self) -> &PersonalProfile {
        &self.profile
    }

    pub fn vehicle(&self) -> &VehicleDetails {
        &self.vehicle
    }

    pub fn emergency_contact(&self) -> Option<&EmergencyContact> {
        self.emergency_contact.as_ref()
    }

    pub fn bank_details(&self) -> Option<&BankDetails> {
        self.bank_details.as_ref()
    }

    pub fn documents(&self) -> &BTreeMap<DocumentKind, FileHandle> {
        &self.documents
    }

    pub fn photos(&self) -> &BTreeMap<PhotoKind, FileHandle> {
        &self.photos
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn agreed_to_terms(&self) -> bool {
        self.agreed_to_terms
    }

    /// Switching tier changes the requirement set but keeps every field and
    /// attachment already entered; earlier uploads continue to count toward
    /// the document quota.
    pub fn set_tier(&mut self, tier: PartnerTier) {
        self.tier = tier;
    }

    pub fn set_agreed_to_terms(&mut self, agreed: bool) {
        self.agreed_to_terms = agreed;
    }

    pub fn set_emergency_contact(&mut self, contact: Option<EmergencyContact>) {
        self.emergency_contact = contact;
    }

    pub fn set_bank_details(&mut self, details: Option<BankDetails>) {
        self.bank_details = details;
    }

    /// Apply a partial profile update; absent fields keep their value.
    pub fn update_profile(&mut self, update: ProfileUpdate) {
        let profile = &mut self.profile;
        if let Some(value) = update.full_name {
            profile.full_name = value;
        }
        if let Some(value) = update.email {
            profile.email = value;
        }
        if let Some(value) = update.phone {
            profile.phone = value;
        }
        if let Some(value) = update.whatsapp {
            profile.whatsapp = value;
        }
        if let Some(value) = update.address {
            profile.address = value;
        }
        if let Some(value) = update.city {
            profile.city = value;
        }
        if let Some(value) = update.bio {
            profile.bio = value;
        }
        if let Some(value) = update.languages {
            profile.languages = value;
        }
        if let Some(value) = update.years_experience {
            profile.years_experience = value;
        }
        if let Some(value) = update.hourly_rate {
            profile.hourly_rate = Some(value);
        }
        if let Some(value) = update.daily_rate {
            profile.daily_rate = Some(value);
        }
        if let Some(value) = update.license_number {
            profile.license_number = value;
        }
        if let Some(value) = update.license_expiry {
            profile.license_expiry = Some(value);
        }
        if let Some(value) = update.police_clearance_expiry {
            profile.police_clearance_expiry = Some(value);
        }
        if let Some(value) = update.medical_report_expiry {
            profile.medical_report_expiry = Some(value);
        }
        if let Some(value) = update.instagram {
            profile.instagram = value;
        }
        if let Some(value) = update.facebook {
            profile.facebook = value;
        }
    }

    /// Apply a partial vehicle update; absent fields keep their value.
    pub fn update_vehicle(&mut self, update: VehicleUpdate) {
        let vehicle = &mut self.vehicle;
        if let Some(value) = update.vehicle_type {
            vehicle.vehicle_type = value;
        }
        if let Some(value) = update.registration {
            vehicle.registration = value;
        }
        if let Some(value) = update.make_model_year {
            vehicle.make_model_year = value;
        }
        if let Some(value) = update.seats {
            vehicle.seats = value;
        }
        if let Some(value) = update.color {
            vehicle.color = value;
        }
        if let Some(value) = update.air_conditioned {
            vehicle.air_conditioned = value;
        }
        if let Some(value) = update.wifi {
            vehicle.wifi = value;
        }
    }

    /// Stage a document file for upload. Rejected files never enter the
    /// aggregate and leave the slot untouched.
    pub fn attach_document(
        &mut self,
        kind: DocumentKind,
        file: FileHandle,
        policy: &UploadPolicy,
    ) -> Result<(), FileRejection> {
        policy.check_document(&file)?;
        self.documents.insert(kind, file);
        Ok(())
    }

    pub fn remove_document(&mut self, kind: DocumentKind) -> Option<FileHandle> {
        self.documents.remove(&kind)
    }

    /// Stage a live capture for upload.
    pub fn attach_photo(
        &mut self,
        kind: PhotoKind,
        file: FileHandle,
        policy: &UploadPolicy,
    ) -> Result<(), FileRejection> {
        policy.check_photo(kind, &file)?;
        self.photos.insert(kind, file);
        Ok(())
    }

    pub fn remove_photo(&mut self, kind: PhotoKind) -> Option<FileHandle> {
        self.photos.remove(&kind)
    }

    /// Run the current step's validator and advance on success.
    ///
    /// A failing validator stores its error map and leaves the pointer in
    /// place; a clean pass clears stored errors and moves forward, capped at
    /// the review step.
    pub fn next(&mut self) -> NavigationOutcome {
        let errors = validation::validate_step(self, self.current_step);
        if errors.is_empty() {
            self.errors.clear();
            self.current_step = self.current_step.next();
            if self.furthest_step < self.current_step {
                self.furthest_step = self.current_step;
            }
            NavigationOutcome {
                step: self.current_step,
                moved: true,
                errors: FieldErrors::new(),
            }
        } else {
            self.errors = errors.clone();
            NavigationOutcome {
                step: self.current_step,
                moved: false,
                errors,
            }
        }
    }

    /// Move backward unconditionally; entered data is retained and nothing
    /// is revalidated.
    pub fn back(&mut self) -> NavigationOutcome {
        self.current_step = self.current_step.previous();
        NavigationOutcome {
            step: self.current_step,
            moved: true,
            errors: self.errors.clone(),
        }
    }

    /// Jump directly to a step that has already been reached. Forward jumps
    /// past the high-water mark are refused.
    pub fn jump_to(&mut self, step: OnboardingStep) -> Result<NavigationOutcome, NavigationError> {
        if step > self.furthest_step {
            return Err(NavigationError::StepNotReached { requested: step });
        }
        self.current_step = step;
        Ok(NavigationOutcome {
            step: self.current_step,
            moved: true,
            errors: self.errors.clone(),
        })
    }

    pub fn completion(&self) -> CompletionBreakdown {
        progress::completion_breakdown(self)
    }

    pub fn snapshot(&self) -> ApplicationSnapshot {
        ApplicationSnapshot {
            tier: self.tier,
            tier_label: self.tier.label(),
            step: self.current_step.number(),
            step_label: self.current_step.label(),
            completion: self.completion(),
            errors: self.errors.clone(),
            agreed_to_terms: self.agreed_to_terms,
            documents_required: catalog::required_documents(self.tier).to_vec(),
            documents_attached: self.documents.keys().copied().collect(),
            photos_attached: self.photos.keys().copied().collect(),
            profile: self.profile.clone(),
            vehicle: self.vehicle.clone(),
            emergency_contact: self.emergency_contact.clone(),
            bank_details: self.bank_details.clone(),
        }
    }
}

/// Partial profile update, absent fields untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub languages: Option<Vec<String>>,
    pub years_experience: Option<u16>,
    pub hourly_rate: Option<u32>,
    pub daily_rate: Option<u32>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub police_clearance_expiry: Option<NaiveDate>,
    pub medical_report_expiry: Option<NaiveDate>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
}

/// Partial vehicle update, absent fields untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleUpdate {
    pub vehicle_type: Option<VehicleType>,
    pub registration: Option<String>,
    pub make_model_year: Option<String>,
    pub seats: Option<u8>,
    pub color: Option<String>,
    pub air_conditioned: Option<bool>,
    pub wifi: Option<bool>,
}

/// Result of a navigation attempt, echoing the step the session landed on.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationOutcome {
    pub step: OnboardingStep,
    pub moved: bool,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("step {requested:?} has not been reached yet")]
    StepNotReached { requested: OnboardingStep },
}

/// Read-model handed to the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSnapshot {
    pub tier: PartnerTier,
    pub tier_label: &'static str,
    pub step: u8,
    pub step_label: &'static str,
    pub completion: CompletionBreakdown,
    pub errors: FieldErrors,
    pub agreed_to_terms: bool,
    pub documents_required: Vec<DocumentKind>,
    pub documents_attached: Vec<DocumentKind>,
    pub photos_attached: Vec<PhotoKind>,
    pub profile: PersonalProfile,
    pub vehicle: VehicleDetails,
    pub emergency_contact: Option<EmergencyContact>,
    pub bank_details: Option<BankDetails>,
}
