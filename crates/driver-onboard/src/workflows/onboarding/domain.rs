use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for authenticated applicants.
///
/// Identity is resolved by the auth layer upstream; the workflow only keys
/// sessions and remote writes by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Partner category determining required documents and privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerTier {
    ChauffeurGuide,
    NationalGuide,
    TouristDriver,
    FreelanceDriver,
}

impl PartnerTier {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ChauffeurGuide,
            Self::NationalGuide,
            Self::TouristDriver,
            Self::FreelanceDriver,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ChauffeurGuide => "Chauffeur Tourist Guide (SLTDA)",
            Self::NationalGuide => "National Tourist Guide",
            Self::TouristDriver => "SLITHM Tourist Driver",
            Self::FreelanceDriver => "Freelance / Standard Driver",
        }
    }
}

/// Closed universe of verification documents collected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    NationalId,
    DrivingLicense,
    SltdaLicense,
    PoliceClearance,
    MedicalReport,
    GramaNiladhariCertificate,
    VehicleRevenueLicense,
    VehicleInsurance,
    VehicleRegistration,
    VehiclePermit,
}

impl DocumentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NationalId => "National ID",
            Self::DrivingLicense => "Driving License",
            Self::SltdaLicense => "SLTDA Guide/Driver License",
            Self::PoliceClearance => "Police Clearance",
            Self::MedicalReport => "Medical Report",
            Self::GramaNiladhariCertificate => "Grama Niladhari Certificate",
            Self::VehicleRevenueLicense => "Vehicle Revenue License",
            Self::VehicleInsurance => "Vehicle Insurance",
            Self::VehicleRegistration => "Vehicle Registration",
            Self::VehiclePermit => "Vehicle Permit",
        }
    }

    /// Stable key used for storage paths and upload idempotency.
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::NationalId => "national_id",
            Self::DrivingLicense => "driving_license",
            Self::SltdaLicense => "sltda_license",
            Self::PoliceClearance => "police_clearance",
            Self::MedicalReport => "medical_report",
            Self::GramaNiladhariCertificate => "grama_niladhari_certificate",
            Self::VehicleRevenueLicense => "vehicle_revenue_license",
            Self::VehicleInsurance => "vehicle_insurance",
            Self::VehicleRegistration => "vehicle_registration",
            Self::VehiclePermit => "vehicle_permit",
        }
    }
}

/// Live-capture slots. Two are mandatory, the rest strengthen the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    SelfieWithId,
    VehicleFront,
    VehicleBack,
    VehicleSide,
    VehicleInterior,
    VideoIntro,
}

impl PhotoKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::SelfieWithId,
            Self::VehicleFront,
            Self::VehicleBack,
            Self::VehicleSide,
            Self::VehicleInterior,
            Self::VideoIntro,
        ]
    }

    pub const fn mandatory() -> [Self; 2] {
        [Self::SelfieWithId, Self::VehicleFront]
    }

    pub const fn is_mandatory(self) -> bool {
        matches!(self, Self::SelfieWithId | Self::VehicleFront)
    }

    pub const fn is_video(self) -> bool {
        matches!(self, Self::VideoIntro)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SelfieWithId => "Selfie with ID",
            Self::VehicleFront => "Vehicle Front",
            Self::VehicleBack => "Vehicle Back",
            Self::VehicleSide => "Vehicle Side",
            Self::VehicleInterior => "Vehicle Interior",
            Self::VideoIntro => "Video Intro & Liveness",
        }
    }

    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::SelfieWithId => "selfie_with_id",
            Self::VehicleFront => "vehicle_front",
            Self::VehicleBack => "vehicle_back",
            Self::VehicleSide => "vehicle_side",
            Self::VehicleInterior => "vehicle_interior",
            Self::VideoIntro => "video_intro",
        }
    }
}

/// One of the four sequential onboarding stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Profile,
    Documents,
    LiveCapture,
    Review,
}

impl OnboardingStep {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Profile,
            Self::Documents,
            Self::LiveCapture,
            Self::Review,
        ]
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::Profile => 1,
            Self::Documents => 2,
            Self::LiveCapture => 3,
            Self::Review => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Profile),
            2 => Some(Self::Documents),
            3 => Some(Self::LiveCapture),
            4 => Some(Self::Review),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Documents => "Documents",
            Self::LiveCapture => "Live Capture",
            Self::Review => "Review & Confirm",
        }
    }

    /// Forward neighbor, saturating at the review step.
    pub const fn next(self) -> Self {
        match self {
            Self::Profile => Self::Documents,
            Self::Documents => Self::LiveCapture,
            Self::LiveCapture => Self::Review,
            Self::Review => Self::Review,
        }
    }

    /// Backward neighbor, saturating at the profile step.
    pub const fn previous(self) -> Self {
        match self {
            Self::Profile => Self::Profile,
            Self::Documents => Self::Profile,
            Self::LiveCapture => Self::Documents,
            Self::Review => Self::LiveCapture,
        }
    }
}

/// In-memory reference to a user-selected file that has not been uploaded.
///
/// Lives only inside the session; nothing reaches the media store before the
/// final submission runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Size and content-type gate applied before a file enters the aggregate.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_upload_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn check_document(&self, file: &FileHandle) -> Result<(), FileRejection> {
        self.check_size(file)?;
        let accepted = file.content_type.starts_with("image/")
            || file.content_type.eq_ignore_ascii_case("application/pdf");
        if accepted {
            Ok(())
        } else {
            Err(FileRejection::UnsupportedType {
                content_type: file.content_type.clone(),
                expected: "an image or PDF",
            })
        }
    }

    pub fn check_photo(&self, kind: PhotoKind, file: &FileHandle) -> Result<(), FileRejection> {
        self.check_size(file)?;
        let (accepted, expected) = if kind.is_video() {
            (file.content_type.starts_with("video/"), "a video")
        } else {
            (file.content_type.starts_with("image/"), "an image")
        };
        if accepted {
            Ok(())
        } else {
            Err(FileRejection::UnsupportedType {
                content_type: file.content_type.clone(),
                expected,
            })
        }
    }

    fn check_size(&self, file: &FileHandle) -> Result<(), FileRejection> {
        if file.size_bytes > self.max_upload_bytes {
            return Err(FileRejection::TooLarge {
                file_name: file.file_name.clone(),
                size_bytes: file.size_bytes,
                limit_bytes: self.max_upload_bytes,
            });
        }
        Ok(())
    }
}

/// Raised when a selected file never makes it into the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileRejection {
    #[error("{file_name} is {size_bytes} bytes, above the {limit_bytes} byte upload limit")]
    TooLarge {
        file_name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },
    #[error("content type {content_type} is not accepted here, expected {expected}")]
    UnsupportedType {
        content_type: String,
        expected: &'static str,
    },
}

/// Personal and professional profile fields collected on step 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub city: String,
    pub bio: String,
    pub languages: Vec<String>,
    pub years_experience: u16,
    pub hourly_rate: Option<u32>,
    pub daily_rate: Option<u32>,
    pub license_number: String,
    pub license_expiry: Option<NaiveDate>,
    pub police_clearance_expiry: Option<NaiveDate>,
    pub medical_report_expiry: Option<NaiveDate>,
    pub instagram: String,
    pub facebook: String,
}

impl Default for PersonalProfile {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            address: String::new(),
            city: String::new(),
            bio: String::new(),
            languages: vec!["English".to_string()],
            years_experience: 0,
            hourly_rate: None,
            daily_rate: None,
            license_number: String::new(),
            license_expiry: None,
            police_clearance_expiry: None,
            medical_report_expiry: None,
            instagram: String::new(),
            facebook: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Sedan,
    Suv,
    Van,
    MiniCoach,
    Luxury,
}

impl VehicleType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sedan => "Sedan",
            Self::Suv => "SUV",
            Self::Van => "Van/KDH",
            Self::MiniCoach => "Mini Coach",
            Self::Luxury => "Luxury",
        }
    }
}

/// Vehicle description captured alongside the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleDetails {
    pub vehicle_type: VehicleType,
    pub registration: String,
    pub make_model_year: String,
    pub seats: u8,
    pub color: String,
    pub air_conditioned: bool,
    pub wifi: bool,
}

impl Default for VehicleDetails {
    fn default() -> Self {
        Self {
            vehicle_type: VehicleType::Suv,
            registration: String::new(),
            make_model_year: String::new(),
            seats: 4,
            color: String::new(),
            air_conditioned: true,
            wifi: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub bank_name: String,
    pub branch: String,
    pub account_name: String,
    pub account_number: String,
}

/// Verification lifecycle of the remote partner profile record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    PendingVerification,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingVerification => "pending_verification",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}
