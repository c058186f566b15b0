use serde::Serialize;

use super::domain::{DocumentKind, PartnerTier};

/// Ordered required-document set for a tier.
///
/// The mapping is total over the closed tier enum; adding a tier forces this
/// match (and every other tier match in the crate) to be extended.
pub const fn required_documents(tier: PartnerTier) -> &'static [DocumentKind] {
    match tier {
        PartnerTier::ChauffeurGuide => &[
            DocumentKind::SltdaLicense,
            DocumentKind::DrivingLicense,
            DocumentKind::NationalId,
            DocumentKind::PoliceClearance,
            DocumentKind::MedicalReport,
            DocumentKind::VehicleRevenueLicense,
            DocumentKind::VehicleInsurance,
        ],
        PartnerTier::NationalGuide => &[
            DocumentKind::SltdaLicense,
            DocumentKind::DrivingLicense,
            DocumentKind::NationalId,
            DocumentKind::PoliceClearance,
            DocumentKind::MedicalReport,
        ],
        PartnerTier::TouristDriver => &[
            DocumentKind::DrivingLicense,
            DocumentKind::NationalId,
            DocumentKind::PoliceClearance,
            DocumentKind::VehicleRevenueLicense,
            DocumentKind::VehicleInsurance,
        ],
        PartnerTier::FreelanceDriver => &[
            DocumentKind::DrivingLicense,
            DocumentKind::NationalId,
            DocumentKind::VehicleRevenueLicense,
            DocumentKind::VehicleInsurance,
        ],
    }
}

/// Whether the tier must carry a licensing-authority (SLTDA) number.
pub const fn requires_license_number(tier: PartnerTier) -> bool {
    matches!(tier, PartnerTier::ChauffeurGuide | PartnerTier::NationalGuide)
}

/// Descriptive metadata behind the tier picker.
#[derive(Debug, Clone, Serialize)]
pub struct TierProfile {
    pub tier: PartnerTier,
    pub label: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
}

pub fn tier_catalog() -> Vec<TierProfile> {
    PartnerTier::ordered()
        .into_iter()
        .map(|tier| TierProfile {
            tier,
            label: tier.label(),
            description: tier_description(tier),
            benefits: tier_benefits(tier),
        })
        .collect()
}

const fn tier_description(tier: PartnerTier) -> &'static str {
    match tier {
        PartnerTier::ChauffeurGuide => {
            "SLTDA-licensed chauffeur guide able to lead tours and drive guests nationwide."
        }
        PartnerTier::NationalGuide => {
            "SLTDA-licensed national guide accompanying groups with a hired vehicle."
        }
        PartnerTier::TouristDriver => {
            "SLITHM-certified tourist driver for airport transfers and round trips."
        }
        PartnerTier::FreelanceDriver => {
            "Standard driver partner for point-to-point and daily-hire work."
        }
    }
}

const fn tier_benefits(tier: PartnerTier) -> &'static [&'static str] {
    match tier {
        PartnerTier::ChauffeurGuide => &[
            "Priority placement on multi-day tour requests",
            "Guide and driver earnings on a single booking",
            "Verified SLTDA badge on the public directory",
        ],
        PartnerTier::NationalGuide => &[
            "Eligible for national tour itineraries",
            "Verified SLTDA badge on the public directory",
        ],
        PartnerTier::TouristDriver => &[
            "Eligible for airport transfer dispatch",
            "SLITHM certification shown to customers",
        ],
        PartnerTier::FreelanceDriver => &[
            "Fastest onboarding with the smallest document set",
            "Access to point-to-point booking requests",
        ],
    }
}
