use crate::workflows::onboarding::catalog::{
    required_documents, requires_license_number, tier_catalog,
};
use crate::workflows::onboarding::domain::{DocumentKind, PartnerTier};

#[test]
fn every_tier_has_a_non_empty_document_set() {
    for tier in PartnerTier::ordered() {
        assert!(
            !required_documents(tier).is_empty(),
            "{tier:?} must require at least one document"
        );
    }
}

#[test]
fn document_sets_are_stable() {
    for tier in PartnerTier::ordered() {
        assert_eq!(required_documents(tier), required_documents(tier));
    }
}

#[test]
fn document_set_sizes_match_tier_requirements() {
    assert_eq!(required_documents(PartnerTier::ChauffeurGuide).len(), 7);
    assert_eq!(required_documents(PartnerTier::NationalGuide).len(), 5);
    assert_eq!(required_documents(PartnerTier::TouristDriver).len(), 5);
    assert_eq!(required_documents(PartnerTier::FreelanceDriver).len(), 4);
}

#[test]
fn only_guide_tiers_require_a_license_number() {
    assert!(requires_license_number(PartnerTier::ChauffeurGuide));
    assert!(requires_license_number(PartnerTier::NationalGuide));
    assert!(!requires_license_number(PartnerTier::TouristDriver));
    assert!(!requires_license_number(PartnerTier::FreelanceDriver));
}

#[test]
fn guide_tiers_require_the_sltda_license_document() {
    for tier in [PartnerTier::ChauffeurGuide, PartnerTier::NationalGuide] {
        assert!(required_documents(tier).contains(&DocumentKind::SltdaLicense));
    }
}

#[test]
fn catalog_lists_every_tier_once() {
    let catalog = tier_catalog();
    assert_eq!(catalog.len(), PartnerTier::ordered().len());
    for (profile, tier) in catalog.iter().zip(PartnerTier::ordered()) {
        assert_eq!(profile.tier, tier);
        assert!(!profile.benefits.is_empty());
    }
}
