use crate::infra::{InMemoryMediaStore, InMemoryProfileStore, InMemoryWalletService};
use chrono::Utc;
use clap::Args;
use driver_onboard::error::AppError;
use driver_onboard::workflows::onboarding::{
    required_documents, requires_license_number, tier_catalog, ApplicantId, ApplicationUpdate,
    FileHandle, OnboardingService, PartnerTier, PhotoKind, ProfileUpdate, ResourceOutcome,
    SubmissionSettings, UploadPolicy, VehicleUpdate,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Partner tier to onboard
    #[arg(long, value_parser = crate::infra::parse_tier, default_value = "freelance_driver")]
    tier: PartnerTier,
    /// Walk the steps but skip the final submission
    #[arg(long)]
    skip_submit: bool,
}

pub(crate) fn run_tiers() -> Result<(), AppError> {
    println!("Partner tier catalog");
    for profile in tier_catalog() {
        println!("\n{} ({:?})", profile.label, profile.tier);
        println!("  {}", profile.description);
        println!(
            "  SLTDA license number required: {}",
            if requires_license_number(profile.tier) {
                "yes"
            } else {
                "no"
            }
        );
        println!("  Required documents:");
        for kind in required_documents(profile.tier) {
            println!("    - {}", kind.label());
        }
        println!("  Benefits:");
        for benefit in profile.benefits {
            println!("    - {benefit}");
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { tier, skip_submit } = args;

    println!("Driver onboarding demo ({})", tier.label());

    let profiles = Arc::new(InMemoryProfileStore::default());
    let wallets = Arc::new(InMemoryWalletService::default());
    let media = Arc::new(InMemoryMediaStore::default());
    let service = OnboardingService::new(
        profiles.clone(),
        wallets.clone(),
        media.clone(),
        SubmissionSettings::default(),
        UploadPolicy::default(),
    );

    let applicant = ApplicantId("demo-driver".to_string());
    let snapshot = service.begin(applicant.clone(), tier);
    println!(
        "- Session opened on step {} ({}), completion {}%",
        snapshot.step, snapshot.step_label, snapshot.completion.percent
    );

    // An empty profile is blocked on purpose so the demo shows the error map.
    let blocked = service.next(&applicant)?;
    if !blocked.moved {
        println!("- Step 1 blocked as expected:");
        for (field, message) in &blocked.errors {
            println!("    {field}: {message}");
        }
    }

    service.update(
        &applicant,
        ApplicationUpdate {
            profile: Some(ProfileUpdate {
                full_name: Some("Nimal Perera".to_string()),
                email: Some("nimal.perera@example.com".to_string()),
                phone: Some("+94 77 123 4567".to_string()),
                whatsapp: Some("+94 77 123 4567".to_string()),
                bio: Some("Hill country specialist, fifteen years on the road.".to_string()),
                languages: Some(vec!["English".to_string(), "Sinhala".to_string()]),
                years_experience: Some(15),
                daily_rate: Some(14_500),
                license_number: Some("C-2041".to_string()),
                ..ProfileUpdate::default()
            }),
            vehicle: Some(VehicleUpdate {
                registration: Some("WP CAB-1234".to_string()),
                make_model_year: Some("Toyota KDH 2018".to_string()),
                seats: Some(9),
                ..VehicleUpdate::default()
            }),
            ..ApplicationUpdate::default()
        },
    )?;

    let outcome = service.next(&applicant)?;
    println!(
        "- Profile step complete, now on step {:?} ({}% done)",
        outcome.step,
        service.completion(&applicant)?
    );

    for &kind in required_documents(tier) {
        service.attach_document(
            &applicant,
            kind,
            FileHandle {
                file_name: format!("{}.pdf", kind.storage_key()),
                content_type: "application/pdf".to_string(),
                size_bytes: 180 * 1024,
            },
        )?;
        println!("    attached {}", kind.label());
    }
    let outcome = service.next(&applicant)?;
    println!(
        "- Documents step complete, now on step {:?} ({}% done)",
        outcome.step,
        service.completion(&applicant)?
    );

    for kind in [
        PhotoKind::SelfieWithId,
        PhotoKind::VehicleFront,
        PhotoKind::VideoIntro,
    ] {
        let (content_type, extension) = if kind.is_video() {
            ("video/mp4", "mp4")
        } else {
            ("image/jpeg", "jpg")
        };
        service.attach_photo(
            &applicant,
            kind,
            FileHandle {
                file_name: format!("{}.{extension}", kind.storage_key()),
                content_type: content_type.to_string(),
                size_bytes: 900 * 1024,
            },
        )?;
        println!("    captured {}", kind.label());
    }
    let outcome = service.next(&applicant)?;
    println!(
        "- Live capture complete, now on step {:?} ({}% done)",
        outcome.step,
        service.completion(&applicant)?
    );

    if skip_submit {
        println!("- Submission skipped (--skip-submit)");
        return Ok(());
    }

    service.update(
        &applicant,
        ApplicationUpdate {
            agreed_to_terms: Some(true),
            ..ApplicationUpdate::default()
        },
    )?;

    let report = service.submit(&applicant, Utc::now())?;
    println!(
        "- Submission {}",
        if report.succeeded() {
            "succeeded"
        } else {
            "failed"
        }
    );
    for result in &report.resources {
        let status = match &result.outcome {
            ResourceOutcome::Succeeded { reference: Some(reference) } => {
                format!("ok -> {reference}")
            }
            ResourceOutcome::Succeeded { reference: None } => "ok".to_string(),
            ResourceOutcome::Failed { error } => format!("failed: {error}"),
            ResourceOutcome::Skipped => "skipped".to_string(),
        };
        println!("    {:?}: {status}", result.resource);
    }

    if let Some(currency) = wallets.currency_for(&applicant) {
        println!("- Wallet initialized in {currency}");
    }
    for (id, record) in profiles.records() {
        println!(
            "- Profile record for {} stored with status {}",
            id.0,
            record.status.label()
        );
        if let Some(video) = record.live_video_reference {
            println!("    intro video linked at {video}");
        }
    }
    println!("- {} media objects uploaded", media.upload_count());

    Ok(())
}
