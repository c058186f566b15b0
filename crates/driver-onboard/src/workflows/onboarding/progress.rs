use serde::Serialize;

use super::catalog;
use super::domain::PhotoKind;
use super::state::ApplicationState;

/// Profile fields counted toward completion, alongside the tier's required
/// documents and the two mandatory captures.
const PROFILE_ITEMS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainProgress {
    pub filled: usize,
    pub required: usize,
}

/// Completion snapshot across the three requirement domains.
///
/// Each domain contributes items proportional to its own size, so tiers with
/// larger document sets weight that domain more heavily. The percentage is
/// computed over the flat item list, not a fixed per-domain split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionBreakdown {
    pub profile: DomainProgress,
    pub documents: DomainProgress,
    pub photos: DomainProgress,
    pub percent: u8,
}

pub fn completion(state: &ApplicationState) -> u8 {
    completion_breakdown(state).percent
}

pub fn completion_breakdown(state: &ApplicationState) -> CompletionBreakdown {
    let profile = state.profile();
    let vehicle = state.vehicle();

    let profile_filled = [
        profile.full_name.as_str(),
        profile.email.as_str(),
        profile.phone.as_str(),
        vehicle.registration.as_str(),
        vehicle.make_model_year.as_str(),
    ]
    .iter()
    .filter(|value| !value.trim().is_empty())
    .count();

    let documents_required = catalog::required_documents(state.tier()).len();
    let documents_filled = state.documents().len().min(documents_required);

    let photos_required = PhotoKind::mandatory().len();
    let photos_filled = PhotoKind::mandatory()
        .into_iter()
        .filter(|kind| state.photos().contains_key(kind))
        .count();

    let filled = profile_filled + documents_filled + photos_filled;
    let required = PROFILE_ITEMS + documents_required + photos_required;
    let percent = ((filled * 100) as f32 / required as f32).round() as u8;

    CompletionBreakdown {
        profile: DomainProgress {
            filled: profile_filled,
            required: PROFILE_ITEMS,
        },
        documents: DomainProgress {
            filled: documents_filled,
            required: documents_required,
        },
        photos: DomainProgress {
            filled: photos_filled,
            required: photos_required,
        },
        percent,
    }
}
