//! Substantive-field change detection.
//!
//! The single comparison module for the whole system: the reset policy
//! reads from here, and so can any future audit-diff feature. Absent
//! (`None`) and empty/whitespace-only strings are treated as the same
//! value, so a UI that round-trips `""` for an untouched field does not
//! register a phantom change.
//!
//! `patrol_length_days` is derived from the patrol dates and is never
//! compared itself; changes to the underlying dates flow in instead.

use assessment_types::{AssessmentContent, AttachmentRef, YesNoAnswer};

fn normalize(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        // Only emptiness is normalized; present values compare verbatim.
        None => None,
        Some(s) if s.trim().is_empty() => None,
        Some(s) => Some(s),
    }
}

fn answers_equal(a: &YesNoAnswer, b: &YesNoAnswer) -> bool {
    a.answer == b.answer && normalize(&a.details) == normalize(&b.details)
}

/// Compare the attachment sets of two content snapshots.
///
/// A change in count, any newly added (not-yet-persisted) upload, or
/// any persisted id present on one side but not the other counts as a
/// difference.
pub fn attachments_differ(original: &[AttachmentRef], revised: &[AttachmentRef]) -> bool {
    if original.len() != revised.len() {
        return true;
    }
    if revised.iter().any(|a| a.id.is_none()) || original.iter().any(|a| a.id.is_none()) {
        return true;
    }
    fn ids(set: &[AttachmentRef]) -> Vec<&str> {
        let mut ids: Vec<&str> = set.iter().filter_map(|a| a.id.as_deref()).collect();
        ids.sort_unstable();
        ids
    }
    ids(original) != ids(revised)
}

macro_rules! compare_text {
    ($changes:ident, $orig:ident, $rev:ident, $($field:ident),+ $(,)?) => {
        $(if normalize(&$orig.$field) != normalize(&$rev.$field) {
            $changes.push(stringify!($field));
        })+
    };
}

macro_rules! compare_dates {
    ($changes:ident, $orig:ident, $rev:ident, $($field:ident),+ $(,)?) => {
        $(if $orig.$field != $rev.$field {
            $changes.push(stringify!($field));
        })+
    };
}

macro_rules! compare_answers {
    ($changes:ident, $orig:ident, $rev:ident, $($field:ident),+ $(,)?) => {
        $(if !answers_equal(&$orig.$field, &$rev.$field) {
            $changes.push(stringify!($field));
        })+
    };
}

/// Compute the set of substantive fields that differ between two
/// content snapshots, as field names in declaration order.
///
/// An empty result means the edit was cosmetic: nothing an approver
/// decided against has changed.
pub fn change_set(original: &AssessmentContent, revised: &AssessmentContent) -> Vec<&'static str> {
    let mut changes = Vec::new();

    compare_text!(
        changes, original, revised,
        vessel_name,
        imo_number,
        vessel_type,
        home_port,
        patrol_area,
        personnel_shortages,
        proposed_deviations,
        operational_impact,
    );

    compare_dates!(changes, original, revised, patrol_start, patrol_end);

    compare_answers!(
        changes, original, revised,
        master_experience_adequate,
        officers_hold_certificates,
        crew_familiar_with_vessel,
        minimum_safe_manning_met,
        watchkeeping_schedule_compliant,
        rest_hours_achievable,
        medical_certificates_current,
        engine_room_coverage_adequate,
        deck_supervision_adequate,
        emergency_roles_filled,
        firefighting_capability_maintained,
        lifesaving_capability_maintained,
        navigation_watch_qualified,
        radio_operator_available,
        food_and_accommodation_adequate,
        training_requirements_met,
        prior_incidents_reviewed,
        fatigue_risk_assessed,
        language_requirements_met,
        security_duties_covered,
    );

    if attachments_differ(&original.attachments, &revised.attachments) {
        changes.push("attachments");
    }

    changes
}
