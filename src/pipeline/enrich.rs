//! Enrichment: raw record to analytics record, with quality scoring.
//!
//! Enrichment never fails. Malformed or absent input degrades to the
//! "unknown" value for the affected field and costs quality points — the
//! deliberate asymmetry with the transport layer, where failures are fatal.
//!
//! Scoring is a fixed per-field penalty model: 100 minus 10 per degraded
//! field, floored at 0. Degraded fields are each empty raw field among
//! email, first name, last name, and avatar; an email that is present but
//! malformed; and an `unknown` engagement or activity classification.
//! Absent and malformed emails both cost exactly 10 on the email axis —
//! the deduction is never double-counted.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ActivityStatus, EngagementLevel, EnrichedCustomer, RawCustomer};

use super::assign::CategoryAssigner;

/// Minimal email format check: local part, "@", domain containing a dot.
/// Whitespace anywhere fails the match.
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("email regex is valid") // Static pattern, safe to panic
});

/// Placeholder domain for absent or malformed emails.
const UNKNOWN_DOMAIN: &str = "unknown";

/// Full name used when both name fields are empty.
const UNKNOWN_NAME: &str = "Unknown";

/// Per-degraded-field quality deduction.
const FIELD_PENALTY: u8 = 10;

/// Transforms one raw record into an enriched analytics record.
///
/// Pure given the assigner state: enriching the same records with an
/// assigner built from the same seed yields byte-identical output.
pub fn enrich(raw: &RawCustomer, assigner: &mut dyn CategoryAssigner) -> EnrichedCustomer {
    let first_name = raw.first_name.as_deref().unwrap_or("").trim();
    let last_name = raw.last_name.as_deref().unwrap_or("").trim();
    let email = raw.email.as_deref().unwrap_or("").trim();
    let avatar = raw.avatar.as_deref().unwrap_or("").trim();

    let full_name = build_full_name(first_name, last_name);
    let email_domain = extract_email_domain(email);

    let engagement_level = assigner.engagement_level();
    let activity_status = assigner.activity_status();
    let acquisition_channel = assigner.acquisition_channel();
    let market_segment = assigner.market_segment();
    let customer_tier = assigner.customer_tier();

    let mut degraded: u8 = [email, first_name, last_name, avatar]
        .iter()
        .filter(|field| field.is_empty())
        .count() as u8;
    // Present-but-malformed email: one extra deduction. An absent email
    // already paid via the empty-field count above.
    if !email.is_empty() && !is_valid_email(email) {
        degraded += 1;
    }
    if engagement_level == EngagementLevel::Unknown {
        degraded += 1;
    }
    if activity_status == ActivityStatus::Unknown {
        degraded += 1;
    }

    EnrichedCustomer {
        customer_id: raw.id,
        full_name,
        email_domain,
        engagement_level,
        activity_status,
        acquisition_channel,
        market_segment,
        customer_tier,
        data_quality_score: 100u8.saturating_sub(degraded.saturating_mul(FIELD_PENALTY)),
    }
}

/// Joins trimmed name parts; a single present part stands alone, and two
/// empty parts yield the "Unknown" placeholder.
fn build_full_name(first_name: &str, last_name: &str) -> String {
    match (first_name.is_empty(), last_name.is_empty()) {
        (true, true) => UNKNOWN_NAME.to_string(),
        (false, true) => first_name.to_string(),
        (true, false) => last_name.to_string(),
        (false, false) => format!("{first_name} {last_name}"),
    }
}

/// Lowercased domain part of a valid email, or "unknown".
fn extract_email_domain(email: &str) -> String {
    if !is_valid_email(email) {
        return UNKNOWN_DOMAIN.to_string();
    }
    email
        .split('@')
        .nth(1)
        .map_or_else(|| UNKNOWN_DOMAIN.to_string(), str::to_lowercase)
}

fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_PATTERN.is_match(email)
}
