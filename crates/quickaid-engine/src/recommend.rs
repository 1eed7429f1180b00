//! Recommendation synthesizer and the fixed advice blocks.
//!
//! Symptom path: one block keyed by urgency tier, then the general-care
//! block. Image path: one block per fired condition tag, in tag order, then
//! the image general-care block. Lists are emitted as assembled; blocks are
//! not merged or deduplicated against each other.

use quickaid_contracts::{image::ConditionTag, symptom::UrgencyTier};

/// First entry of every `high`-tier recommendation list.
pub const EMERGENCY_INSTRUCTION: &str = "🚨 SEEK IMMEDIATE MEDICAL ATTENTION";

const HIGH_URGENCY: [&str; 4] = [
    EMERGENCY_INSTRUCTION,
    "Call 911 or go to emergency room",
    "Do not delay medical care",
    "Have someone accompany you if possible",
];

const MEDIUM_URGENCY: [&str; 4] = [
    "Contact your healthcare provider within 24 hours",
    "Monitor symptoms closely",
    "Seek immediate care if symptoms worsen",
    "Rest and stay hydrated",
];

const LOW_URGENCY: [&str; 4] = [
    "Monitor symptoms and rest",
    "Stay hydrated and maintain good nutrition",
    "Contact healthcare provider if symptoms persist or worsen",
    "Use over-the-counter remedies as appropriate",
];

const SYMPTOM_GENERAL_CARE: [&str; 3] = [
    "Keep a symptom diary to track changes",
    "Avoid self-medication without professional guidance",
    "Maintain good hygiene to prevent spread of illness",
];

const INFLAMMATION_CARE: [&str; 4] = [
    "Clean the area gently with mild soap and water",
    "Apply a cold compress to reduce inflammation",
    "Monitor for signs of infection (increased redness, warmth, pus)",
    "Seek medical attention if condition worsens",
];

const BRUISING_CARE: [&str; 4] = [
    "Apply ice pack for 15-20 minutes several times a day",
    "Elevate the affected area if possible",
    "Avoid further trauma to the area",
    "Monitor for increased swelling or severe pain",
];

const TEXTURE_CARE: [&str; 4] = [
    "Keep the area clean and dry",
    "Avoid harsh scrubbing or irritants",
    "Document changes with photos for medical consultation",
    "Consider scheduling a dermatological examination",
];

const IMAGE_GENERAL_CARE: [&str; 4] = [
    "Maintain good hygiene in the affected area",
    "Avoid self-medication without professional guidance",
    "Seek immediate medical attention for severe symptoms",
    "Document symptoms and their progression",
];

/// First-aid tips attached to every image analysis.
pub const IMAGE_SAFETY_TIPS: [&str; 6] = [
    "🚨 Call emergency services (911) for severe injuries",
    "🩹 Keep a well-stocked first aid kit accessible",
    "🧼 Always wash hands before treating wounds",
    "💊 Know your allergies and current medications",
    "📱 Have emergency contacts readily available",
    "🏥 Know the location of nearest hospital/urgent care",
];

/// Symptom-management tips attached to every symptom analysis.
pub const SYMPTOM_SAFETY_TIPS: [&str; 6] = [
    "📞 Keep emergency contacts easily accessible",
    "💊 Know your current medications and allergies",
    "🌡️ Monitor vital signs (temperature, pulse) when ill",
    "💧 Stay hydrated unless advised otherwise",
    "🏥 Know location of nearest hospital/urgent care",
    "📝 Keep a health diary to track symptoms",
];

fn tier_block(tier: UrgencyTier) -> &'static [&'static str] {
    match tier {
        UrgencyTier::High => &HIGH_URGENCY,
        UrgencyTier::Medium => &MEDIUM_URGENCY,
        UrgencyTier::Low => &LOW_URGENCY,
    }
}

fn tag_block(tag: ConditionTag) -> &'static [&'static str] {
    match tag {
        ConditionTag::PossibleInflammationOrInjury => &INFLAMMATION_CARE,
        ConditionTag::PossibleBruising => &BRUISING_CARE,
        ConditionTag::TexturalChanges => &TEXTURE_CARE,
        ConditionTag::GeneralSkinAssessment => &[],
    }
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

/// Advice for a symptom analysis at `tier`.
pub fn symptom_recommendations(tier: UrgencyTier) -> Vec<String> {
    let mut out = owned(tier_block(tier));
    out.extend(owned(&SYMPTOM_GENERAL_CARE));
    out
}

/// Advice for an image analysis that produced `tags`.
pub fn image_recommendations(tags: &[ConditionTag]) -> Vec<String> {
    let mut out = Vec::new();
    for tag in tags {
        out.extend(owned(tag_block(*tag)));
    }
    out.extend(owned(&IMAGE_GENERAL_CARE));
    out
}

pub fn image_safety_tips() -> Vec<String> {
    owned(&IMAGE_SAFETY_TIPS)
}

pub fn symptom_safety_tips() -> Vec<String> {
    owned(&SYMPTOM_SAFETY_TIPS)
}
