use crate::model::advice::Advice;
use crate::model::scores::ScoreSet;
use crate::model::thresholds::ScoringProfile;

/// Thresholds apply to raw scores, before any display clamping.
pub fn advise(scores: &ScoreSet, profile: &ScoringProfile) -> Vec<Advice> {
    let threshold = profile.advice_threshold;
    let mut advice = Vec::new();

    if scores.stability < threshold {
        advice.push(Advice::BalanceCorrection);
    }
    if scores.coordination < threshold {
        advice.push(Advice::LimbSync);
    }
    if scores.hip_extension < threshold {
        advice.push(Advice::HipRotation);
    }
    if advice.is_empty() {
        advice.push(Advice::GoodRhythm);
    }
    advice
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_advise.rs"]
mod tests;
