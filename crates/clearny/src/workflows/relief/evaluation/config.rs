use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Convictions strictly before this date fall under MRTA expungement.
const MRTA_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2021, 3, 31) {
    Some(date) => date,
    None => panic!("statutory cutoff date is valid"),
};

/// Statutory thresholds driving the eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub mrta_cutoff: NaiveDate,
    pub misdemeanor_waiting_years: f64,
    pub felony_waiting_years: f64,
    pub petition_waiting_years: f64,
    pub max_petition_convictions: u32,
    pub max_petition_felonies: u32,
    pub clean_slate_effective: String,
}

impl EvaluationConfig {
    /// Thresholds as enacted: MRTA (2021), Clean Slate Act (3/8 year waits),
    /// CPL 160.59 (10 year wait, 2 convictions, 1 felony).
    pub fn statutory() -> Self {
        Self {
            mrta_cutoff: MRTA_CUTOFF,
            misdemeanor_waiting_years: 3.0,
            felony_waiting_years: 8.0,
            petition_waiting_years: 10.0,
            max_petition_convictions: 2,
            max_petition_felonies: 1,
            clean_slate_effective: "November 2024".to_string(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::statutory()
    }
}
