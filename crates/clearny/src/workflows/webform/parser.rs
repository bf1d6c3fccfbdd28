use super::normalizer::{normalize_answer, split_multi};
use crate::workflows::relief::QuestionnaireSubmission;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<Vec<QuestionnaireSubmission>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<WebformRow>() {
        records.push(record?.into_submission());
    }

    Ok(records)
}

/// One exported row from the intake form. Column names match the stored
/// questionnaire fields; missing columns and blank cells are both absent
/// answers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WebformRow {
    #[serde(deserialize_with = "empty_string_as_none")]
    conviction_state: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    has_marijuana_conviction: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    offense_types: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    conviction_month: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    conviction_year: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    possession_amount: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    age_at_offense: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    received_notice: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    conviction_level: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    served_time: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    release_month: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    release_year: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    other_convictions: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    on_supervision: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    has_excluded_offenses: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    total_convictions: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    total_felonies: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    ten_years_passed: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    sentence_completed: Option<String>,
}

impl WebformRow {
    fn into_submission(self) -> QuestionnaireSubmission {
        QuestionnaireSubmission {
            conviction_state: normalized(self.conviction_state),
            has_marijuana_conviction: normalized(self.has_marijuana_conviction),
            offense_types: self
                .offense_types
                .as_deref()
                .map(split_multi)
                .unwrap_or_default(),
            conviction_month: normalized(self.conviction_month),
            conviction_year: normalized(self.conviction_year),
            possession_amount: normalized(self.possession_amount),
            age_at_offense: normalized(self.age_at_offense),
            received_notice: normalized(self.received_notice),
            conviction_level: normalized(self.conviction_level),
            served_time: normalized(self.served_time),
            release_month: normalized(self.release_month),
            release_year: normalized(self.release_year),
            other_convictions: normalized(self.other_convictions),
            on_supervision: normalized(self.on_supervision),
            has_excluded_offenses: normalized(self.has_excluded_offenses),
            total_convictions: normalized(self.total_convictions),
            total_felonies: normalized(self.total_felonies),
            ten_years_passed: normalized(self.ten_years_passed),
            sentence_completed: normalized(self.sentence_completed),
        }
    }
}

fn normalized(raw: Option<String>) -> Option<String> {
    raw.as_deref().and_then(normalize_answer)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
