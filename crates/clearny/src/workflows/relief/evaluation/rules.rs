use super::super::domain::{Answer, ConvictionLevel, OffenseType, ScreeningProfile};
use super::config::EvaluationConfig;
use super::verdict::{
    EligibilityDetails, EligibilityStatus, Recommendation, RecommendationKind,
};
use chrono::NaiveDate;

const DAYS_PER_YEAR: f64 = 365.25;

/// Derived inputs shared by every rule in the chain.
pub(crate) struct EligibilitySignals {
    pub conviction_date: Option<NaiveDate>,
    pub years_since_sentence: f64,
    pub total_convictions: u32,
    pub total_felonies: u32,
}

pub(crate) fn collect_signals(profile: &ScreeningProfile, as_of: NaiveDate) -> EligibilitySignals {
    EligibilitySignals {
        conviction_date: profile.conviction_date(),
        years_since_sentence: years_since_sentence(profile, as_of),
        total_convictions: profile.total_convictions.unwrap_or(0),
        total_felonies: profile.total_felonies.unwrap_or(0),
    }
}

/// Years elapsed since the sentence ended: measured from the release date
/// when time was served and a release date was given, otherwise from the
/// conviction date. No constructible date means 0.0, so a record with
/// unknown timing is treated as if the sentence just ended.
fn years_since_sentence(profile: &ScreeningProfile, as_of: NaiveDate) -> f64 {
    let basis = if profile.served_time == Some(Answer::Yes) {
        profile.release_date().or_else(|| profile.conviction_date())
    } else {
        profile.conviction_date()
    };

    match basis {
        Some(date) => {
            let days = (as_of - date).num_days();
            if days <= 0 {
                0.0
            } else {
                days as f64 / DAYS_PER_YEAR
            }
        }
        None => 0.0,
    }
}

/// Outcome produced by a matching rule.
pub(crate) struct RuleHit {
    pub status: EligibilityStatus,
    pub details: EligibilityDetails,
    pub recommendations: Vec<Recommendation>,
}

type RuleCheck = fn(&ScreeningProfile, &EligibilitySignals, &EvaluationConfig) -> Option<RuleHit>;

pub(crate) struct Rule {
    pub name: &'static str,
    pub check: RuleCheck,
}

/// Ordered rule table; the first matching entry decides the verdict.
pub(crate) const PRIORITY_CHAIN: &[Rule] = &[
    Rule {
        name: "supervision_lock",
        check: supervision_lock,
    },
    Rule {
        name: "excluded_offense_lock",
        check: excluded_offense_lock,
    },
    Rule {
        name: "incomplete_sentence_lock",
        check: incomplete_sentence_lock,
    },
    Rule {
        name: "mrta_expungement",
        check: mrta_expungement,
    },
    Rule {
        name: "clean_slate_misdemeanor",
        check: clean_slate_misdemeanor,
    },
    Rule {
        name: "clean_slate_felony",
        check: clean_slate_felony,
    },
    Rule {
        name: "petition_sealing",
        check: petition_sealing,
    },
];

fn supervision_lock(
    profile: &ScreeningProfile,
    _signals: &EligibilitySignals,
    _config: &EvaluationConfig,
) -> Option<RuleHit> {
    if profile.on_supervision != Some(Answer::Yes) {
        return None;
    }

    Some(RuleHit {
        status: EligibilityStatus::NotEligible,
        details: EligibilityDetails {
            primary_reason: "currently on probation or parole; relief is unavailable until supervision ends"
                .to_string(),
            waiting_period_required: true,
            ..EligibilityDetails::default()
        },
        recommendations: vec![Recommendation {
            kind: RecommendationKind::CompleteSupervision,
            title: "Complete supervision".to_string(),
            description: "Both automatic and petition-based relief require probation or parole to be finished first."
                .to_string(),
            timeline: "after supervision ends".to_string(),
            priority: 1,
        }],
    })
}

fn excluded_offense_lock(
    profile: &ScreeningProfile,
    _signals: &EligibilitySignals,
    _config: &EvaluationConfig,
) -> Option<RuleHit> {
    if profile.has_excluded_offenses != Some(Answer::Yes) {
        return None;
    }

    Some(RuleHit {
        status: EligibilityStatus::NotEligible,
        details: EligibilityDetails {
            primary_reason: "record includes an excluded offense (class A felony or sex offense)"
                .to_string(),
            excluded_offense: true,
            ..EligibilityDetails::default()
        },
        recommendations: vec![Recommendation {
            kind: RecommendationKind::LegalAssistance,
            title: "Speak with an attorney".to_string(),
            description: "Excluded offenses are permanently barred from automatic relief; counsel can review other options."
                .to_string(),
            timeline: "not applicable".to_string(),
            priority: 1,
        }],
    })
}

fn incomplete_sentence_lock(
    profile: &ScreeningProfile,
    _signals: &EligibilitySignals,
    _config: &EvaluationConfig,
) -> Option<RuleHit> {
    if profile.sentence_completed != Some(Answer::No) {
        return None;
    }

    Some(RuleHit {
        status: EligibilityStatus::NotEligible,
        details: EligibilityDetails {
            primary_reason: "sentence obligations are not yet completed".to_string(),
            waiting_period_required: true,
            ..EligibilityDetails::default()
        },
        recommendations: vec![Recommendation {
            kind: RecommendationKind::CompleteSentence,
            title: "Finish sentence obligations".to_string(),
            description: "Outstanding fines, fees, or community service must be resolved before any relief pathway opens."
                .to_string(),
            timeline: "before reapplying".to_string(),
            priority: 1,
        }],
    })
}

fn mrta_expungement(
    profile: &ScreeningProfile,
    signals: &EligibilitySignals,
    config: &EvaluationConfig,
) -> Option<RuleHit> {
    if !profile.has_offense(OffenseType::Possession) {
        return None;
    }
    if profile.possession_within_limit != Some(Answer::Yes) {
        return None;
    }
    // No constructible conviction date: fall through rather than guess.
    let conviction_date = signals.conviction_date?;
    if conviction_date >= config.mrta_cutoff {
        return None;
    }

    let notice = if profile.received_court_notice == Some(Answer::Yes) {
        "court notice already received; the expungement should be on file"
    } else {
        "no court notice on record; expungement status needs verification"
    };

    Some(RuleHit {
        status: EligibilityStatus::AutomaticExpungement,
        details: EligibilityDetails {
            primary_reason: "qualifying possession conviction predates the MRTA".to_string(),
            secondary_reasons: vec![notice.to_string()],
            mrta_applicable: true,
            ..EligibilityDetails::default()
        },
        recommendations: vec![Recommendation {
            kind: RecommendationKind::VerifyWithCourt,
            title: "Verify status with the court clerk".to_string(),
            description: "MRTA expungement is automatic, but the court record should confirm it was applied."
                .to_string(),
            timeline: "1-2 weeks".to_string(),
            priority: 1,
        }],
    })
}

fn clean_slate_misdemeanor(
    profile: &ScreeningProfile,
    signals: &EligibilitySignals,
    config: &EvaluationConfig,
) -> Option<RuleHit> {
    clean_slate(
        profile,
        signals,
        config,
        ConvictionLevel::Misdemeanor,
        config.misdemeanor_waiting_years,
        "misdemeanor conviction is past the three-year Clean Slate waiting period",
    )
}

fn clean_slate_felony(
    profile: &ScreeningProfile,
    signals: &EligibilitySignals,
    config: &EvaluationConfig,
) -> Option<RuleHit> {
    clean_slate(
        profile,
        signals,
        config,
        ConvictionLevel::Felony,
        config.felony_waiting_years,
        "felony conviction is past the eight-year Clean Slate waiting period",
    )
}

fn clean_slate(
    profile: &ScreeningProfile,
    signals: &EligibilitySignals,
    config: &EvaluationConfig,
    level: ConvictionLevel,
    waiting_years: f64,
    reason: &str,
) -> Option<RuleHit> {
    if profile.conviction_level != Some(level) {
        return None;
    }
    if signals.years_since_sentence < waiting_years {
        return None;
    }
    if profile.other_convictions != Some(Answer::No) {
        return None;
    }

    Some(RuleHit {
        status: EligibilityStatus::AutomaticSealing,
        details: EligibilityDetails {
            primary_reason: reason.to_string(),
            secondary_reasons: vec!["no other convictions reported".to_string()],
            clean_slate_applicable: true,
            ..EligibilityDetails::default()
        },
        recommendations: vec![Recommendation {
            kind: RecommendationKind::MonitorCleanSlate,
            title: "Monitor Clean Slate implementation".to_string(),
            description: "Sealing happens automatically once the state processes eligible records; no filing is required."
                .to_string(),
            timeline: config.clean_slate_effective.clone(),
            priority: 1,
        }],
    })
}

fn petition_sealing(
    profile: &ScreeningProfile,
    signals: &EligibilitySignals,
    config: &EvaluationConfig,
) -> Option<RuleHit> {
    if profile.ten_years_passed != Some(Answer::Yes) {
        return None;
    }
    if signals.total_convictions > config.max_petition_convictions {
        return None;
    }
    if signals.total_felonies > config.max_petition_felonies {
        return None;
    }

    Some(RuleHit {
        status: EligibilityStatus::PetitionSealing,
        details: EligibilityDetails {
            primary_reason: "meets the CPL 160.59 petition criteria".to_string(),
            secondary_reasons: vec![
                "ten years have passed since sentence completion".to_string(),
                format!(
                    "{} total conviction(s) and {} felony conviction(s) are within the petition limits",
                    signals.total_convictions, signals.total_felonies
                ),
            ],
            petition_applicable: true,
            ..EligibilityDetails::default()
        },
        recommendations: vec![
            Recommendation {
                kind: RecommendationKind::FilePetition,
                title: "File a sealing petition".to_string(),
                description: "Sealing under CPL 160.59 is discretionary; the petition is filed with the sentencing court."
                    .to_string(),
                timeline: "6-12 months".to_string(),
                priority: 1,
            },
            Recommendation {
                kind: RecommendationKind::LegalAssistance,
                title: "Consider legal assistance".to_string(),
                description: "Petitions with supporting documentation and counsel are granted more often."
                    .to_string(),
                timeline: "2-4 weeks".to_string(),
                priority: 2,
            },
        ],
    })
}

/// Step taken when no rule in the chain matched: not eligible, with the
/// specific blocking reason re-derived in a fixed order. This is the single
/// source of truth for fallback wording.
pub(crate) fn fallback_outcome(
    profile: &ScreeningProfile,
    signals: &EligibilitySignals,
    config: &EvaluationConfig,
) -> RuleHit {
    let mut waiting_period_required = false;
    let mut timeline = "periodically".to_string();

    let primary_reason = if profile.conviction_level == Some(ConvictionLevel::Misdemeanor)
        && signals.years_since_sentence < config.misdemeanor_waiting_years
    {
        waiting_period_required = true;
        let remaining = config.misdemeanor_waiting_years - signals.years_since_sentence;
        timeline = format!("in about {remaining:.1} years");
        format!(
            "about {remaining:.1} more years until the three-year Clean Slate waiting period is met"
        )
    } else if profile.conviction_level == Some(ConvictionLevel::Felony)
        && signals.years_since_sentence < config.felony_waiting_years
    {
        waiting_period_required = true;
        let remaining = config.felony_waiting_years - signals.years_since_sentence;
        timeline = format!("in about {remaining:.1} years");
        format!(
            "about {remaining:.1} more years until the eight-year Clean Slate waiting period is met"
        )
    } else if profile.other_convictions == Some(Answer::Yes) {
        "additional convictions prevent automatic sealing under the Clean Slate Act".to_string()
    } else if signals.total_convictions > config.max_petition_convictions {
        format!(
            "too many total convictions for petition-based sealing (max {})",
            config.max_petition_convictions
        )
    } else if profile.ten_years_passed == Some(Answer::No) {
        "less than ten years have passed since sentence completion; petition-based sealing requires ten"
            .to_string()
    } else {
        "record does not meet the current relief criteria".to_string()
    };

    RuleHit {
        status: EligibilityStatus::NotEligible,
        details: EligibilityDetails {
            primary_reason,
            waiting_period_required,
            ..EligibilityDetails::default()
        },
        recommendations: vec![Recommendation {
            kind: RecommendationKind::Reapply,
            title: "Check eligibility again later".to_string(),
            description: "Waiting periods and conviction history change over time; re-screening is free."
                .to_string(),
            timeline,
            priority: 1,
        }],
    }
}

/// Universal closing recommendation appended to every verdict.
pub(crate) fn report_recommendation() -> Recommendation {
    Recommendation {
        kind: RecommendationKind::DownloadReport,
        title: "Download your complete report".to_string(),
        description: "The full report explains the determination and lists every next step in detail."
            .to_string(),
        timeline: "immediately".to_string(),
        priority: 0,
    }
}
