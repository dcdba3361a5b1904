// src/services/solution.rs

//! Answer correctness evaluation.

use std::collections::{BTreeMap, BTreeSet};

use serde_yaml::Value as Yaml;

use crate::models::{
    answer::AnswerStatus,
    challenge::{Challenge, ChallengeType},
};

/// Value submitted when the user skips a challenge.
pub const ABANDONED_VALUE: &str = "#ABAND#";

/// YAML rendering of "no details".
pub const NO_DETAILS: &str = "null\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub result: AnswerStatus,
    pub result_details: String,
}

impl Evaluation {
    fn without_details(result: AnswerStatus) -> Self {
        Self {
            result,
            result_details: NO_DETAILS.to_string(),
        }
    }

    fn from_bool(correct: bool) -> Self {
        Self::without_details(if correct {
            AnswerStatus::Ok
        } else {
            AnswerStatus::Ko
        })
    }
}

/// Compares `value` to the challenge solution using the rule of its type.
pub fn evaluate(challenge: &Challenge, value: &str) -> Evaluation {
    if value.trim() == ABANDONED_VALUE {
        return Evaluation::without_details(AnswerStatus::Aband);
    }

    let solution = challenge
        .solution
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    match (challenge.kind(), solution) {
        (ChallengeType::Unknown, _) => {
            tracing::warn!(
                challenge_id = %challenge.id,
                challenge_type = %challenge.challenge_type,
                "no comparison rule for challenge type"
            );
            Evaluation::without_details(AnswerStatus::Unimplemented)
        }
        (_, None) => {
            tracing::warn!(challenge_id = %challenge.id, "challenge has no solution");
            Evaluation::from_bool(false)
        }
        (ChallengeType::Qcu, Some(solution)) => Evaluation::from_bool(value.trim() == solution),
        (ChallengeType::Qcm, Some(solution)) => {
            Evaluation::from_bool(choice_set(value) == choice_set(solution))
        }
        (ChallengeType::Qroc, Some(solution)) => {
            let accepted: BTreeSet<String> = solution
                .lines()
                .map(normalize)
                .filter(|s| !s.is_empty())
                .collect();
            Evaluation::from_bool(accepted.contains(&normalize(value)))
        }
        (ChallengeType::QrocmInd, Some(solution)) => evaluate_independent_fields(value, solution),
        (ChallengeType::QrocmDep, Some(solution)) => evaluate_dependent_fields(value, solution),
    }
}

/// Each field is checked against its own accepted answers.
fn evaluate_independent_fields(value: &str, solution: &str) -> Evaluation {
    let Some(expected) = parse_accepted_answers(solution) else {
        tracing::warn!("unreadable solution for independent fields challenge");
        return Evaluation::from_bool(false);
    };
    let given = parse_field_values(value).unwrap_or_default();

    let details: BTreeMap<String, bool> = expected
        .iter()
        .map(|(field, accepted)| {
            let correct = given
                .get(field)
                .map(|answer| accepted.contains(&normalize(answer)))
                .unwrap_or(false);
            (field.clone(), correct)
        })
        .collect();

    let all_correct = !details.is_empty() && details.values().all(|ok| *ok);

    Evaluation {
        result: if all_correct {
            AnswerStatus::Ok
        } else {
            AnswerStatus::Ko
        },
        result_details: serde_yaml::to_string(&details).unwrap_or_else(|_| NO_DETAILS.to_string()),
    }
}

/// Fields share one pool of accepted answers; each must use a distinct one.
fn evaluate_dependent_fields(value: &str, solution: &str) -> Evaluation {
    let Some(expected) = parse_accepted_answers(solution) else {
        tracing::warn!("unreadable solution for dependent fields challenge");
        return Evaluation::from_bool(false);
    };
    let given = parse_field_values(value).unwrap_or_default();

    let pool: BTreeSet<String> = expected.values().flatten().cloned().collect();
    let mut used = BTreeSet::new();
    for answer in given.values() {
        let answer = normalize(answer);
        if !pool.contains(&answer) || !used.insert(answer) {
            return Evaluation::from_bool(false);
        }
    }

    Evaluation::from_bool(!expected.is_empty() && used.len() == expected.len())
}

fn choice_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lower-cases, drops punctuation and collapses whitespace.
fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if is_punctuation(c) { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation() || matches!(c, '«' | '»' | '’' | '‘' | '“' | '”' | '…')
}

/// Parses `field: [accepted, ...]` (a single scalar is accepted too).
/// Accepted answers are returned normalized.
fn parse_accepted_answers(raw: &str) -> Option<BTreeMap<String, BTreeSet<String>>> {
    let Yaml::Mapping(mapping) = serde_yaml::from_str::<Yaml>(raw).ok()? else {
        return None;
    };

    let mut result = BTreeMap::new();
    for (key, value) in mapping {
        let field = scalar_to_string(&key)?;
        let accepted: BTreeSet<String> = match value {
            Yaml::Sequence(items) => items
                .iter()
                .filter_map(scalar_to_string)
                .map(|s| normalize(&s))
                .collect(),
            other => scalar_to_string(&other)
                .map(|s| normalize(&s))
                .into_iter()
                .collect(),
        };
        result.insert(field, accepted);
    }
    Some(result)
}

/// Parses `field: value` pairs submitted by the client.
fn parse_field_values(raw: &str) -> Option<BTreeMap<String, String>> {
    let Yaml::Mapping(mapping) = serde_yaml::from_str::<Yaml>(raw).ok()? else {
        return None;
    };

    Some(
        mapping
            .iter()
            .filter_map(|(key, value)| {
                Some((scalar_to_string(key)?, scalar_to_string(value).unwrap_or_default()))
            })
            .collect(),
    )
}

fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
