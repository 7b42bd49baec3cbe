use super::domain::{
    AnswerSet, AssessmentDefinition, AssessmentResult, Subscale, SubscaleDefinition,
    SubscaleScores,
};

/// Scoring failures. `NoMatchingRange` signals malformed catalog data rather
/// than bad user input and is treated as fatal by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("question '{question_id}' has no recorded answer")]
    MissingAnswer { question_id: String },
    #[error("value {value} is not an option for question '{question_id}'")]
    InvalidAnswer { question_id: String, value: u8 },
    #[error("answer refers to unknown question '{question_id}'")]
    UnknownQuestion { question_id: String },
    #[error("no scoring range covers total {total}; assessment ranges are misconfigured")]
    NoMatchingRange { total: u16 },
}

impl ScoringError {
    /// True for the data-integrity case that should never happen on a
    /// well-formed definition.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ScoringError::NoMatchingRange { .. })
    }
}

/// Score a completed answer set against a definition.
///
/// Pure and order-independent. The answer set must hold exactly one declared
/// option value per question; partial or stray answers are rejected up front
/// instead of silently producing an under-counted total.
pub fn score(
    definition: &AssessmentDefinition,
    answers: &AnswerSet,
) -> Result<AssessmentResult, ScoringError> {
    for question_id in answers.question_ids() {
        if definition.question(question_id).is_none() {
            return Err(ScoringError::UnknownQuestion {
                question_id: question_id.to_string(),
            });
        }
    }

    let mut total_score: u16 = 0;
    for question in &definition.questions {
        let value = answers
            .get(&question.id)
            .ok_or_else(|| ScoringError::MissingAnswer {
                question_id: question.id.clone(),
            })?;
        if !question.accepts(value) {
            return Err(ScoringError::InvalidAnswer {
                question_id: question.id.clone(),
                value,
            });
        }
        total_score += u16::from(value);
    }

    let band = definition
        .scoring_ranges
        .iter()
        .find(|range| range.contains(total_score))
        .cloned()
        .ok_or(ScoringError::NoMatchingRange { total: total_score })?;

    let subscales = definition
        .subscales
        .as_ref()
        .map(|partition| subscale_scores(partition, answers));

    Ok(AssessmentResult {
        assessment_id: definition.id.clone(),
        total_score,
        max_possible_score: definition.max_possible_score(),
        band,
        subscales,
    })
}

fn subscale_scores(partition: &SubscaleDefinition, answers: &AnswerSet) -> SubscaleScores {
    let group_score = |subscale: Subscale| -> u16 {
        let raw: u16 = partition
            .items(subscale)
            .iter()
            .filter_map(|item| answers.get(item))
            .map(u16::from)
            .sum();
        raw * SubscaleDefinition::MULTIPLIER
    };

    SubscaleScores {
        depression: group_score(Subscale::Depression),
        anxiety: group_score(Subscale::Anxiety),
        stress: group_score(Subscale::Stress),
    }
}
