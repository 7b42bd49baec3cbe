use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: u8,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn max_value(&self) -> u8 {
        self.options
            .iter()
            .map(|option| option.value)
            .max()
            .unwrap_or(0)
    }

    pub fn min_value(&self) -> u8 {
        self.options
            .iter()
            .map(|option| option.value)
            .min()
            .unwrap_or(0)
    }

    pub fn accepts(&self, value: u8) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

/// Inclusive score band. The catalog guarantees bands cover the definition's
/// reachable score space with no gaps and no overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRange {
    pub min: u16,
    pub max: u16,
    pub label: String,
    pub description: String,
}

impl ScoringRange {
    pub fn contains(&self, total: u16) -> bool {
        self.min <= total && total <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscale {
    Depression,
    Anxiety,
    Stress,
}

impl Subscale {
    pub const fn ordered() -> [Self; 3] {
        [Self::Depression, Self::Anxiety, Self::Stress]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Depression => "Depression",
            Self::Anxiety => "Anxiety",
            Self::Stress => "Stress",
        }
    }
}

/// DASS-21 subscale partition. Each group's raw 0-3 sum over seven items is
/// doubled to land on the clinical 0-42 reporting scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscaleDefinition {
    pub depression_items: Vec<String>,
    pub anxiety_items: Vec<String>,
    pub stress_items: Vec<String>,
}

impl SubscaleDefinition {
    pub const MULTIPLIER: u16 = 2;

    pub fn items(&self, subscale: Subscale) -> &[String] {
        match subscale {
            Subscale::Depression => &self.depression_items,
            Subscale::Anxiety => &self.anxiety_items,
            Subscale::Stress => &self.stress_items,
        }
    }
}

/// Immutable questionnaire definition, created once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub scoring_ranges: Vec<ScoringRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscales: Option<SubscaleDefinition>,
}

impl AssessmentDefinition {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn max_possible_score(&self) -> u16 {
        self.questions
            .iter()
            .map(|question| u16::from(question.max_value()))
            .sum()
    }

    pub fn min_possible_score(&self) -> u16 {
        self.questions
            .iter()
            .map(|question| u16::from(question.min_value()))
            .sum()
    }
}

/// Answers collected one question at a time; keyed by question id so scoring
/// stays order-independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier choice for the same question.
    pub fn record(&mut self, question_id: impl Into<String>, value: u8) {
        self.values.insert(question_id.into(), value);
    }

    pub fn get(&self, question_id: &str) -> Option<u8> {
        self.values.get(question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl FromIterator<(String, u8)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, u8)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Per-subscale scores on the clinical 0-42 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscaleScores {
    pub depression: u16,
    pub anxiety: u16,
    pub stress: u16,
}

/// Computed result; derived on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub assessment_id: String,
    pub total_score: u16,
    pub max_possible_score: u16,
    pub band: ScoringRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscales: Option<SubscaleScores>,
}
