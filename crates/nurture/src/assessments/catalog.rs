use super::domain::{
    AnswerOption, AssessmentDefinition, Question, ScoringRange, SubscaleDefinition,
};

/// The built-in questionnaire library. Definitions are assembled once and
/// shared read-only across requests.
#[derive(Debug)]
pub struct AssessmentCatalog {
    definitions: Vec<AssessmentDefinition>,
}

impl AssessmentCatalog {
    pub fn standard() -> Self {
        Self {
            definitions: vec![
                dass_21(),
                parenting_stress(),
                relationship_satisfaction(),
            ],
        }
    }

    pub fn definitions(&self) -> &[AssessmentDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: &str) -> Option<&AssessmentDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.id == id)
    }
}

fn option(value: u8, label: &str) -> AnswerOption {
    AnswerOption {
        value,
        label: label.to_string(),
    }
}

fn range(min: u16, max: u16, label: &str, description: &str) -> ScoringRange {
    ScoringRange {
        min,
        max,
        label: label.to_string(),
        description: description.to_string(),
    }
}

/// Standard DASS frequency scale shared by every DASS-21 item.
fn dass_options() -> Vec<AnswerOption> {
    vec![
        option(0, "Did not apply to me at all"),
        option(1, "Applied to me to some degree, or some of the time"),
        option(
            2,
            "Applied to me to a considerable degree, or a good part of the time",
        ),
        option(3, "Applied to me very much, or most of the time"),
    ]
}

fn dass_question(number: usize, text: &str) -> Question {
    Question {
        id: format!("q{number}"),
        text: text.to_string(),
        options: dass_options(),
    }
}

fn item_ids(numbers: &[usize]) -> Vec<String> {
    numbers.iter().map(|number| format!("q{number}")).collect()
}

fn dass_21() -> AssessmentDefinition {
    let texts = [
        "I found it hard to wind down",
        "I was aware of dryness of my mouth",
        "I couldn't seem to experience any positive feeling at all",
        "I experienced breathing difficulty (e.g., excessively rapid breathing, breathlessness in the absence of physical exertion)",
        "I found it difficult to work up the initiative to do things",
        "I tended to over-react to situations",
        "I experienced trembling (e.g., in the hands)",
        "I felt that I was using a lot of nervous energy",
        "I was worried about situations in which I might panic and make a fool of myself",
        "I felt that I had nothing to look forward to",
        "I found myself getting agitated",
        "I found it difficult to relax",
        "I felt down-hearted and blue",
        "I was intolerant of anything that kept me from getting on with what I was doing",
        "I felt I was close to panic",
        "I was unable to become enthusiastic about anything",
        "I felt I wasn't worth much as a person",
        "I felt that I was rather touchy",
        "I was aware of the action of my heart in the absence of physical exertion (e.g., sense of heart rate increase, heart missing a beat)",
        "I felt scared without any good reason",
        "I felt that life was meaningless",
    ];

    let questions = texts
        .iter()
        .enumerate()
        .map(|(index, text)| dass_question(index + 1, text))
        .collect();

    AssessmentDefinition {
        id: "dass-21".to_string(),
        title: "DASS-21: Depression, Anxiety & Stress Scale".to_string(),
        description: "A validated 21-item scale to assess depression, anxiety, and stress levels. This is a widely used clinical assessment tool.".to_string(),
        questions,
        // The reachable total is 0-63; the top band is open-ended past the
        // clinical 28+ cutoff so every total maps to exactly one band.
        scoring_ranges: vec![
            range(0, 9, "Normal", "Your depression, anxiety, and stress levels are within normal range."),
            range(10, 13, "Mild", "You may be experiencing mild symptoms. Consider self-care strategies and monitoring."),
            range(14, 20, "Moderate", "You are experiencing moderate symptoms. Professional support may be beneficial."),
            range(21, 27, "Severe", "You are experiencing severe symptoms. Professional support is recommended."),
            range(28, 63, "Extremely Severe", "You are experiencing extremely severe symptoms. Immediate professional support is strongly recommended."),
        ],
        subscales: Some(SubscaleDefinition {
            depression_items: item_ids(&[3, 5, 10, 13, 16, 17, 21]),
            anxiety_items: item_ids(&[2, 4, 7, 9, 15, 19, 20]),
            stress_items: item_ids(&[1, 6, 8, 11, 12, 14, 18]),
        }),
    }
}

fn frequency_ascending() -> Vec<AnswerOption> {
    vec![
        option(1, "Never"),
        option(2, "Rarely"),
        option(3, "Sometimes"),
        option(4, "Often"),
        option(5, "Always"),
    ]
}

fn frequency_descending() -> Vec<AnswerOption> {
    vec![
        option(5, "Always"),
        option(4, "Often"),
        option(3, "Sometimes"),
        option(2, "Rarely"),
        option(1, "Never"),
    ]
}

fn quality_descending(top: &str, high: &str, mid: &str, low: &str, bottom: &str) -> Vec<AnswerOption> {
    vec![
        option(5, top),
        option(4, high),
        option(3, mid),
        option(2, low),
        option(1, bottom),
    ]
}

fn parenting_stress() -> AssessmentDefinition {
    AssessmentDefinition {
        id: "parenting-stress".to_string(),
        title: "Parenting Stress Assessment".to_string(),
        description: "Evaluate your current stress levels related to parenting and identify areas for support.".to_string(),
        questions: vec![
            Question {
                id: "q1".to_string(),
                text: "How often do you feel overwhelmed by your parenting responsibilities?".to_string(),
                options: frequency_ascending(),
            },
            Question {
                id: "q2".to_string(),
                text: "How confident do you feel in your parenting decisions?".to_string(),
                options: quality_descending(
                    "Very confident",
                    "Somewhat confident",
                    "Neutral",
                    "Somewhat uncertain",
                    "Very uncertain",
                ),
            },
            Question {
                id: "q3".to_string(),
                text: "How often do you feel supported in your parenting role?".to_string(),
                options: frequency_descending(),
            },
            Question {
                id: "q4".to_string(),
                text: "How well do you manage work-life balance as a parent?".to_string(),
                options: quality_descending("Very well", "Well", "Neutral", "Poorly", "Very poorly"),
            },
            Question {
                id: "q5".to_string(),
                text: "How often do you feel guilty about your parenting?".to_string(),
                options: frequency_ascending(),
            },
        ],
        scoring_ranges: vec![
            range(5, 10, "Low Stress", "You're managing parenting stress well. Continue your current strategies."),
            range(11, 15, "Moderate Stress", "You may benefit from additional support and stress management techniques."),
            range(16, 20, "High Stress", "Consider seeking professional support and implementing stress reduction strategies."),
            range(21, 25, "Very High Stress", "Professional support is strongly recommended to help manage your stress levels."),
        ],
        subscales: None,
    }
}

fn relationship_satisfaction() -> AssessmentDefinition {
    AssessmentDefinition {
        id: "relationship-satisfaction".to_string(),
        title: "Relationship Satisfaction Scale".to_string(),
        description: "Assess the quality of your relationship and identify areas for improvement.".to_string(),
        questions: vec![
            Question {
                id: "q1".to_string(),
                text: "How satisfied are you with your current relationship?".to_string(),
                options: quality_descending(
                    "Very satisfied",
                    "Satisfied",
                    "Neutral",
                    "Dissatisfied",
                    "Very dissatisfied",
                ),
            },
            Question {
                id: "q2".to_string(),
                text: "How well do you communicate with your partner?".to_string(),
                options: quality_descending("Very well", "Well", "Neutral", "Poorly", "Very poorly"),
            },
            Question {
                id: "q3".to_string(),
                text: "How often do you feel supported by your partner?".to_string(),
                options: frequency_descending(),
            },
            Question {
                id: "q4".to_string(),
                text: "How well do you resolve conflicts together?".to_string(),
                options: quality_descending("Very well", "Well", "Neutral", "Poorly", "Very poorly"),
            },
            Question {
                id: "q5".to_string(),
                text: "How much do you trust your partner?".to_string(),
                options: quality_descending("Completely", "Mostly", "Somewhat", "A little", "Not at all"),
            },
        ],
        scoring_ranges: vec![
            range(5, 10, "Low Satisfaction", "Your relationship may benefit from professional counseling and communication work."),
            range(11, 15, "Moderate Satisfaction", "There are areas for improvement. Consider relationship counseling or workshops."),
            range(16, 20, "Good Satisfaction", "Your relationship is generally healthy with room for continued growth."),
            range(21, 25, "High Satisfaction", "You have a strong, healthy relationship. Keep nurturing it!"),
        ],
        subscales: None,
    }
}
