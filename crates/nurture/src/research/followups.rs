/// Maximum follow-up questions surfaced per turn.
const FOLLOW_UP_CAP: usize = 4;

/// First-person family-reference phrases that mark a query as personal
/// rather than a general research question.
const PERSONAL_PHRASES: &[&str] = &[
    "my child",
    "my son",
    "my daughter",
    "i have",
    "i am",
    "we are",
    "our family",
    "my situation",
    "my experience",
    "what should i do",
    "how can i help",
    "my kid",
    "my toddler",
    "my baby",
];

/// Supportive meta-questions offered after a personal exchange, regardless
/// of topic.
const PERSONAL_FOLLOW_UPS: &[&str] = &[
    "Can you help me with a specific situation?",
    "What if this approach doesn't work for my family?",
    "How do I know if I'm on the right track?",
    "What should I do if things get worse?",
    "Can you give me more specific steps?",
    "What if my partner has a different approach?",
    "How do I stay consistent with this?",
    "What are some warning signs to watch for?",
];

/// Topic keyword groups checked in fixed priority order; first match wins.
const TOPIC_FOLLOW_UPS: &[(&[&str], &[&str])] = &[
    (
        &["tantrum", "temper"],
        &[
            "What are the warning signs before a tantrum starts?",
            "How can I prevent tantrums in public places?",
            "When should I seek professional help for tantrums?",
            "What's the difference between normal and concerning tantrum behavior?",
        ],
    ),
    (
        &["sleep", "bedtime"],
        &[
            "How much sleep does my child need at different ages?",
            "What if my child refuses to go to bed?",
            "How can I handle night wakings?",
            "What are the effects of insufficient sleep on children?",
        ],
    ),
    (
        &["screen", "digital"],
        &[
            "What are the recommended screen time limits by age?",
            "How can I make screen time more educational?",
            "What are the signs of screen addiction in children?",
            "How does screen time affect sleep and behavior?",
        ],
    ),
    (
        &["discipline", "behavior"],
        &[
            "What's the difference between discipline and punishment?",
            "How can I use positive reinforcement effectively?",
            "What are age-appropriate consequences?",
            "How do I handle aggressive behavior in children?",
        ],
    ),
    (
        &["development", "learning"],
        &[
            "What are the key developmental milestones?",
            "How can I support my child's learning at home?",
            "What are signs of developmental delays?",
            "How does play contribute to development?",
        ],
    ),
];

const GENERIC_FOLLOW_UPS: &[&str] = &[
    "What does the latest research say about this?",
    "Are there any age-specific considerations?",
    "What are common mistakes parents make?",
    "When should I consult a professional?",
];

/// Whether the query reads as a parent describing their own situation.
pub fn is_personal_question(query: &str) -> bool {
    let query = query.to_lowercase();
    PERSONAL_PHRASES
        .iter()
        .any(|phrase| query.contains(phrase))
}

/// Deterministic follow-up selection: a fixed supportive list for personal
/// queries, otherwise the first matching topic table, otherwise the generic
/// list. Pure lookup; no ranking, no randomness.
pub fn follow_up_questions(query: &str, personal: bool) -> Vec<String> {
    let pool: &[&str] = if personal {
        PERSONAL_FOLLOW_UPS
    } else {
        let query = query.to_lowercase();
        TOPIC_FOLLOW_UPS
            .iter()
            .find(|(triggers, _)| triggers.iter().any(|trigger| query.contains(trigger)))
            .map(|(_, questions)| *questions)
            .unwrap_or(GENERIC_FOLLOW_UPS)
    };

    pool.iter()
        .take(FOLLOW_UP_CAP)
        .map(|question| question.to_string())
        .collect()
}
