use super::domain::ResearchRecord;

/// Parenting and child-development vocabulary that marks a record as
/// topically in scope.
const RELEVANCE_TERMS: &[&str] = &[
    "parent",
    "child",
    "children",
    "infant",
    "toddler",
    "adolescent",
    "teen",
    "family",
    "maternal",
    "paternal",
    "caregiver",
    "guardian",
    "development",
    "behavior",
    "behavioral",
    "psychology",
    "psychological",
    "education",
    "learning",
    "cognitive",
    "emotional",
    "social",
    "discipline",
    "punishment",
    "reward",
    "reinforcement",
    "sleep",
    "bedtime",
    "routine",
    "schedule",
    "screen",
    "digital",
    "media",
    "technology",
    "nutrition",
    "feeding",
    "eating",
    "meal",
    "safety",
    "injury",
    "prevention",
    "health",
    "wellness",
    "mental health",
    "school",
    "academic",
    "achievement",
    "play",
    "toys",
    "activities",
    "communication",
    "language",
    "speech",
    "autism",
    "adhd",
    "special needs",
    "tantrum",
    "temper",
    "anger",
    "aggression",
    "anxiety",
    "depression",
    "stress",
    "attachment",
    "bonding",
    "relationship",
];

/// Clinical/medical vocabulary that marks a record as out of scope even when
/// an allow-list term also appears.
const EXCLUDED_TERMS: &[&str] = &[
    "cancer",
    "tumor",
    "carcinoma",
    "metastasis",
    "diabetes",
    "hypertension",
    "cardiovascular",
    "surgery",
    "surgical",
    "operation",
    "drug",
    "pharmaceutical",
    "medication",
    "virus",
    "bacterial",
    "infection",
    "congenital",
    "genetic",
    "chromosomal",
    "disease",
    "disorder",
    "syndrome",
    "treatment",
    "therapy",
    "intervention",
    "mortality",
    "death",
    "fatal",
];

/// Minimum length for a query word to count as a match signal on its own.
const MIN_QUERY_TERM_LEN: usize = 3;

/// Allow/deny-list predicate deciding whether a candidate record is topically
/// in scope. Matching is case-insensitive substring containment over the
/// concatenated title+abstract, not tokenized word matching; that looseness is
/// inherited behavior and intentionally preserved.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    allow_terms: Vec<String>,
    deny_terms: Vec<String>,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(RELEVANCE_TERMS, EXCLUDED_TERMS)
    }
}

impl RelevanceFilter {
    /// Build a filter over explicit term lists. Tests substitute small lists
    /// here; production uses [`RelevanceFilter::default`].
    pub fn new(allow_terms: &[&str], deny_terms: &[&str]) -> Self {
        Self {
            allow_terms: allow_terms.iter().map(|t| t.to_lowercase()).collect(),
            deny_terms: deny_terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// A record passes iff it carries an allow-list term or a sufficiently
    /// long word from the user's query, and no deny-list term.
    pub fn is_relevant(&self, record: &ResearchRecord, query: &str) -> bool {
        let haystack = record.search_text();

        if self.deny_terms.iter().any(|term| haystack.contains(term)) {
            return false;
        }

        if self.allow_terms.iter().any(|term| haystack.contains(term)) {
            return true;
        }

        let query = query.to_lowercase();
        query
            .split_whitespace()
            .filter(|word| word.len() >= MIN_QUERY_TERM_LEN)
            .any(|word| haystack.contains(word))
    }
}
