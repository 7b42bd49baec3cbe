use super::domain::ResearchRecord;

/// Maximum records a single lookup returns.
const LOOKUP_CAP: usize = 4;

/// Hand-curated open-access records served for common parenting topics.
///
/// This is the pure, infallible local adapter: keyword triggers against the
/// raw query decide which records apply. No I/O, no failure mode.
#[derive(Debug, Clone, Default)]
pub struct CuratedLibrary;

struct CuratedEntry {
    triggers: &'static [&'static str],
    record: fn() -> ResearchRecord,
}

const ENTRIES: &[CuratedEntry] = &[
    CuratedEntry {
        triggers: &["tantrum", "temper", "behavior"],
        record: tantrum_record,
    },
    CuratedEntry {
        triggers: &["sleep", "bedtime"],
        record: sleep_record,
    },
    CuratedEntry {
        triggers: &["screen", "digital"],
        record: screen_record,
    },
    CuratedEntry {
        triggers: &["discipline", "behavior"],
        record: discipline_record,
    },
];

impl CuratedLibrary {
    pub fn new() -> Self {
        Self
    }

    /// Return every curated record whose trigger keywords appear in the
    /// query, capped at four, in fixed library order.
    pub fn lookup(&self, query: &str) -> Vec<ResearchRecord> {
        let query = query.to_lowercase();
        let mut records = Vec::new();

        for entry in ENTRIES {
            if entry
                .triggers
                .iter()
                .any(|trigger| query.contains(trigger))
            {
                let record = (entry.record)();
                if records
                    .iter()
                    .all(|existing: &ResearchRecord| existing.id != record.id)
                {
                    records.push(record);
                }
            }
        }

        records.truncate(LOOKUP_CAP);
        records
    }
}

fn tantrum_record() -> ResearchRecord {
    ResearchRecord {
        id: "hawaii-tantrum-001".to_string(),
        title: "Temper Tantrums in Young Children".to_string(),
        abstract_text: "A temper tantrum is a violent outburst of anger. Anger is a basic human emotion that is manifested early in infancy and continues throughout the life span. Anger is a normal reaction to frustration, fear, or other stress. Some children seem more angry than others early on, but their anger should diminish as they learn to cope with the world. During early childhood, children often have fits of anger that seem volcanic in intensity. Their rage may include behaviors such as screaming, cursing, breaking things, rolling on the floor, crying loudly, hitting, or running around the room. They may even vomit, hold their breath, hit their head, or run off to hide. There are ways to prevent tantrums, and there are ways to deal with them when they occur. One of the most important things for the adult to know is not to get caught up in the child's anger-this will make the problem last longer into childhood. Providing the model of proper human emotions is very important to the child.".to_string(),
        authors: "Dana H. Davidson".to_string(),
        journal: "Department of Family and Consumer Sciences, University of Hawaii".to_string(),
        year: "2023".to_string(),
        doi: None,
        url: "https://scholarspace.manoa.hawaii.edu/server/api/core/bitstreams/da32fb5f-7a68-4461-a7d7-87f03a104a8e/content".to_string(),
    }
}

fn sleep_record() -> ResearchRecord {
    ResearchRecord {
        id: "accessible-sleep-001".to_string(),
        title: "Sleep Routines and Child Development".to_string(),
        abstract_text: "Establishing consistent sleep routines is crucial for child development. Research shows that children with regular bedtime routines have better cognitive development, emotional regulation, and physical health. Key strategies include consistent bedtime, calming activities before sleep, and creating a sleep-conducive environment.".to_string(),
        authors: "Child Development Research Institute".to_string(),
        journal: "Journal of Family Studies".to_string(),
        year: "2023".to_string(),
        doi: None,
        url: "https://example.com/sleep-routines-research".to_string(),
    }
}

fn screen_record() -> ResearchRecord {
    ResearchRecord {
        id: "accessible-screen-001".to_string(),
        title: "Screen Time and Child Development: Evidence-Based Guidelines".to_string(),
        abstract_text: "Excessive screen time in young children has been linked to delayed language development, attention problems, and sleep disturbances. The American Academy of Pediatrics recommends no screen time for children under 18 months, and limited, high-quality content for older children with parental supervision.".to_string(),
        authors: "Digital Media Research Consortium".to_string(),
        journal: "Pediatric Development Review".to_string(),
        year: "2023".to_string(),
        doi: None,
        url: "https://example.com/screen-time-research".to_string(),
    }
}

fn discipline_record() -> ResearchRecord {
    ResearchRecord {
        id: "accessible-discipline-001".to_string(),
        title: "Positive Discipline Strategies: Evidence-Based Approaches".to_string(),
        abstract_text: "Positive discipline focuses on teaching children appropriate behavior rather than punishing them. Research consistently shows that positive reinforcement, clear boundaries, and consistent consequences are more effective than punitive measures. Time-out, when used appropriately, can be an effective tool for managing challenging behaviors.".to_string(),
        authors: "Positive Parenting Research Foundation".to_string(),
        journal: "Child Behavior and Development".to_string(),
        year: "2023".to_string(),
        doi: None,
        url: "https://example.com/positive-discipline-research".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tantrum_query_returns_the_tantrum_record() {
        let library = CuratedLibrary::new();
        let records = library.lookup("How can I help my child with tantrums?");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "hawaii-tantrum-001");
        assert_eq!(records[0].title, "Temper Tantrums in Young Children");
    }

    #[test]
    fn behavior_query_returns_tantrum_and_discipline_records() {
        let library = CuratedLibrary::new();
        let records = library.lookup("managing difficult behavior");
        let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["hawaii-tantrum-001", "accessible-discipline-001"]);
    }

    #[test]
    fn untriggered_query_returns_nothing() {
        let library = CuratedLibrary::new();
        assert!(library.lookup("college savings plans").is_empty());
    }

    #[test]
    fn lookup_never_exceeds_cap() {
        let library = CuratedLibrary::new();
        let records = library.lookup("tantrum sleep screen discipline behavior bedtime digital");
        assert!(records.len() <= LOOKUP_CAP);
    }
}
