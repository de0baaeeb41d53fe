//! Admissions responder

use std::sync::Arc;

use super::{EntrySelector, Responder};
use crate::format::{Answer, Section};
use crate::knowledge::{AdmissionsFacts, Category, KnowledgeBase, KnowledgeEntry, Payload};
use crate::matcher::SimilarityMatcher;
use crate::query::Query;
use crate::question::QuestionType;

const FALLBACK_PROMPT: &str = "I can help with admissions, but I couldn't find a close match. \
     Try asking about requirements, deadlines, or fees for a specific program.";

/// Answers admissions queries from degree-level entries
#[derive(Debug, Clone)]
pub struct AdmissionsResponder {
    selector: EntrySelector,
}

impl AdmissionsResponder {
    /// Create a responder over shared knowledge
    #[must_use]
    pub fn new(knowledge: Arc<KnowledgeBase>, matcher: Arc<SimilarityMatcher>) -> Self {
        Self {
            selector: EntrySelector::new(Category::Admissions, knowledge, matcher),
        }
    }
}

impl Responder for AdmissionsResponder {
    fn category(&self) -> Category {
        Category::Admissions
    }

    fn respond(&self, query: &Query, question_type: QuestionType) -> Answer {
        match self.selector.select(query) {
            Some(entry) => render(entry, question_type),
            None => self.selector.fallback(query, FALLBACK_PROMPT),
        }
    }
}

/// Frame an admissions entry for the question type
///
/// WHAT foregrounds requirements, HOW the application steps and WHEN the
/// deadline
fn render(entry: &KnowledgeEntry, question_type: QuestionType) -> Answer {
    let Payload::Admissions(facts) = entry.payload() else {
        // Entry sets are validated per category at construction
        return Answer {
            keys: vec![entry.key().to_string()],
            sections: vec![Section::text(entry.title())],
        };
    };

    let summary = || Section::text(facts.summary.clone());
    let requirements = || Section::list("Requirements", facts.requirements.clone());
    let steps = || Section::list("How to apply", facts.steps.clone());
    let deadline = || optional("Deadline", facts.deadline.as_deref());
    let fees = || optional("Fees", facts.fees.as_deref());

    let sections = match question_type {
        QuestionType::What => vec![summary(), requirements(), deadline(), fees()],
        QuestionType::How => vec![summary(), steps(), requirements()],
        QuestionType::When => vec![deadline(), summary()],
        QuestionType::Why => vec![summary(), requirements()],
        QuestionType::Other => all_fields(facts),
    };

    Answer {
        keys: vec![entry.key().to_string()],
        sections,
    }
}

fn all_fields(facts: &AdmissionsFacts) -> Vec<Section> {
    vec![
        Section::text(facts.summary.clone()),
        Section::list("Requirements", facts.requirements.clone()),
        optional("Deadline", facts.deadline.as_deref()),
        optional("Fees", facts.fees.as_deref()),
        Section::list("How to apply", facts.steps.clone()),
    ]
}

/// Empty sections are dropped by the formatter
fn optional(heading: &str, value: Option<&str>) -> Section {
    Section::titled_text(heading, value.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{ResponseFormatter, SectionBody};
    use crate::knowledge::{GuidanceFacts, Lexicon};

    fn knowledge() -> Arc<KnowledgeBase> {
        let master = KnowledgeEntry::new(
            "master",
            "Master's programs",
            "master degree requirements",
            Payload::Admissions(AdmissionsFacts {
                summary: "Graduate study.".to_string(),
                requirements: vec!["Bachelor's degree".to_string()],
                deadline: Some("February 1".to_string()),
                fees: Some("$90".to_string()),
                steps: vec!["Submit the application".to_string()],
            }),
        )
        .unwrap()
        .with_aliases(["graduate admission"]);

        let phd = KnowledgeEntry::new(
            "phd",
            "Doctoral programs",
            "phd doctoral program",
            Payload::Admissions(AdmissionsFacts {
                summary: "Research degrees.".to_string(),
                ..AdmissionsFacts::default()
            }),
        )
        .unwrap();

        let study = KnowledgeEntry::new(
            "study",
            "Study skills",
            "study skills",
            Payload::Guidance(GuidanceFacts::default()),
        )
        .unwrap();

        Arc::new(
            KnowledgeBase::new(Lexicon::new("oos", ["weather"]), vec![master, phd], vec![study])
                .unwrap(),
        )
    }

    fn responder() -> AdmissionsResponder {
        AdmissionsResponder::new(knowledge(), Arc::new(SimilarityMatcher::default()))
    }

    #[test]
    fn test_what_foregrounds_requirements() {
        let query = Query::new("What are the requirements for a Master's degree?");
        let answer = responder().respond(&query, QuestionType::What);

        assert_eq!(answer.keys, ["master"]);
        assert_eq!(answer.sections[1].heading.as_deref(), Some("Requirements"));
        let text = ResponseFormatter.render(&answer.sections);
        assert!(text.contains("Deadline: February 1"));
        assert!(text.contains("Fees: $90"));
    }

    #[test]
    fn test_how_foregrounds_steps() {
        let query = Query::new("How do I apply for graduate admission?");
        let answer = responder().respond(&query, QuestionType::How);

        assert_eq!(answer.keys, ["master"]);
        assert_eq!(answer.sections[1].heading.as_deref(), Some("How to apply"));
    }

    #[test]
    fn test_when_leads_with_deadline() {
        let query = Query::new("When is the master degree deadline?");
        let answer = responder().respond(&query, QuestionType::When);
        assert_eq!(answer.sections[0].heading.as_deref(), Some("Deadline"));
    }

    #[test]
    fn test_missing_fields_render_nothing() {
        let query = Query::new("phd doctoral program");
        let answer = responder().respond(&query, QuestionType::Other);
        assert_eq!(answer.keys, ["phd"]);
        assert_eq!(ResponseFormatter.render(&answer.sections), "Research degrees.");
    }

    #[test]
    fn test_fallback_suggests_related_topics() {
        // "doctoral" overlaps the phd entry but too weakly to match
        let query = Query::new("doctoral scholarship bursary grant loan funding");
        let answer = responder().respond(&query, QuestionType::Other);

        assert!(answer.keys.is_empty());
        assert_eq!(answer.sections[1].heading.as_deref(), Some("You might be asking about"));
        assert_eq!(
            answer.sections[1].body,
            SectionBody::List(vec!["Doctoral programs".to_string()])
        );
    }

    #[test]
    fn test_entry_named_by_key_beats_generic_alias() {
        let facts = |summary: &str| {
            Payload::Admissions(AdmissionsFacts {
                summary: summary.to_string(),
                ..AdmissionsFacts::default()
            })
        };
        let general = KnowledgeEntry::new(
            "general",
            "Applying",
            "admission application deadline fees",
            facts("Tuition varies by program."),
        )
        .unwrap()
        .with_aliases(["tuition fees"]);
        let bachelor = KnowledgeEntry::new(
            "bachelor",
            "Bachelor's programs",
            "bachelor degree admission requirements",
            facts("Tuition is $9,000 per year."),
        )
        .unwrap();
        let study = KnowledgeEntry::new(
            "study",
            "Study skills",
            "study skills",
            Payload::Guidance(GuidanceFacts::default()),
        )
        .unwrap();
        let knowledge = Arc::new(
            KnowledgeBase::new(Lexicon::new("oos", ["weather"]), vec![general, bachelor], vec![study])
                .unwrap(),
        );
        let responder = AdmissionsResponder::new(knowledge, Arc::new(SimilarityMatcher::default()));

        // {tuition, fees, bachelor, degree}: "tuition fees" scores 2/4, the
        // bachelor pattern 2/6, but only bachelor is named
        let query = Query::new("What are the tuition fees for a bachelor degree?");
        assert_eq!(responder.respond(&query, QuestionType::What).keys, ["bachelor"]);

        let query = Query::new("What are the tuition fees?");
        assert_eq!(responder.respond(&query, QuestionType::What).keys, ["general"]);
    }

    #[test]
    fn test_fallback_lists_all_topics_without_overlap() {
        let query = Query::new("scholarships");
        let answer = responder().respond(&query, QuestionType::What);

        assert!(answer.keys.is_empty());
        let text = ResponseFormatter.render(&answer.sections);
        assert!(text.contains("requirements, deadlines, or fees"));
        assert!(text.contains("- Master's programs"));
        assert!(text.contains("- Doctoral programs"));
    }
}
