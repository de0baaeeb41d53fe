//! Shared test utilities

#![allow(dead_code)]

use student_desk::{
    AdmissionsFacts, Desk, DeskOptions, GuidanceFacts, KnowledgeBase, KnowledgeEntry, Lexicon,
    Payload,
};

/// Phrases that mark a query as out of scope
pub const OUT_OF_SCOPE: &[&str] = &[
    "weather today",
    "weather forecast",
    "sports scores",
    "tell me a joke",
    "movie recommendations",
];

/// Create an admissions entry with a fixed summary
pub fn admissions_entry(key: &str, title: &str, pattern: &str) -> KnowledgeEntry {
    KnowledgeEntry::new(
        key,
        title,
        pattern,
        Payload::Admissions(AdmissionsFacts {
            summary: format!("{title} overview."),
            requirements: vec!["Official transcripts".to_string(), "Two references".to_string()],
            deadline: Some("March 1".to_string()),
            fees: Some("$75 application fee".to_string()),
            steps: vec!["Create an account".to_string(), "Submit the form".to_string()],
        }),
    )
    .expect("valid admissions entry")
}

/// Create a guidance entry with a fixed summary
pub fn guidance_entry(key: &str, title: &str, pattern: &str) -> KnowledgeEntry {
    KnowledgeEntry::new(
        key,
        title,
        pattern,
        Payload::Guidance(GuidanceFacts {
            summary: format!("{title} overview."),
            strategies: vec!["Plan each week".to_string(), "Review often".to_string()],
            resources: vec!["Academic advising office".to_string()],
        }),
    )
    .expect("valid guidance entry")
}

/// Small synthetic knowledge base
pub fn test_knowledge() -> KnowledgeBase {
    let admissions = vec![
        admissions_entry("master", "Master's programs", "master degree requirements")
            .with_aliases(["graduate school admission"]),
        admissions_entry("bachelor", "Bachelor's programs", "bachelor undergraduate application"),
    ];
    let guidance = vec![
        guidance_entry("study_skills", "Study skills", "improve grades study effectively")
            .with_aliases(["study habits"]),
        guidance_entry("orientation", "Orientation", "orientation new student campus"),
        guidance_entry("career", "Career planning", "career planning internship"),
    ];

    KnowledgeBase::new(Lexicon::new("out_of_scope", OUT_OF_SCOPE), admissions, guidance)
        .expect("valid test knowledge")
}

/// Desk over the synthetic knowledge with default options
pub fn test_desk() -> Desk {
    test_desk_with(DeskOptions::default())
}

/// Desk over the synthetic knowledge with custom options
pub fn test_desk_with(options: DeskOptions) -> Desk {
    Desk::new(test_knowledge(), options).expect("valid desk options")
}
