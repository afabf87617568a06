//! Random fixture and payload generation.
//!
//! Pure functions over an [`Rng`]: the engine never calls these on the hot
//! path except for the per-iteration [`QuestionDraft`] in the question
//! scenario.

use gavel_macros::record;
use rand::{Rng, seq::IndexedRandom};

use crate::fixture::{TestQuestion, TestUser};

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const ALGORITHMS: &[&str] = &[
    "quicksort",
    "mergesort",
    "binary search",
    "Dijkstra's algorithm",
    "BFS",
    "DFS",
];
const CONCEPTS: &[&str] = &[
    "inheritance",
    "polymorphism",
    "recursion",
    "closures",
    "async/await",
    "promises",
];
const LANGUAGES: &[&str] = &["Python", "JavaScript", "Java", "C++", "Go", "Rust"];
const TECHNOLOGIES: &[&str] = &["REST", "GraphQL", "WebSocket", "gRPC", "RPC", "SOAP"];
const FEATURES: &[&str] = &[
    "authentication",
    "authorization",
    "caching",
    "rate limiting",
    "logging",
    "monitoring",
];
const TOPICS: &[&str] = &[
    "error handling",
    "logging",
    "testing",
    "deployment",
    "security",
    "performance",
];
const CONTEXTS: &[&str] = &[
    "web applications",
    "microservices",
    "mobile apps",
    "desktop apps",
    "cloud services",
];
const CATEGORIES: &[&str] = &["algorithms", "system design", "language-specific", "general"];
const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];
const TAGS: &[&str] = &[
    "programming",
    "algorithms",
    "data-structures",
    "system-design",
    "testing",
];

/// Payload for a question submission, generated fresh per iteration.
#[record]
pub struct QuestionDraft {
    pub text: String,
    pub category: String,
    pub difficulty: String,
    pub tags: Vec<String>,
}

pub fn random_string(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

pub fn random_user(rng: &mut impl Rng) -> TestUser {
    let username = format!("test_user_{}", random_string(rng, 8));
    TestUser {
        email: format!("{username}@example.com"),
        password: random_string(rng, 12),
    }
}

fn pick<'a>(rng: &mut impl Rng, pool: &[&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

/// Templated question text with random vocabulary substitution.
pub fn random_question_text(rng: &mut impl Rng) -> String {
    match rng.random_range(0..5) {
        0 => format!(
            "What is the time complexity of {}?",
            pick(rng, ALGORITHMS)
        ),
        1 => format!(
            "Explain how {} works in {}.",
            pick(rng, CONCEPTS),
            pick(rng, LANGUAGES)
        ),
        2 => format!(
            "What are the main differences between {} and {}?",
            pick(rng, TECHNOLOGIES),
            pick(rng, TECHNOLOGIES)
        ),
        3 => format!(
            "How would you implement {} in {}?",
            pick(rng, FEATURES),
            pick(rng, LANGUAGES)
        ),
        _ => format!(
            "What are the best practices for {} in {}?",
            pick(rng, TOPICS),
            pick(rng, CONTEXTS)
        ),
    }
}

pub fn random_question(rng: &mut impl Rng) -> TestQuestion {
    let text = random_question_text(rng);
    let answer_len = rng.random_range(100..=500);
    let filler = "Here is some additional text to make the answer longer. ".repeat(answer_len / 50);
    TestQuestion {
        id: format!("q_{}", random_string(rng, 8)),
        sample_answer: format!("This is a sample answer for the question: {text}. {filler}"),
        text,
        category: pick(rng, CATEGORIES).to_string(),
        difficulty: pick(rng, DIFFICULTIES).to_string(),
    }
}

pub fn random_question_draft(rng: &mut impl Rng) -> QuestionDraft {
    let tag_count = rng.random_range(1..=3);
    let tags = TAGS
        .choose_multiple(rng, tag_count)
        .map(|tag| tag.to_string())
        .collect();
    QuestionDraft {
        text: random_question_text(rng),
        category: pick(rng, CATEGORIES).to_string(),
        difficulty: pick(rng, DIFFICULTIES).to_string(),
        tags,
    }
}
