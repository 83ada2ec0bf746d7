//! Tech Classifier — maps a free-text tech stack onto interview focus areas.
//!
//! Matching is plain case-insensitive substring containment against `TECH_CATEGORIES`,
//! in table order. There is no word-boundary check: "React" matches "Reactive".

/// Known technologies and the focus areas a question about them should cover.
/// Order is significant: it is the order descriptions appear in the output.
pub const TECH_CATEGORIES: &[(&str, &str)] = &[
    ("Python", "General programming, scripting, data structures, OOP"),
    (
        "TensorFlow",
        "Machine learning, neural networks, deep learning architectures",
    ),
    (
        "PyTorch",
        "Deep learning, model training, optimization techniques",
    ),
    (
        "React",
        "Frontend development, state management, component lifecycle",
    ),
    (
        "Node.js",
        "Backend development, event-driven programming, APIs",
    ),
    ("SQL", "Database management, query optimization, indexing"),
    ("AWS", "Cloud computing, deployment, scalability"),
    ("Docker", "Containerization, CI/CD, microservices"),
    ("Linux", "System administration, shell scripting, networking"),
];

pub const DEFAULT_CATEGORY: &str = "General software development";

/// Returns the table entries whose keyword occurs anywhere in `tech_stack`.
fn matching_entries(tech_stack: &str) -> impl Iterator<Item = &'static (&'static str, &'static str)> {
    let haystack = tech_stack.to_lowercase();
    TECH_CATEGORIES
        .iter()
        .filter(move |(tech, _)| haystack.contains(&tech.to_lowercase()))
}

/// Comma-joined category descriptions for every known technology in `tech_stack`,
/// or `DEFAULT_CATEGORY` when none is recognised.
pub fn classify_tech_stack(tech_stack: &str) -> String {
    let categories: Vec<&str> = matching_entries(tech_stack).map(|(_, desc)| *desc).collect();

    if categories.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        categories.join(", ")
    }
}

/// The recognised technology keywords themselves, in table order.
pub fn matched_technologies(tech_stack: &str) -> Vec<&'static str> {
    matching_entries(tech_stack).map(|(tech, _)| *tech).collect()
}
