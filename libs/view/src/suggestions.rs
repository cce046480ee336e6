/// Category picker state for the creation and edit forms.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Suggestions {
    /// Existing categories containing the input, ignoring case.
    pub matches: Vec<String>,
    /// The input itself, offered when no existing category equals it
    /// ignoring case.
    pub create: Option<String>,
}

pub fn suggest(existing: &[String], input: &str) -> Suggestions {
    if input.is_empty() {
        return Suggestions::default();
    }

    let needle = input.to_lowercase();
    let matches = existing
        .iter()
        .filter(|category| category.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    let known = existing
        .iter()
        .any(|category| category.to_lowercase() == needle);

    Suggestions {
        matches,
        create: (!known).then(|| input.to_string()),
    }
}
