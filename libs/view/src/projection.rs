use std::{collections::BTreeMap, convert::Infallible, fmt, str::FromStr};

use entity::prelude::*;

/// Posts keyed by their exact category string. Posts inside a group keep
/// the order of the source collection.
pub type CategoryGroups = BTreeMap<String, Vec<PostEntity>>;

pub fn group_by_category(posts: &[PostEntity]) -> CategoryGroups {
    let mut groups = CategoryGroups::new();
    for post in posts {
        groups
            .entry(post.category.clone())
            .or_default()
            .push(post.clone());
    }
    groups
}

pub fn sorted_categories(groups: &CategoryGroups) -> Vec<String> {
    let mut categories: Vec<String> = groups.keys().cloned().collect();
    categories.sort();
    categories
}

/// Narrows `groups` to the selected category. A selected category with no
/// posts is kept with an empty list so it still renders as a section.
pub fn apply_filter(
    mut groups: CategoryGroups,
    filter: &CategoryFilter,
) -> CategoryGroups {
    match filter {
        CategoryFilter::All => groups,
        CategoryFilter::Only(category) => {
            let posts = groups.remove(category).unwrap_or_default();
            CategoryGroups::from([(category.clone(), posts)])
        }
    }
}

pub fn sections(groups: CategoryGroups) -> Vec<CategorySection> {
    groups
        .into_iter()
        .map(|(category, posts)| CategorySection { category, posts })
        .collect()
}

#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "all" => CategoryFilter::All,
            category => CategoryFilter::Only(category.to_string()),
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct CategorySection {
    pub category: String,
    pub posts: Vec<PostEntity>,
}

impl CategorySection {
    pub fn count_label(&self) -> String {
        match self.posts.len() {
            1 => "1 post".to_string(),
            n => format!("{} posts", n),
        }
    }
}
