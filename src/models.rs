use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};

// -- Wire shapes, as the GraphQL endpoint returns them ----------------------

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name: String,
    pub description: Option<String>, // Not every repo has one
    pub url: String,
    pub stargazer_count: u32,
    pub fork_count: u32,
    pub owner: Owner,
    #[serde(default)]
    pub open_graph_image_url: String,
    #[serde(default)]
    pub primary_language: Option<Language>,
    #[serde(default)]
    pub languages: Option<LanguageConnection>, // Only requested by the pinned query
}

#[derive(Deserialize, Debug, Clone)]
pub struct Owner {
    pub login: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    pub color: Option<String>, // GitHub has no color for some languages
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LanguageConnection {
    #[serde(default)]
    pub edges: Vec<LanguageEdge>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LanguageEdge {
    pub size: u64, // Bytes of code in this language
    pub node: Language,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Edge<T> {
    pub node: T,
}

/// `data` of the pinned-items query.
#[derive(Deserialize, Debug)]
pub struct PinnedData {
    #[serde(default)]
    pub user: Option<PinnedUser>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PinnedUser {
    #[serde(default)]
    pub pinned_items: Option<PinnedItems>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PinnedItems {
    #[serde(default)]
    pub total_count: u32,
    pub edges: Vec<Edge<RepositoryNode>>,
}

/// `data.user` of the public-repositories query.
#[derive(Deserialize, Debug)]
pub struct PublicUser {
    #[serde(default)]
    pub repositories: Option<RepositoryConnection>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnection {
    #[serde(default)]
    pub edges: Option<Vec<Option<Edge<Option<RepositoryNode>>>>>,
    pub page_info: PageInfo,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

impl PageInfo {
    /// Cursor for the following page, or `None` once pagination is done.
    /// An empty cursor ends pagination.
    pub fn next_cursor(&self) -> Option<&str> {
        if !self.has_next_page {
            return None;
        }
        self.end_cursor.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

// -- Normalized records handed to callers -----------------------------------

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub stargazer_count: u32,
    pub fork_count: u32,
    pub owner: String,
    pub open_graph_image_url: String,
    pub primary_language: Option<Language>,
    pub languages: Vec<LanguageUsage>, // Largest first, empty for public-repo listings
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageUsage {
    pub size_in_bytes: u64,
    pub name: String,
    pub color: Option<String>,
}

impl From<RepositoryNode> for RepositoryRecord {
    fn from(node: RepositoryNode) -> Self {
        let languages = node
            .languages
            .unwrap_or_default()
            .edges
            .into_iter()
            .map(|edge| LanguageUsage {
                size_in_bytes: edge.size,
                name: edge.node.name,
                color: edge.node.color,
            })
            .collect();

        Self {
            name: node.name,
            description: node.description,
            url: node.url,
            stargazer_count: node.stargazer_count,
            fork_count: node.fork_count,
            owner: node.owner.login,
            open_graph_image_url: node.open_graph_image_url,
            primary_language: node.primary_language,
            languages,
        }
    }
}

/// Language names in order of first appearance, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the name was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_owned());
        self.names.push(name.to_owned());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> Extend<S> for LanguageSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LanguageSet::new();
        set.extend(iter);
        set
    }
}

impl Serialize for LanguageSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.names)
    }
}

/// Every language of every record, record order then size order.
pub fn all_languages(records: &[RepositoryRecord]) -> LanguageSet {
    records
        .iter()
        .flat_map(|repo| repo.languages.iter().map(|lang| lang.name.as_str()))
        .collect()
}

/// Primary languages only; records without one are skipped.
pub fn primary_languages(records: &[RepositoryRecord]) -> LanguageSet {
    records
        .iter()
        .filter_map(|repo| repo.primary_language.as_ref())
        .map(|lang| lang.name.as_str())
        .collect()
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRepositories {
    pub pinned_repos: Vec<RepositoryRecord>,
    pub all_unique_languages: LanguageSet,
    pub total_count: u32, // As reported by GitHub, may exceed the 6 returned
}

impl From<PinnedItems> for PinnedRepositories {
    fn from(items: PinnedItems) -> Self {
        let pinned_repos: Vec<RepositoryRecord> = items
            .edges
            .into_iter()
            .map(|edge| RepositoryRecord::from(edge.node))
            .collect();
        let all_unique_languages = all_languages(&pinned_repos);

        Self {
            pinned_repos,
            all_unique_languages,
            total_count: items.total_count,
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicRepositories {
    pub repositories: Vec<RepositoryRecord>,
    pub unique_languages: LanguageSet,
}

impl RepositoryConnection {
    /// Splits a page into its records and its page info. Null edges and
    /// null nodes are dropped.
    pub fn into_page(self) -> (Vec<RepositoryRecord>, PageInfo) {
        let records = self
            .edges
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node)
            .map(RepositoryRecord::from)
            .collect();
        (records, self.page_info)
    }
}
