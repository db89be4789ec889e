use std::fmt::Write;

use portfolio_repos::{LanguageSet, PinnedRepositories, PublicRepositories, RepositoryRecord};

pub fn pinned(result: &PinnedRepositories) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pinned repositories ({} of {}):",
        result.pinned_repos.len(),
        result.total_count
    );
    for repo in &result.pinned_repos {
        write_repo(&mut out, repo);
        if !repo.languages.is_empty() {
            let names: Vec<&str> = repo.languages.iter().map(|l| l.name.as_str()).collect();
            let _ = writeln!(out, "    languages: {}", names.join(", "));
        }
    }
    write_languages(&mut out, &result.all_unique_languages);
    out
}

pub fn public(result: &PublicRepositories) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Public repositories ({}):", result.repositories.len());
    for repo in &result.repositories {
        write_repo(&mut out, repo);
    }
    write_languages(&mut out, &result.unique_languages);
    out
}

fn write_repo(out: &mut String, repo: &RepositoryRecord) {
    let language = repo
        .primary_language
        .as_ref()
        .map(|l| l.name.as_str())
        .unwrap_or("-");
    let _ = writeln!(
        out,
        "- {}/{} [{}] ★{} ⑂{}",
        repo.owner, repo.name, language, repo.stargazer_count, repo.fork_count
    );
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "    {description}");
    }
    let _ = writeln!(out, "    {}", repo.url);
}

fn write_languages(out: &mut String, languages: &LanguageSet) {
    if languages.is_empty() {
        return;
    }
    let _ = writeln!(out, "\nLanguages: {}", languages.as_slice().join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_repos::{Language, LanguageUsage};

    fn record(name: &str, primary: Option<&str>, languages: &[&str]) -> RepositoryRecord {
        RepositoryRecord {
            name: name.into(),
            description: Some("A thing".into()),
            url: format!("https://github.com/octocat/{name}"),
            stargazer_count: 42,
            fork_count: 7,
            owner: "octocat".into(),
            open_graph_image_url: String::new(),
            primary_language: primary.map(|n| Language {
                name: n.into(),
                color: None,
            }),
            languages: languages
                .iter()
                .map(|n| LanguageUsage {
                    size_in_bytes: 10,
                    name: (*n).into(),
                    color: None,
                })
                .collect(),
        }
    }

    #[test]
    fn pinned_listing_shows_repos_and_languages() {
        let repos = vec![record("linodsync", Some("Go"), &["Go", "Shell"])];
        let result = PinnedRepositories {
            all_unique_languages: portfolio_repos::models::all_languages(&repos),
            pinned_repos: repos,
            total_count: 4,
        };
        let text = pinned(&result);

        assert!(text.starts_with("Pinned repositories (1 of 4):"));
        assert!(text.contains("- octocat/linodsync [Go] ★42 ⑂7"));
        assert!(text.contains("    languages: Go, Shell"));
        assert!(text.ends_with("Languages: Go, Shell\n"));
    }

    #[test]
    fn public_listing_handles_missing_primary_language() {
        let result = PublicRepositories {
            repositories: vec![record("dotfiles", None, &[])],
            unique_languages: LanguageSet::new(),
        };
        let text = public(&result);

        assert!(text.contains("- octocat/dotfiles [-]"));
        assert!(!text.contains("Languages:"));
    }
}
