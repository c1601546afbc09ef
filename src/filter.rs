// src/filter.rs

use crate::model::ChangedFile;
use regex::Regex;

/// Search (not full match) the author's display name. No regex, or an empty one, matches all.
pub fn author_matches(author: &str, regex: Option<&Regex>) -> bool {
    match regex {
        Some(re) if !re.as_str().is_empty() => re.is_match(author),
        _ => true,
    }
}

/// True when either side of the change has a path the regex finds a match in.
pub fn path_matches(change: &ChangedFile, regex: Option<&Regex>) -> bool {
    let Some(re) = regex else {
        return true;
    };
    [&change.old_path, &change.new_path]
        .into_iter()
        .flatten()
        .any(|p| re.is_match(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(s: &str) -> Regex {
        Regex::new(s).unwrap()
    }

    #[test]
    fn author_is_searched() {
        assert!(author_matches("Ada Lovelace", Some(&re("Love"))));
        assert!(!author_matches("Ada Lovelace", Some(&re("^Love"))));
        assert!(author_matches("anyone", Some(&re(""))));
        assert!(author_matches("anyone", None));
    }

    #[test]
    fn rename_matches_on_either_side() {
        let mut change = ChangedFile::added("src/new.rs", None);
        change.old_path = Some("docs/old.md".into());
        assert!(path_matches(&change, Some(&re(r"\.md$"))));
        assert!(path_matches(&change, Some(&re(r"^src/"))));
        assert!(!path_matches(&change, Some(&re("tests"))));
    }

    #[test]
    fn add_and_delete_match_the_side_that_exists() {
        assert!(path_matches(&ChangedFile::added("a.txt", None), Some(&re("a"))));
        assert!(path_matches(&ChangedFile::deleted("a.txt", None), Some(&re("a"))));
        assert!(!path_matches(&ChangedFile::deleted("b.txt", None), Some(&re("a"))));
        assert!(path_matches(&ChangedFile::deleted("b.txt", None), None));
    }
}
