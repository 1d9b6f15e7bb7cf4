//! Small string helpers shared by the browser and the config form.

use deunicode::deunicode;
use std::cmp::Ordering;

/// Default-locale style ordering.
///
/// Base letters decide first (case and diacritics folded away, so `Élan`
/// sorts between `Aaron` and `Zed`). Ties go to the unaccented form, then to
/// lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| case_order(a, b))
}

fn primary_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return ca.cmp(&cb),
        }
    }
    a.len().cmp(&b.len())
}

/// Strict slug in the host's format: diacritics folded, trimmed and
/// lowercased, every whitespace run replaced by one `-`, then everything but
/// ASCII letters, digits and `-` dropped. Existing dashes are kept as is.
pub fn slugify(input: &str) -> String {
    let folded = deunicode(input);
    let folded = folded.trim().to_lowercase();
    let mut slug = String::with_capacity(folded.len());
    let mut in_whitespace = false;

    for c in folded.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c);
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_compare_ignores_case_first() {
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_compare("Zed", "alpha"), Ordering::Greater);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_locale_compare_folds_accents() {
        let mut names = vec!["Zed", "Élan", "Aaron"];
        names.sort_by(|a, b| locale_compare(a, b));
        assert_eq!(names, vec!["Aaron", "Élan", "Zed"]);

        assert_eq!(locale_compare("elan", "élan"), Ordering::Less);
        assert_eq!(locale_compare("Ørn", "Oscar"), Ordering::Less);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Sir Reginald, the Bold!"), "sir-reginald-the-bold");
        assert_eq!(slugify("a - b"), "a---b");
        assert_eq!(slugify("Two  spaces"), "two-spaces");
        assert_eq!(slugify("  --Orc--  "), "--orc--");
        assert_eq!(slugify("Élan"), "elan");
    }
}
