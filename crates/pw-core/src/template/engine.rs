//! `{{name}}` substitution.
//!
//! Replacement happens in one left-to-right pass over the template. Text
//! inserted for a token is never rescanned, so values that themselves
//! contain `{{...}}` come through literally. Tokens without a mapping are
//! left in place so malformed templates stay visible in the output.
//!
//! A token name is any run of characters other than braces and line breaks.
//! Names are looked up exactly as written, so `{{ a }}` does not match `a`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}\r\n]+)\}\}").expect("token pattern is valid")
});

/// Renders `template`, replacing each `{{name}}` whose name is in
/// `variables`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use pw_core::template::render;
///
/// let vars = HashMap::from([("name".to_string(), "{{evil}}".to_string())]);
/// assert_eq!(render("Hi {{name}} {{unknown}}", &vars), "Hi {{evil}} {{unknown}}");
/// ```
pub fn render(template: &str, variables: &HashMap<String, String>) -> String {
    TOKEN
        .replace_all(template, |caps: &Captures<'_>| match variables.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Distinct token names referenced by `template`, in first-seen order.
pub fn tokens(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TOKEN.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_basic_substitution() {
        let out = render("{{a}} and {{b}} and {{a}}", &vars(&[("a", "1"), ("b", "2")]));
        assert_eq!(out, "1 and 2 and 1");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let out = render("Hi {{name}}", &vars(&[("name", "{{evil}}"), ("evil", "boom")]));
        assert_eq!(out, "Hi {{evil}}");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let out = render("{{known}} {{missing}}", &vars(&[("known", "x")]));
        assert_eq!(out, "x {{missing}}");
    }

    #[test]
    fn test_template_without_tokens_is_unchanged() {
        let template = "plain text with { braces } and }} stray";
        assert_eq!(render(template, &vars(&[("a", "1")])), template);
    }

    #[test]
    fn test_spaced_token_is_not_recognized() {
        assert_eq!(render("{{ a }}", &vars(&[("a", "1")])), "{{ a }}");
    }

    #[test]
    fn test_non_ascii_and_hyphenated_names() {
        let out = render(
            "{{char-name}} / {{名字}} / {{missing-name}}",
            &vars(&[("char-name", "Bob"), ("名字", "Alice")]),
        );
        assert_eq!(out, "Bob / Alice / {{missing-name}}");
    }

    #[test]
    fn test_token_does_not_span_lines() {
        let template = "{{a\n}}";
        assert_eq!(render(template, &vars(&[("a\n", "1")])), template);
    }

    #[test]
    fn test_triple_braces() {
        assert_eq!(render("{{{a}}}", &vars(&[("a", "1")])), "{1}");
    }

    #[test]
    fn test_tokens_lists_distinct_names() {
        assert_eq!(
            tokens("{{user}} {{名字}} {{user}} {{ spaced }}"),
            vec!["user".to_string(), "名字".to_string(), " spaced ".to_string()]
        );
    }
}
