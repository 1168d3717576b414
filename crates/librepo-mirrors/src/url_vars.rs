//! URL-variable substitution: expands `$name` tokens in a mirror URL.
use std::collections::HashMap;

/// A mapping from variable name to value, used to expand `$arch`-style
/// tokens in mirror URLs (e.g. `$arch` -> `x86_64`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlVars(HashMap<String, String>);

impl UrlVars {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlVars {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Expand every `$name` token in `url` using `vars`. Unknown variables are
/// left literal. If `vars` is `None`, `url` is returned unchanged. Values
/// are spliced in verbatim and are never re-scanned for further `$name`
/// tokens (no recursive expansion).
pub fn substitute(url: &str, vars: Option<&UrlVars>) -> String {
    let Some(vars) = vars else {
        return url.to_owned();
    };

    let mut out = String::with_capacity(url.len());
    let mut chars = url.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let name_start = i + 1;
        let mut name_end = name_start;
        while let Some(&(j, nc)) = chars.peek() {
            if is_ident_char(nc) {
                name_end = j + nc.len_utf8();
                chars.next();
            } else {
                break;
            }
        }
        let name = &url[name_start..name_end];
        if name.is_empty() {
            out.push('$');
            continue;
        }
        match vars.get(name) {
            Some(value) => out.push_str(value),
            None => {
                out.push('$');
                out.push_str(name);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitute_without_vars_is_identity() {
        assert_eq!(substitute("http://xyz/$arch/", None), "http://xyz/$arch/");
    }

    #[test]
    fn substitute_replaces_known_variable() {
        let mut vars = UrlVars::new();
        vars.insert("arch", "i386");
        assert_eq!(substitute("http://xyz/$arch/", Some(&vars)), "http://xyz/i386/");
    }

    #[test]
    fn substitute_leaves_unknown_variable_literal() {
        let vars = UrlVars::new();
        assert_eq!(substitute("http://xyz/$arch/", Some(&vars)), "http://xyz/$arch/");
    }

    #[test]
    fn substitute_handles_repeated_expansion() {
        let mut vars = UrlVars::new();
        vars.insert("repo", "core");
        assert_eq!(
            substitute("http://$repo.example/$repo/db", Some(&vars)),
            "http://core.example/core/db"
        );
    }

    #[test]
    fn substitute_does_not_recurse_into_expanded_value() {
        let mut vars = UrlVars::new();
        vars.insert("a", "$b");
        vars.insert("b", "boom");
        assert_eq!(substitute("$a", Some(&vars)), "$b");
    }
}
