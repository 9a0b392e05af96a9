//! `{{ .name }}` placeholder substitution for manifest files.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{ManifestError, ManifestResult};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{-?\s*\.([A-Za-z_][A-Za-z0-9_]*)\s*-?\}\}").expect("placeholder regex")
});

/// Replace every placeholder in `content` with its value from `vars`.
///
/// Fails on the first placeholder without a value.
pub fn substitute(
    file: &str,
    content: &str,
    vars: &BTreeMap<String, String>,
) -> ManifestResult<String> {
    if let Some(missing) = PLACEHOLDER
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .find(|name| !vars.contains_key(name))
    {
        return Err(ManifestError::UndefinedVar {
            file: file.to_string(),
            name: missing,
        });
    }

    let rendered = PLACEHOLDER.replace_all(content, |caps: &Captures<'_>| vars[&caps[1]].clone());
    Ok(rendered.into_owned())
}
