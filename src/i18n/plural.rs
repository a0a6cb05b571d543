//! Pluralization and key translation

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::dictionary::Dictionary;

/// `[singular|plural]` alternation groups
static PLURAL_GROUP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[([^|]*)\|([^\]]*)\]").ok());

/// Replace every `[singular|plural]` group with the branch for `qty`
///
/// Quantities up to and including one take the singular branch, so
/// `pluralize(3.0, "W[urst|ürste]")` gives `"Würste"`.
pub fn pluralize(qty: f64, expr: &str) -> String {
    let Some(pattern) = PLURAL_GROUP.as_ref() else {
        return expr.to_string();
    };
    let branch = if qty <= 1.0 { "$1" } else { "$2" };

    match pattern.replace_all(expr, branch) {
        Cow::Borrowed(unchanged) => unchanged.to_string(),
        Cow::Owned(replaced) => replaced,
    }
}

/// Second argument of [`translate`]: a quantity and its dictionary, or only a dictionary
#[derive(Debug, Clone, Copy)]
pub enum TranslateArg<'a> {
    Quantity(f64, Option<&'a Dictionary>),
    Dictionary(&'a Dictionary),
}

/// Look up `key`, pluralizing the result when a non-zero quantity is given
///
/// Missing keys and missing dictionaries fall back to the key itself.
pub fn translate(key: &str, arg: TranslateArg<'_>) -> String {
    let (qty, dictionary) = match arg {
        TranslateArg::Quantity(qty, dictionary) => (Some(qty), dictionary),
        TranslateArg::Dictionary(dictionary) => (None, Some(dictionary)),
    };

    let expr = dictionary
        .and_then(|dictionary| dictionary.get(key))
        .filter(|expr| !expr.is_empty())
        .map(String::as_str)
        .unwrap_or(key);

    match qty {
        // zero and NaN leave the expression untouched
        Some(qty) if qty != 0.0 && !qty.is_nan() => pluralize(qty, expr),
        _ => expr.to_string(),
    }
}
