//! Internationalization module
//!
//! Loads translation dictionaries and applies `[singular|plural]`
//! expressions to recipe labels.

pub mod dictionary;
pub mod plural;

pub use dictionary::{
    language_of, Dictionary, I18nError, I18nResult, TranslationStore, Translations,
};
pub use plural::{pluralize, translate, TranslateArg};
