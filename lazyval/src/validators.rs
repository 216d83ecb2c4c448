//! Stock validators.
//!
//! Every validator is a pure predicate over the raw field value. Empty values
//! are ordinary input: each predicate returns a boolean for them and never
//! panics.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::config::{CrossFieldMatch, ParamKind};
use crate::context::ValidatorContext;
use crate::registry::ValidatorRegistration;

pub const NOT_BLANK: &str = "notBlank";
pub const MINIMUM_LENGTH: &str = "minimumLength";
pub const MAXIMUM_LENGTH: &str = "maximumLength";
pub const EXACT_LENGTH: &str = "exactLength";
pub const MATCHES_FIELD: &str = "matchesField";
pub const MATCHES_FIELD_IGNORE_CASE: &str = "matchesFieldIgnoreCase";
pub const SIMILAR_FIELD: &str = "similarField";
pub const DISSIMILAR_FIELD: &str = "dissimilarField";
pub const EMAIL: &str = "email";
pub const MIN_ALPHA: &str = "minAlpha";
pub const MAX_ALPHA: &str = "maxAlpha";
pub const MIN_NUMERALS: &str = "minNumerals";
pub const MAX_NUMERALS: &str = "maxNumerals";
pub const CHECKED: &str = "checked";
pub const ONLY_ALPHA: &str = "onlyAlpha";
pub const ONLY_NUMERALS: &str = "onlyNumerals";
pub const ONLY_ALPHA_NUMERIC: &str = "onlyAlphaNumeric";
pub const ONLY_ALPHANUMERIC_AND_PUNCTUATION: &str = "onlyAlphanumericAndPunctuation";
pub const NO_ALPHA: &str = "noAlpha";
pub const NO_SPACES: &str = "noSpaces";
pub const EXTENDED_NAME_CHARACTERS: &str = "extendedNameCharacters";
pub const NO_ADJACENT_SYMBOLS: &str = "noAdjacentSymbols";
pub const MAX_CHARACTER_REPEATS: &str = "maxCharacterRepeats";
pub const STARTS_WITH_ALPHA_NUMERIC: &str = "startsWithAlphaNumeric";
pub const ENDS_WITH_ALPHA_NUMERIC: &str = "endsWithAlphaNumeric";
pub const ZIP_CODE: &str = "zipCode";

/// Accented Latin letters accepted alongside ASCII alphanumerics in display
/// names.
pub const ACCENTED_LETTERS: &str = "\u{E4}\u{C4}\u{EB}\u{CB}\u{EF}\u{CF}\u{F6}\u{D6}\u{FC}\u{DC}\
    \u{FF}\u{178}\u{E9}\u{C9}\u{E0}\u{C0}\u{E8}\u{C8}\u{F9}\u{D9}\u{E2}\u{C2}\u{EA}\u{CA}\
    \u{EE}\u{CE}\u{F4}\u{D4}\u{FB}\u{DB}\u{E7}\u{C7}\u{DF}\u{153}\u{152}\u{E6}\u{C6}";

/// Punctuation recognised by the punctuation checks.
pub const PUNCTUATION: &str = "-=+_|!@#$%^&*()`~[]{};:'\",<.>/?";

/// Consecutive identical characters that make a value invalid.
const MAX_REPEAT_RUN: usize = 4;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9~*_+\-.]+)@((?:[-a-zA-Z0-9]+\.)+[a-zA-Z]{2,})$")
        .expect("email pattern compiles")
});

static ZIP_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{5}(?:[-\s][0-9]{4})?$").expect("zip code pattern compiles")
});

pub(crate) static BUILTINS: &[ValidatorRegistration] = &[
    ValidatorRegistration::new(NOT_BLANK, ParamKind::Flag, not_blank),
    ValidatorRegistration::new(MINIMUM_LENGTH, ParamKind::Count, minimum_length),
    ValidatorRegistration::new(MAXIMUM_LENGTH, ParamKind::Count, maximum_length),
    ValidatorRegistration::new(EXACT_LENGTH, ParamKind::Count, exact_length),
    ValidatorRegistration::new(MATCHES_FIELD, ParamKind::Field, matches_field),
    ValidatorRegistration::new(
        MATCHES_FIELD_IGNORE_CASE,
        ParamKind::Field,
        matches_field_ignore_case,
    ),
    ValidatorRegistration::new(SIMILAR_FIELD, ParamKind::Field, similar_field),
    ValidatorRegistration::new(DISSIMILAR_FIELD, ParamKind::Field, dissimilar_field),
    ValidatorRegistration::new(EMAIL, ParamKind::Flag, email),
    ValidatorRegistration::new(MIN_ALPHA, ParamKind::Count, min_alpha),
    ValidatorRegistration::new(MAX_ALPHA, ParamKind::Count, max_alpha),
    ValidatorRegistration::new(MIN_NUMERALS, ParamKind::Count, min_numerals),
    ValidatorRegistration::new(MAX_NUMERALS, ParamKind::Count, max_numerals),
    ValidatorRegistration::new(CHECKED, ParamKind::Flag, checked),
    ValidatorRegistration::new(ONLY_ALPHA, ParamKind::Flag, only_alpha),
    ValidatorRegistration::new(ONLY_NUMERALS, ParamKind::Flag, only_numerals),
    ValidatorRegistration::new(ONLY_ALPHA_NUMERIC, ParamKind::Flag, only_alpha_numeric),
    ValidatorRegistration::new(
        ONLY_ALPHANUMERIC_AND_PUNCTUATION,
        ParamKind::Flag,
        only_alphanumeric_and_punctuation,
    ),
    ValidatorRegistration::new(NO_ALPHA, ParamKind::Flag, no_alpha),
    ValidatorRegistration::new(NO_SPACES, ParamKind::Flag, no_spaces),
    ValidatorRegistration::new(
        EXTENDED_NAME_CHARACTERS,
        ParamKind::Flag,
        extended_name_characters,
    ),
    ValidatorRegistration::new(NO_ADJACENT_SYMBOLS, ParamKind::Flag, no_adjacent_symbols),
    ValidatorRegistration::new(MAX_CHARACTER_REPEATS, ParamKind::Flag, max_character_repeats),
    ValidatorRegistration::new(
        STARTS_WITH_ALPHA_NUMERIC,
        ParamKind::Flag,
        starts_with_alpha_numeric,
    ),
    ValidatorRegistration::new(
        ENDS_WITH_ALPHA_NUMERIC,
        ParamKind::Flag,
        ends_with_alpha_numeric,
    ),
    ValidatorRegistration::new(ZIP_CODE, ParamKind::Flag, zip_code),
];

// Character classes

/// ASCII alphanumeric or one of [`ACCENTED_LETTERS`].
pub fn is_extended_alphanumeric(c: char) -> bool {
    c.is_ascii_alphanumeric() || ACCENTED_LETTERS.contains(c)
}

pub fn is_punctuation(c: char) -> bool {
    PUNCTUATION.contains(c)
}

fn is_symbol(c: char) -> bool {
    c == '_' || c == '-'
}

fn length(value: &str) -> usize {
    value.chars().count()
}

// Length

fn not_blank(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    !value.is_empty()
}

fn minimum_length(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.count(MINIMUM_LENGTH).is_some_and(|min| length(value) >= min)
}

fn maximum_length(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.count(MAXIMUM_LENGTH).is_some_and(|max| length(value) <= max)
}

fn exact_length(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.count(EXACT_LENGTH).is_some_and(|exact| length(value) == exact)
}

// Cross-field

fn matches_field(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.other_field_value(MATCHES_FIELD)
        .is_some_and(|other| value == other)
}

fn matches_field_ignore_case(value: &str, cx: &ValidatorContext<'_>) -> bool {
    match cx.other_field_value(MATCHES_FIELD_IGNORE_CASE) {
        Some(other) if !value.is_empty() && !other.is_empty() => {
            value.to_lowercase() == other.to_lowercase()
        }
        _ => false,
    }
}

fn similar_field(value: &str, cx: &ValidatorContext<'_>) -> bool {
    let Some(other) = cx.other_field_value(SIMILAR_FIELD) else {
        return false;
    };
    match cx.config().cross_field_match() {
        CrossFieldMatch::Literal => value.contains(other.as_str()),
        CrossFieldMatch::Pattern => match Regex::new(&other) {
            Ok(re) => re.is_match(value),
            Err(err) => {
                log::debug!("[engine] {}: unusable pattern: {}", SIMILAR_FIELD, err);
                false
            }
        },
    }
}

fn dissimilar_field(value: &str, cx: &ValidatorContext<'_>) -> bool {
    let Some(other) = cx.other_field_value(DISSIMILAR_FIELD) else {
        return false;
    };
    if other.is_empty() {
        return true;
    }
    match cx.config().cross_field_match() {
        CrossFieldMatch::Literal => !value.to_lowercase().contains(&other.to_lowercase()),
        CrossFieldMatch::Pattern => {
            match RegexBuilder::new(&other).case_insensitive(true).build() {
                Ok(re) => !re.is_match(value),
                Err(err) => {
                    log::debug!("[engine] {}: unusable pattern: {}", DISSIMILAR_FIELD, err);
                    false
                }
            }
        }
    }
}

// Format

fn email(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    EMAIL_PATTERN.is_match(value)
}

fn zip_code(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    ZIP_CODE_PATTERN.is_match(value)
}

fn checked(_value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.is_checked()
}

// Configurable character classes

fn min_alpha(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.config()
        .patterns()
        .alpha_run
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

fn max_alpha(value: &str, cx: &ValidatorContext<'_>) -> bool {
    let found = cx.config().patterns().alpha.find_iter(value).count();
    cx.count(MAX_ALPHA).is_some_and(|max| found <= max)
}

fn min_numerals(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.config()
        .patterns()
        .numeral_run
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

fn max_numerals(value: &str, cx: &ValidatorContext<'_>) -> bool {
    let found = cx.config().patterns().numerals.find_iter(value).count();
    cx.count(MAX_NUMERALS).is_some_and(|max| found <= max)
}

fn only_alpha(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.config().patterns().only_alpha.is_match(value)
}

fn only_alpha_numeric(value: &str, cx: &ValidatorContext<'_>) -> bool {
    cx.config().patterns().only_alpha_numeric.is_match(value)
}

// Fixed character sets

fn only_numerals(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn only_alphanumeric_and_punctuation(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || is_punctuation(c))
}

fn no_alpha(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    !value.chars().any(|c| c.is_ascii_alphabetic())
}

fn no_spaces(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    !value.contains(' ')
}

fn extended_name_characters(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| is_extended_alphanumeric(c) || is_symbol(c))
}

fn no_adjacent_symbols(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    let chars: Vec<char> = value.chars().collect();
    !chars
        .windows(2)
        .any(|pair| is_symbol(pair[0]) && is_symbol(pair[1]))
}

fn max_character_repeats(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in value.to_lowercase().chars() {
        if !is_extended_alphanumeric(c) {
            previous = None;
            run = 0;
            continue;
        }
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= MAX_REPEAT_RUN {
            return false;
        }
    }
    true
}

fn starts_with_alpha_numeric(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    value.chars().next().is_some_and(is_extended_alphanumeric)
}

fn ends_with_alpha_numeric(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    value.chars().next_back().is_some_and(is_extended_alphanumeric)
}
