//! # Identifier Naming Conventions
//!
//! Property names are declared in the API's lowerCamelCase (`fooBar`).
//! Configuration paths and lineages use snake case (`foo_bar`); generated
//! function and type names use UpperCamelCase (`FooBar`).
//!
//! Snake-case word boundaries follow `heck`: an acronym run followed by a
//! capitalized word splits before the last capital (`HTTPServer` →
//! `http_server`), and `-`, `.`, `/` and `_` are all separators.
//!
//! Camel casing only touches word starts. Capitals already inside a name
//! are kept, so `sourceIPRanges` becomes `SourceIPRanges`, never
//! `SourceIpRanges`.

use heck::ToSnakeCase;

/// Which letter case the first word of a camelized identifier takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// `FooBar`
    Upper,
    /// `fooBar`
    Lower,
}

/// Convert an identifier to snake case: `fooBar` → `foo_bar`.
pub fn underscore(source: &str) -> String {
    source.to_snake_case()
}

/// Convert an identifier to camel case with the requested leading case.
///
/// Each `_` is dropped and the character after it capitalized; each `/` is
/// kept and the character after it capitalized. `Case::Upper` capitalizes
/// the first character, `Case::Lower` lowercases it. Nothing else changes
/// case.
///
/// `camelize("foo_bar", Case::Upper)` → `FooBar`;
/// `camelize("foo_bar", Case::Lower)` → `fooBar`;
/// `camelize("sourceIPRanges", Case::Upper)` → `SourceIPRanges`.
pub fn camelize(term: &str, first_letter: Case) -> String {
    let mut out = String::with_capacity(term.len());
    let mut capitalize_next = first_letter == Case::Upper;
    for (i, c) in term.chars().enumerate() {
        match c {
            '_' => capitalize_next = true,
            '/' => {
                out.push('/');
                capitalize_next = true;
            }
            _ if capitalize_next => {
                out.push(c.to_ascii_uppercase());
                capitalize_next = false;
            }
            _ if i == 0 => out.push(c.to_ascii_lowercase()),
            _ => out.push(c),
        }
    }
    out
}
