// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The text transformation served by the transformer service.

/// Marker appended to every non-empty result.
pub const TRANSFORMED_SUFFIX: &str = " [TRANSFORMED]";

/// Reverse `text` by Unicode scalar value, uppercase it and append
/// [`TRANSFORMED_SUFFIX`]. Empty input maps to an empty result.
///
/// Deterministic and free of side effects.
pub fn transform(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let reversed: String = text.chars().rev().collect();
    format!("{}{TRANSFORMED_SUFFIX}", reversed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_and_uppercases() {
        assert_eq!(transform("hello"), "OLLEH [TRANSFORMED]");
        assert_eq!(transform("Hello, World"), "DLROW ,OLLEH [TRANSFORMED]");
    }

    #[test]
    fn empty_input_maps_to_empty_output() {
        assert_eq!(transform(""), "");
    }

    #[test]
    fn whitespace_is_not_empty() {
        assert_eq!(transform(" "), "  [TRANSFORMED]");
    }

    #[test]
    fn multibyte_characters_stay_intact() {
        assert_eq!(transform("añb"), "BÑA [TRANSFORMED]");
        assert_eq!(transform("a😀b"), "B😀A [TRANSFORMED]");
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(transform("repeat me"), transform("repeat me"));
    }
}
