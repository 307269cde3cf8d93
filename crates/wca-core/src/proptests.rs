//! Property-based tests for the metrics engine.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::{contrast_ratio, parse_color, readability_score, text_stats, Color};
    use proptest::prelude::*;

    fn any_color() -> impl Strategy<Value = Color> {
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::new(r, g, b))
    }

    proptest! {
        #[test]
        fn test_hex_roundtrip(color in any_color()) {
            let parsed = parse_color(&color.to_hex()).unwrap();
            prop_assert_eq!(parsed, color);
        }

        #[test]
        fn test_lowercase_hex_roundtrip(color in any_color()) {
            let parsed = parse_color(&color.to_hex().to_lowercase()).unwrap();
            prop_assert_eq!(parsed, color);
        }

        #[test]
        fn test_contrast_identity(color in any_color()) {
            prop_assert_eq!(contrast_ratio(color, color), 1.0);
        }

        #[test]
        fn test_contrast_symmetry(a in any_color(), b in any_color()) {
            prop_assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
        }

        #[test]
        fn test_contrast_range(a in any_color(), b in any_color()) {
            let ratio = contrast_ratio(a, b);
            prop_assert!((1.0..=21.0).contains(&ratio));
        }

        #[test]
        fn test_luminance_range(color in any_color()) {
            let l = color.luminance();
            prop_assert!((0.0..=1.0 + 1e-9).contains(&l));
        }

        #[test]
        fn test_readability_is_total(text in "\\PC*") {
            prop_assert!(readability_score(&text).score.is_finite());
        }

        #[test]
        fn test_word_count_matches_tokens(words in prop::collection::vec("[a-z]{1,8}", 0..20)) {
            let text = words.join("  ");
            prop_assert_eq!(text_stats(&text).words, words.len());
        }
    }
}
