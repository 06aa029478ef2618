//! Property tests: classification is total and deterministic.

use proptest::prelude::*;

use trip_map::{RoleLexicon, classify};

proptest! {
    /// Any string classifies without panicking, and repeated calls agree.
    #[test]
    fn classify_is_total_and_deterministic(header in any::<String>()) {
        let lexicon = RoleLexicon::default();
        let first = classify(&header, &lexicon);
        let second = classify(&header, &lexicon);
        prop_assert_eq!(first, second);
    }

    /// ASCII case changes never change the outcome.
    #[test]
    fn classify_ignores_ascii_case(header in "[ -~]{0,40}") {
        let lexicon = RoleLexicon::default();
        prop_assert_eq!(
            classify(&header, &lexicon),
            classify(&header.to_ascii_uppercase(), &lexicon)
        );
    }

    /// Surrounding whitespace never changes the outcome.
    #[test]
    fn classify_ignores_surrounding_whitespace(header in "[ -~]{0,40}") {
        let lexicon = RoleLexicon::default();
        let padded = format!("  {header}\t");
        prop_assert_eq!(classify(&header, &lexicon), classify(&padded, &lexicon));
    }
}
