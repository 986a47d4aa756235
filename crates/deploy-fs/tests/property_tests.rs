use deploy_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));

        // Only a network share prefix may start with `//`
        let remainder = as_str.strip_prefix("//").unwrap_or(as_str);
        prop_assert!(!remainder.contains("//"));
        if as_str != "." {
            prop_assert!(!as_str.split('/').any(|c| c == "."), "{}", as_str);
        }

        // Cleaning is idempotent
        let again = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_join_stays_normalized(a in "[a-z./]{0,12}", b in "[a-z./]{0,12}") {
        let joined = NormalizedPath::new(format!("/{a}")).join(&b);
        prop_assert!(joined.is_absolute());
        prop_assert!(!joined.as_str().split('/').any(|c| c == ".."), "{}", joined);
    }
}
