//! Property-based tests for naming conventions and file ordering.

#[cfg(test)]
mod proptest_tests {
    use crate::media::natural_cmp;
    use crate::naming::{
        check_deployment_name, is_valid_collection_name, is_valid_deployment_name, DeploymentName,
        NameIssue,
    };
    use crate::prepare::target_name;
    use proptest::prelude::*;
    use std::cmp::Ordering;
    use std::path::Path;

    // ============================================================================
    // naming property tests
    // ============================================================================

    proptest! {
        /// Property: every `R` + four digits collection name is valid
        #[test]
        fn collection_codes_are_valid(code in "R[0-9]{4}", suffix in "(_[a-z0-9]{1,8})?") {
            let name = format!("{code}{suffix}");
            prop_assert!(is_valid_collection_name(&name));
        }

        /// Property: names without the leading `R` are never valid collections
        #[test]
        fn collection_requires_leading_r(name in "[A-QS-Z0-9][0-9]{4}") {
            prop_assert!(!is_valid_collection_name(&name));
        }

        /// Property: a well-formed deployment name parses back into its parts
        #[test]
        fn deployment_names_parse_back(
            collection in "R[0-9]{4}",
            location in "[A-Za-z0-9]{1,10}",
            suffix in proptest::option::of("[a-z0-9]{1,6}"),
        ) {
            let name = match &suffix {
                Some(s) => format!("{collection}-{location}_{s}"),
                None => format!("{collection}-{location}"),
            };
            prop_assert!(is_valid_deployment_name(&name));

            let parsed = DeploymentName::parse(&name).unwrap();
            prop_assert_eq!(&parsed.collection, &collection);
            prop_assert_eq!(&parsed.location, &location);
            prop_assert_eq!(parsed.suffix, suffix);
        }

        /// Property: a deployment checked against its own collection never
        /// reports a prefix mismatch
        #[test]
        fn own_collection_never_mismatches(
            collection in "R[0-9]{4}",
            location in "[A-Za-z0-9]{1,10}",
        ) {
            let name = format!("{collection}-{location}");
            prop_assert!(check_deployment_name(&collection, &name, &[]).is_ok());
        }

        /// Property: a different collection always reports a prefix mismatch
        #[test]
        fn other_collection_always_mismatches(
            a in "R[0-9]{4}",
            b in "R[0-9]{4}",
            location in "[A-Za-z0-9]{1,10}",
        ) {
            prop_assume!(a != b);
            let name = format!("{a}-{location}");
            let is_mismatch = matches!(
                check_deployment_name(&b, &name, &[]),
                Err(NameIssue::CollectionMismatch { .. })
            );
            prop_assert!(is_mismatch);
        }
    }

    // ============================================================================
    // ordering property tests
    // ============================================================================

    proptest! {
        /// Property: numbered files sort by their number
        #[test]
        fn natural_order_follows_numbers(a in 0u32..100_000, b in 0u32..100_000) {
            let pa = format!("IMG_{a}.JPG");
            let pb = format!("IMG_{b}.JPG");
            prop_assert_eq!(natural_cmp(Path::new(&pa), Path::new(&pb)), a.cmp(&b));
        }

        /// Property: the directory part is compared before the file name
        #[test]
        fn natural_order_groups_by_directory(dir in 100u32..999, a in 0u32..10_000, b in 0u32..10_000) {
            let first = format!("{dir}MEDIA/IMG_{a}.JPG");
            let second = format!("{}MEDIA/IMG_{b}.JPG", dir + 1);
            prop_assert_eq!(natural_cmp(Path::new(&first), Path::new(&second)), Ordering::Less);
        }

        /// Property: export names keep the position zero-padded to four digits
        #[test]
        fn target_names_pad_position(idx in 1usize..10_000) {
            let name = target_name("R0001", "R0001-LOC01", None, idx, Path::new("a.JPG"));
            let expected = format!("R0001-R0001-LOC01__unknown_date_{idx:04}.jpg");
            prop_assert_eq!(name, expected);
        }
    }
}
