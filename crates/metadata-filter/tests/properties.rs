//! Property tests for field enumeration, merging, and chain composition.

use std::collections::BTreeSet;

use metadata_filter::{FilterEntry, FilterFn, FilterSet, MetadataFilter};
use proptest::prelude::*;

fn append_tag(tag: String) -> FilterFn {
    FilterFn::named(tag.clone(), move |text| format!("{text}{tag}"))
}

fn field_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z_]{1,8}", 0..8).prop_map(|set| set.into_iter().collect())
}

fn build(fields: &[String], tags: &[String]) -> MetadataFilter {
    let set: FilterSet = fields
        .iter()
        .map(|field| {
            let chain = tags.iter().cloned().map(append_tag).collect::<Vec<_>>();
            (field.clone(), FilterEntry::from(chain))
        })
        .collect();
    MetadataFilter::new(&set).expect("valid filter set")
}

proptest! {
    #[test]
    fn fields_match_filter_set_keys(fields in field_names()) {
        let filter = build(&fields, &["x".to_string()]);
        let listed: Vec<String> = filter.fields().into_iter().map(str::to_string).collect();
        prop_assert_eq!(&listed, &fields);

        let unique: BTreeSet<&String> = listed.iter().collect();
        prop_assert_eq!(unique.len(), listed.len());
    }

    #[test]
    fn can_filter_field_agrees_with_fields(
        fields in field_names(),
        candidate in "[a-z_]{0,8}",
    ) {
        let filter = build(&fields, &["x".to_string()]);
        prop_assert_eq!(
            filter.can_filter_field(&candidate),
            filter.fields().contains(&candidate.as_str())
        );
    }

    #[test]
    fn chain_is_left_to_right_composition(
        tags in proptest::collection::vec("[a-z]{1,3}", 1..6),
        text in "[A-Za-z ]{1,12}",
    ) {
        let filter = build(&["field".to_string()], &tags);
        let expected = format!("{text}{}", tags.concat());
        prop_assert_eq!(filter.filter_field("field", &text).unwrap(), expected);
    }

    #[test]
    fn extend_concatenates_and_keeps_operands(
        left_fields in field_names(),
        right_fields in field_names(),
    ) {
        let left = build(&left_fields, &["L".to_string()]);
        let right = build(&right_fields, &["R".to_string()]);
        let merged = left.extend(&right);

        let listed_left: Vec<String> = left.fields().into_iter().map(str::to_string).collect();
        prop_assert_eq!(&listed_left, &left_fields);

        for field in merged.fields() {
            let in_left = left_fields.iter().any(|f| f == field);
            let in_right = right_fields.iter().any(|f| f == field);
            let expected = match (in_left, in_right) {
                (true, true) => "vLR",
                (true, false) => "vL",
                (false, true) => "vR",
                (false, false) => unreachable!("merged field {field} comes from nowhere"),
            };
            prop_assert_eq!(merged.filter_field(field, "v").unwrap(), expected);
        }
        for field in left_fields.iter().chain(&right_fields) {
            prop_assert!(merged.can_filter_field(field));
        }
        for field in &left_fields {
            prop_assert_eq!(left.filter_field(field, "v").unwrap(), "vL");
        }
    }

    #[test]
    fn empty_text_is_returned_unchanged(fields in field_names()) {
        let filter = build(&fields, &["x".to_string()]);
        for field in filter.fields() {
            prop_assert_eq!(filter.filter_field(field, "").unwrap(), "");
        }
    }
}
