//! Property-based test generators using proptest.
//!
//! Provides strategies for generating names that are valid path
//! components and documents that survive a JSON round trip.

use crate::fixtures::{Address, Person};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for generating valid collection names.
///
/// Lowercase only, so distinct names stay distinct on case-insensitive
/// filesystems.
pub fn collection_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,31}").expect("Invalid regex")
}

/// Strategy for generating valid resource names.
///
/// Dots are allowed after the first character, so names such as `v1.2`
/// are covered, but a name never ends in `.json` or `.tmp`.
pub fn resource_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9][a-z0-9_.-]{0,31}")
        .expect("Invalid regex")
        .prop_filter("Resource name must not look like a store file", |s| {
            !s.ends_with(".json") && !s.ends_with(".tmp") && !s.ends_with('.')
        })
}

/// Strategy for generating a set of distinct resource names.
pub fn distinct_resource_names_strategy(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(resource_name_strategy(), 1..=max)
        .prop_map(|names| names.into_iter().collect())
}

/// Strategy for generating [`Person`] documents.
pub fn person_strategy() -> impl Strategy<Value = Person> {
    (
        "[A-Z][a-z]{1,12}",
        0u32..120,
        "[0-9]{7,12}",
        "[A-Za-z ]{1,20}",
        ("[A-Za-z]{1,12}", "[A-Z]{2}", "[a-z]{2}", "[0-9]{4,6}"),
    )
        .prop_map(|(name, age, contact, company, (city, state, country, pincode))| Person {
            name,
            age,
            contact,
            company,
            address: Address {
                city,
                state,
                country,
                pincode,
            },
        })
}

/// Strategy for generating arbitrary JSON values.
///
/// Floats are excluded: JSON text does not round-trip every `f64` bit
/// pattern, and the store is not in the business of fixing that.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        ".{0,16}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,8}", inner, 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}
