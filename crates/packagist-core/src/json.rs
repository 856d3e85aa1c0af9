//! JSON decoding and encoding using sonic-rs.
//!
//! Registry responses are produced by PHP, so a few shapes need tolerance:
//! fields may be `null` instead of missing, and an empty object is often
//! serialized as an empty array. The field helpers here accept both and fall
//! back to the zero value.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Deserialize JSON string.
///
/// # Errors
/// Returns error if JSON is invalid.
pub fn from_json<T: DeserializeOwned>(s: &str) -> Result<T> {
    sonic_rs::from_str(s).map_err(Error::from)
}

/// Deserialize JSON bytes into any target shape.
///
/// # Errors
/// Returns error if the bytes are not valid JSON for `T`.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    sonic_rs::from_slice(bytes).map_err(Error::from)
}

/// Serialize to compact JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    sonic_rs::to_string(value).map_err(Error::from)
}

/// Field helper: `null` decodes to `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing field behaves the same way.
///
/// # Errors
/// Returns error if the value is present but not a `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Field helper: a list whose `null` entries are dropped.
///
/// A `null` or missing list decodes to an empty `Vec`.
///
/// # Errors
/// Returns error if the value is not a list or an entry is not a `T`.
pub fn list_skip_nulls<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(entries.unwrap_or_default().into_iter().flatten().collect())
}

/// Map value decoded with [`list_skip_nulls`].
struct NullableList<T>(Vec<T>);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NullableList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        list_skip_nulls(deserializer).map(NullableList)
    }
}

/// Field helper: a map of lists. An object, `null`, or an empty array decodes
/// to an ordered map.
///
/// Each value goes through [`list_skip_nulls`], so a `null` list is empty and
/// `null` entries inside a list are dropped.
///
/// # Errors
/// Returns error for a non-empty array or any other JSON type.
pub fn map_or_empty_array<'de, D, K, V>(
    deserializer: D,
) -> std::result::Result<IndexMap<K, Vec<V>>, D::Error>
where
    D: Deserializer<'de>,
    K: Eq + Hash + Deserialize<'de>,
    V: Deserialize<'de>,
{
    struct MapOrEmptyArray<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for MapOrEmptyArray<K, V>
    where
        K: Eq + Hash + Deserialize<'de>,
        V: Deserialize<'de>,
    {
        type Value = IndexMap<K, Vec<V>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map, null, or an empty array")
        }

        fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let lists: IndexMap<K, NullableList<V>> =
                IndexMap::deserialize(de::value::MapAccessDeserializer::new(map))?;
            Ok(lists.into_iter().map(|(key, list)| (key, list.0)).collect())
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            // PHP encodes an empty associative array as []
            if seq.next_element::<IgnoredAny>()?.is_some() {
                return Err(de::Error::custom(
                    "expected empty array for empty map, got non-empty array",
                ));
            }
            Ok(IndexMap::new())
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(IndexMap::new())
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(IndexMap::new())
        }
    }

    deserializer.deserialize_any(MapOrEmptyArray(PhantomData))
}
