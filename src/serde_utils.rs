/// Serde utility functions for common patterns
use serde::Deserializer;
use serde::de::{IgnoredAny, MapAccess, SeqAccess};
use std::fmt;

/// Deserialize a loosely-typed integer id into `Option<Option<i64>>`.
///
/// Clients send ids both as JSON numbers and as numeric strings (`"1"`).
///
/// - Missing field or `null` → `None`
/// - Integer, integral float or numeric string → `Some(Some(id))`
/// - Any other string, float, boolean, array or object → `Some(None)` (present but not an id)
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::lenient_id")]
///     category: Option<Option<i64>>,
/// }
/// ```
pub fn lenient_id<'de, D>(de: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientIdVisitor;

    impl<'de> serde::de::Visitor<'de> for LenientIdVisitor {
        type Value = Option<Option<i64>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer id or a numeric string")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientIdVisitor)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(Some(v)))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(i64::try_from(v).ok()))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let integral = v.fract() == 0.0 && v >= i64::MIN as f64 && v <= i64::MAX as f64;
            Ok(Some(integral.then_some(v as i64)))
        }

        fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(None))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(v.trim().parse::<i64>().ok()))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(Some(None))
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(Some(None))
        }
    }

    de.deserialize_any(LenientIdVisitor)
}
