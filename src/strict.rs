//! JSON reading that rejects duplicate object keys.
//!
//! `serde_json::Value` keeps only the last value of a repeated key, which
//! would let `{"docs":[...],"docs":[]}` load as an empty index. This reader
//! builds the same `Value` but stops at the first repeated key and reports
//! where it occurred.

use crate::error::MalformedReason;
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::fmt;

/// Where a value sits relative to the `{"docs": [...]}` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    /// The top-level object
    Root,
    /// The value of the top-level `docs` key
    Docs,
    /// Anything inside entry `docs[n]`
    Entry(usize),
    /// Anything else below the root
    Other,
}

#[derive(Clone, Copy)]
struct UniqueKeys<'a> {
    scope: Scope,
    /// First duplicate found; serde errors only carry a message
    duplicate: &'a RefCell<Option<MalformedReason>>,
}

impl UniqueKeys<'_> {
    const fn within(self, scope: Scope) -> Self {
        Self {
            scope,
            duplicate: self.duplicate,
        }
    }

    fn duplicate_reason(self, key: &str) -> MalformedReason {
        match self.scope {
            Scope::Entry(index) => MalformedReason::DuplicateField {
                index,
                field: key.to_string(),
            },
            Scope::Root | Scope::Docs | Scope::Other => {
                MalformedReason::DuplicateKey(key.to_string())
            }
        }
    }
}

impl<'de> DeserializeSeed<'de> for UniqueKeys<'_> {
    type Value = Value;

    fn deserialize<D: de::Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for UniqueKeys<'_> {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        loop {
            let scope = match self.scope {
                Scope::Docs => Scope::Entry(items.len()),
                Scope::Root | Scope::Other => Scope::Other,
                entry @ Scope::Entry(_) => entry,
            };
            match seq.next_element_seed(self.within(scope))? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                let reason = self.duplicate_reason(&key);
                let message = reason.to_string();
                *self.duplicate.borrow_mut() = Some(reason);
                return Err(de::Error::custom(message));
            }

            let scope = match self.scope {
                Scope::Root if key == "docs" => Scope::Docs,
                Scope::Root | Scope::Docs | Scope::Other => Scope::Other,
                entry @ Scope::Entry(_) => entry,
            };
            let value = map.next_value_seed(self.within(scope))?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

/// Parses a JSON payload, failing on syntax errors and on repeated object keys.
pub(crate) fn parse_value(payload: &str) -> Result<Value, MalformedReason> {
    let duplicate = RefCell::new(None);
    let seed = UniqueKeys {
        scope: Scope::Root,
        duplicate: &duplicate,
    };

    let mut deserializer = serde_json::Deserializer::from_str(payload);
    let result = seed
        .deserialize(&mut deserializer)
        .and_then(|value| deserializer.end().map(|()| value));

    result.map_err(|e| {
        duplicate.take().unwrap_or_else(|| MalformedReason::Syntax {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
    })
}
