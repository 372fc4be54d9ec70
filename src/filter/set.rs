use crate::framework::{ListQuery, Record};
use std::collections::BTreeMap;

/// Filter field values for one list, as typed. Values are never coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    fields: BTreeMap<String, String>,
    limit: Option<usize>,
}

impl FilterSet {
    /// Every filter field of `T`, all empty.
    pub fn for_kind<T: Record>() -> Self {
        Self {
            fields: T::FILTER_FIELDS
                .iter()
                .map(|field| (field.to_string(), String::new()))
                .collect(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Stores `value`, returning whether anything changed.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.fields.get(field) {
            Some(current) if *current == value => false,
            _ => {
                self.fields.insert(field.to_string(), value);
                true
            }
        }
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        self.fields.values_mut().for_each(String::clear);
    }

    /// Fields with a value are sent as-is; fields holding `""` are left out.
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            params: self
                .fields
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect(),
            limit: self.limit,
        }
    }
}
