//! Decoding of the list sort parameter.
//!
//! The parameter is a comma-separated list of `field[:direction]` entries,
//! e.g. `date:desc,value`. Direction defaults to ascending. An empty
//! parameter keeps the store default (insertion) order.

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Description,
    Date,
    Value,
    Wallet,
    Type,
}

impl TryFrom<&str> for SortField {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "id" => Ok(Self::Id),
            "description" => Ok(Self::Description),
            "date" => Ok(Self::Date),
            "value" => Ok(Self::Value),
            "wallet" => Ok(Self::Wallet),
            "type" => Ok(Self::Type),
            other => Err(EngineError::InvalidSort(format!("unknown field: {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl TryFrom<&str> for SortDirection {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(EngineError::InvalidSort(format!(
                "unknown direction: {other}"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Ordered list of sort keys; the first key is the primary one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortSpec(pub Vec<SortKey>);

impl SortSpec {
    /// Decode the raw query parameter. `None` and blank strings give an empty
    /// spec.
    pub fn decode(raw: Option<&str>) -> ResultEngine<Self> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let mut keys = Vec::new();
        for entry in raw.split(',') {
            let entry = entry.trim().to_ascii_lowercase();
            if entry.is_empty() {
                return Err(EngineError::InvalidSort("empty sort entry".to_string()));
            }
            let (field, direction) = match entry.split_once(':') {
                Some((field, direction)) => (
                    SortField::try_from(field.trim())?,
                    SortDirection::try_from(direction.trim())?,
                ),
                None => (SortField::try_from(entry.as_str())?, SortDirection::Asc),
            };
            if keys.iter().any(|k: &SortKey| k.field == field) {
                return Err(EngineError::InvalidSort(format!(
                    "duplicate field: {}",
                    entry
                )));
            }
            keys.push(SortKey { field, direction });
        }

        Ok(Self(keys))
    }

    pub fn keys(&self) -> impl Iterator<Item = &SortKey> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_is_default_order() {
        assert_eq!(SortSpec::decode(None).unwrap(), SortSpec::default());
        assert_eq!(SortSpec::decode(Some("  ")).unwrap().keys().count(), 0);
    }

    #[test]
    fn decodes_fields_and_directions() {
        let spec = SortSpec::decode(Some("date:desc, Value")).unwrap();
        assert_eq!(
            spec,
            SortSpec(vec![
                SortKey {
                    field: SortField::Date,
                    direction: SortDirection::Desc,
                },
                SortKey {
                    field: SortField::Value,
                    direction: SortDirection::Asc,
                },
            ])
        );
    }

    #[test]
    fn rejects_unknown_field_and_direction() {
        assert!(matches!(
            SortSpec::decode(Some("password")),
            Err(EngineError::InvalidSort(_))
        ));
        assert!(matches!(
            SortSpec::decode(Some("date:sideways")),
            Err(EngineError::InvalidSort(_))
        ));
        assert!(matches!(
            SortSpec::decode(Some("date,,id")),
            Err(EngineError::InvalidSort(_))
        ));
        assert!(matches!(
            SortSpec::decode(Some("date,date:desc")),
            Err(EngineError::InvalidSort(_))
        ));
    }
}
