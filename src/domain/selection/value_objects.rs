use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;

/// Value Object - map region identifier, trimmed and upper-cased
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityCode(String);

impl EntityCode {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(ValidationError::EmptyEntityCode);
        }
        Ok(Self(code.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<EntityCode> for String {
    fn from(code: EntityCode) -> Self {
        code.0
    }
}

impl AsRef<str> for EntityCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Entity - a selectable geographic region
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{} ({})", name, code)]
pub struct Entity {
    pub code: EntityCode,
    pub name: String,
}

impl Entity {
    /// Builds an entity from raw map attributes. A blank name falls back to the code.
    pub fn new(code: &str, name: &str) -> Result<Self, ValidationError> {
        let code = EntityCode::new(code)?;
        let name = match name.trim() {
            "" => code.value().to_string(),
            trimmed => trimmed.to_string(),
        };
        Ok(Self { code, name })
    }

    pub fn code(&self) -> &EntityCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_normalized() {
        let code = EntityCode::new("  usa ").unwrap();
        assert_eq!(code.value(), "USA");
    }

    #[test]
    fn blank_code_is_rejected() {
        assert_eq!(EntityCode::new("   "), Err(ValidationError::EmptyEntityCode));
    }

    #[test]
    fn blank_name_falls_back_to_code() {
        let entity = Entity::new("fra", "").unwrap();
        assert_eq!(entity.name(), "FRA");
        assert_eq!(entity.to_string(), "FRA (FRA)");
    }
}
