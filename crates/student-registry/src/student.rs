use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_RA_LEN: usize = 50;

/// A persisted student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub ra: String,
}

/// Registration payload as received on the wire; either field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterStudent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ra: Option<String>,
}

impl RegisterStudent {
    pub fn new(name: impl Into<String>, ra: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ra: Some(ra.into()),
        }
    }
}

/// A registration that passed validation and is ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub ra: String,
}

impl NewStudent {
    pub fn parse(request: RegisterStudent) -> Result<Self> {
        let name = required("name", request.name, MAX_NAME_LEN)?;
        let ra = required("ra", request.ra, MAX_RA_LEN)?;
        Ok(Self { name, ra })
    }
}

fn required(field: &str, value: Option<String>, max_len: usize) -> Result<String> {
    let value = value.as_deref().map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(RegistryError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_len {
        return Err(RegistryError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }

    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_request() {
        let student = NewStudent::parse(RegisterStudent::new("Ana", "123")).unwrap();
        assert_eq!(student.name, "Ana");
        assert_eq!(student.ra, "123");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let student = NewStudent::parse(RegisterStudent::new("  Ana Lima ", "\t123\n")).unwrap();
        assert_eq!(student.name, "Ana Lima");
        assert_eq!(student.ra, "123");
    }

    #[test]
    fn test_parse_missing_name() {
        let request = RegisterStudent {
            name: None,
            ra: Some("123".to_string()),
        };
        let err = NewStudent::parse(request).unwrap_err();
        assert!(matches!(err, RegistryError::Validation(ref m) if m == "name is required"));
    }

    #[test]
    fn test_parse_blank_ra() {
        let err = NewStudent::parse(RegisterStudent::new("Ana", "   ")).unwrap_err();
        assert!(matches!(err, RegistryError::Validation(ref m) if m == "ra is required"));
    }

    #[test]
    fn test_parse_rejects_long_fields() {
        let long_name = "a".repeat(MAX_NAME_LEN + 1);
        let err = NewStudent::parse(RegisterStudent::new(long_name, "123")).unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));

        let long_ra = "1".repeat(MAX_RA_LEN + 1);
        let err = NewStudent::parse(RegisterStudent::new("Ana", long_ra)).unwrap_err();
        assert!(matches!(err, RegistryError::Validation(_)));
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(NewStudent::parse(RegisterStudent::new(name, "123")).is_ok());
    }

    #[test]
    fn test_request_deserialization_missing_fields() {
        let request: RegisterStudent = serde_json::from_str(r#"{"name":"Ana"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("Ana"));
        assert!(request.ra.is_none());

        let request: RegisterStudent = serde_json::from_str(r#"{"name":null,"ra":"1"}"#).unwrap();
        assert!(request.name.is_none());
    }

    #[test]
    fn test_student_serialization() {
        let student = Student {
            id: 1,
            name: "Ana".to_string(),
            ra: "123".to_string(),
        };
        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "Ana", "ra": "123"}));
    }
}
