use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::candidate::Candidate;
use crate::models::candidate_file::CandidateFile;

/// Technologies arrive either as one delimited string or as a list of
/// strings, depending on the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TechnologiesField {
    Text(String),
    List(Vec<String>),
}

impl TechnologiesField {
    pub fn as_raw_text(&self) -> String {
        match self {
            TechnologiesField::Text(s) => s.clone(),
            TechnologiesField::List(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterCandidatePayload {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 10, max = 15))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub role: Option<String>,
    #[validate(length(max = 50))]
    pub experience: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    #[validate(length(max = 1000))]
    pub areas: Option<String>,
    pub technologies: Option<TechnologiesField>,
    /// Present on the second, explicit-confirmation request; drives the
    /// UPDATE path of the upsert.
    pub candidate_id: Option<i64>,
}

impl RegisterCandidatePayload {
    /// Derive-based rules plus the phone character check the derive cannot
    /// express without a regex dependency.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let Some(phone) = self.phone.as_deref() {
            let numeric_ish = phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
            if !numeric_ish {
                let mut error = ValidationError::new("phone");
                error.message = Some("phone may only contain digits, spaces and + - ( )".into());
                errors.add("phone", error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Public fields of an existing candidate, returned with duplicate-email
/// conflicts so the client can offer an explicit update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&Candidate> for CandidateSummary {
    fn from(c: &Candidate) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            email: c.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertResult {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub candidate_email: String,
    pub technologies_count: usize,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListItem {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDetailResponse {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub technologies: Vec<String>,
    pub files: Vec<CandidateFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technologies_deserializes_from_string_or_list() {
        let from_text: TechnologiesField = serde_json::from_value(serde_json::json!("React, Go")).unwrap();
        assert_eq!(from_text.as_raw_text(), "React, Go");

        let from_list: TechnologiesField =
            serde_json::from_value(serde_json::json!(["React", "Go"])).unwrap();
        assert_eq!(from_list.as_raw_text(), "React, Go");
    }

    #[test]
    fn rejects_short_name_and_bad_email() {
        let payload = RegisterCandidatePayload {
            name: "J".into(),
            email: "not-an-email".into(),
            phone: None,
            role: None,
            experience: None,
            location: None,
            areas: None,
            technologies: None,
            candidate_id: None,
        };
        let errors = payload.check().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn rejects_alphabetic_phone() {
        let payload = RegisterCandidatePayload {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: Some("phone12345".into()),
            role: None,
            experience: None,
            location: None,
            areas: None,
            technologies: None,
            candidate_id: None,
        };
        let errors = payload.check().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn accepts_well_formed_payload() {
        let payload = RegisterCandidatePayload {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: Some("+351912345678".into()),
            role: Some("Backend Engineer".into()),
            experience: Some("5-8".into()),
            location: Some("Lisbon".into()),
            areas: Some("Distributed systems".into()),
            technologies: Some(TechnologiesField::Text("Rust, Go".into())),
            candidate_id: None,
        };
        assert!(payload.check().is_ok());
    }
}
