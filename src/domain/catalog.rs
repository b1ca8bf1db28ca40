use serde::{Deserialize, Serialize};

/// Whether a course or lesson is open to everyone or gated behind payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
  Free,
  Payment,
}

impl AccessTier {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "free" => Some(Self::Free),
      "payment" => Some(Self::Payment),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Free => "free",
      Self::Payment => "payment",
    }
  }
}

/// Top level of the catalog hierarchy: type -> course -> lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseType {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  pub color: Option<String>,
  pub order_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
  pub id: i64,
  pub type_id: i64,
  pub name: String,
  pub short_description: Option<String>,
  pub long_description: Option<String>,
  pub access: AccessTier,
  pub order_number: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  pub id: i64,
  pub course_id: i64,
  pub name: String,
  pub short_description: Option<String>,
  pub long_description: Option<String>,
  /// Opaque content reference (video hosting URL); never dereferenced here.
  pub url_to_file: Option<String>,
  pub order_number: i64,
  pub access: AccessTier,
}
