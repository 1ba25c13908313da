use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roles as the backend spells them. The client never verifies a credential;
/// a role is whatever the directory match (or the admin fallback) said it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "TEACHER")]
    Teacher,
    #[serde(rename = "STUDENT")]
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Teacher => write!(f, "TEACHER"),
            Role::Student => write!(f, "STUDENT"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "TEACHER" => Ok(Role::Teacher),
            "STUDENT" => Ok(Role::Student),
            other => Err(format!(
                "invalid role: '{}'. Supported roles: ADMIN, TEACHER, STUDENT",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub classroom: Option<Classroom>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Composite key of an enrollment: the (student, class) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentId {
    pub student_id: i64,
    pub class_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    #[serde(default)]
    pub mark: Option<String>,
}

/// The locally stored trust-on-faith session flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn admin() -> Self {
        Self {
            role: Role::Admin,
            teacher_id: None,
            student_id: None,
            logged_in_at: Utc::now(),
        }
    }

    pub fn teacher(id: i64) -> Self {
        Self {
            role: Role::Teacher,
            teacher_id: Some(id),
            student_id: None,
            logged_in_at: Utc::now(),
        }
    }

    pub fn student(id: i64) -> Self {
        Self {
            role: Role::Student,
            teacher_id: None,
            student_id: Some(id),
            logged_in_at: Utc::now(),
        }
    }
}

// ---- Request payloads (camelCase on the wire) ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassroom {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub password: String,
    pub class_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacher {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStudent {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollStudent {
    pub student_id: i64,
    pub class_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkUpdate {
    pub mark: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}
