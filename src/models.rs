use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub code: String,
    pub name: String,
    pub credits: Number,
    pub su_eligible: bool,
    pub bidding: Bidding,
    pub assessments: Assessments,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bidding {
    pub year: ReportValue,
    pub min_points: ReportValue,
    pub max_points: ReportValue,
    pub average: ReportValue,
}

/// A display-only scalar: module files carry both `2024` and `"2024-25 T2"`,
/// `12` and `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportValue {
    Number(Number),
    Text(String),
}

impl fmt::Display for ReportValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportValue::Number(value) => write!(f, "{value}"),
            ReportValue::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessments {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quizzes: Vec<Quiz>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exams: Vec<Exam>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub name: String,
    pub date: NaiveDate,
    pub weightage: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub deadline: NaiveDate,
    pub weightage: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub name: String,
    pub date: NaiveDate,
    pub weightage: Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    Quiz,
    Project,
    Exam,
}

impl AssessmentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Quiz => "Quiz",
            Self::Project => "Project",
            Self::Exam => "Exam",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingAssessment {
    pub module_code: String,
    pub label: String,
    pub date: NaiveDate,
    pub kind: AssessmentKind,
    pub weightage: Number,
}
