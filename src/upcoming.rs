use chrono::{Duration, NaiveDate, Utc};
use tracing::debug;

use crate::models::{AssessmentKind, Module, UpcomingAssessment};

/// Flattens every quiz, project and exam into one list ordered by date.
/// Items sharing a date keep module order, then quizzes, projects, exams.
pub fn collect_assessments(modules: &[Module]) -> Vec<UpcomingAssessment> {
    let mut upcoming = Vec::new();

    for module in modules {
        let assessments = &module.assessments;
        let entry = |name: &str, date: NaiveDate, kind, weightage: &serde_json::Number| {
            UpcomingAssessment {
                module_code: module.code.clone(),
                label: format!("{} - {}", module.name, name),
                date,
                kind,
                weightage: weightage.clone(),
            }
        };

        for quiz in &assessments.quizzes {
            upcoming.push(entry(&quiz.name, quiz.date, AssessmentKind::Quiz, &quiz.weightage));
        }
        for project in &assessments.projects {
            upcoming.push(entry(
                &project.name,
                project.deadline,
                AssessmentKind::Project,
                &project.weightage,
            ));
        }
        for exam in &assessments.exams {
            upcoming.push(entry(&exam.name, exam.date, AssessmentKind::Exam, &exam.weightage));
        }
    }

    upcoming.sort_by_key(|item| item.date);
    upcoming
}

/// Keeps items falling within `days` days of `reference`, both ends inclusive.
pub fn within_window(
    items: Vec<UpcomingAssessment>,
    reference: NaiveDate,
    days: i64,
) -> Vec<UpcomingAssessment> {
    let end = window_end(reference, days);
    items
        .into_iter()
        .filter(|item| item.date >= reference && item.date <= end)
        .collect()
}

/// Windows running past the last representable date end at `NaiveDate::MAX`.
pub fn window_end(reference: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days.max(0))
        .and_then(|span| reference.checked_add_signed(span))
        .unwrap_or_else(|| {
            debug!(days, "window exceeds the calendar, keeping everything from reference");
            NaiveDate::MAX
        })
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assessments, Bidding, Exam, Project, Quiz, ReportValue};
    use serde_json::Number;

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn module(code: &str, assessments: Assessments) -> Module {
        Module {
            code: code.to_string(),
            name: format!("{code} Module"),
            credits: Number::from(4),
            su_eligible: true,
            bidding: Bidding {
                year: ReportValue::Number(Number::from(2024)),
                min_points: ReportValue::Number(Number::from(1)),
                max_points: ReportValue::Number(Number::from(10)),
                average: ReportValue::Number(Number::from(5)),
            },
            assessments,
        }
    }

    fn quiz(name: &str, on: &str) -> Quiz {
        Quiz {
            name: name.to_string(),
            date: date(on),
            weightage: Number::from(10),
        }
    }

    #[test]
    fn orders_items_by_calendar_date() {
        let modules = vec![module(
            "CS101",
            Assessments {
                quizzes: vec![quiz("Quiz 1", "2024-09-01"), quiz("Quiz 2", "2024-08-15")],
                projects: vec![Project {
                    name: "Project".to_string(),
                    deadline: date("2024-10-05"),
                    weightage: Number::from(30),
                }],
                exams: Vec::new(),
            },
        )];

        let dates: Vec<String> = collect_assessments(&modules)
            .iter()
            .map(|item| item.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-08-15", "2024-09-01", "2024-10-05"]);
    }

    #[test]
    fn calendar_order_does_not_depend_on_string_width() {
        let modules = vec![module(
            "CS101",
            Assessments {
                quizzes: vec![quiz("Late", "2024-10-01"), quiz("Early", "2024-9-5")],
                ..Assessments::default()
            },
        )];

        let items = collect_assessments(&modules);
        assert_eq!(items[0].label, "CS101 Module - Early");
        assert_eq!(items[0].date, NaiveDate::from_ymd_opt(2024, 9, 5).unwrap());
    }

    #[test]
    fn ties_keep_insertion_order() {
        let modules = vec![
            module(
                "CS101",
                Assessments {
                    exams: vec![Exam {
                        name: "Final".to_string(),
                        date: date("2024-11-20"),
                        weightage: Number::from(50),
                    }],
                    quizzes: vec![quiz("Quiz", "2024-11-20")],
                    ..Assessments::default()
                },
            ),
            module(
                "MA102",
                Assessments {
                    quizzes: vec![quiz("Quiz", "2024-11-20")],
                    ..Assessments::default()
                },
            ),
        ];

        let order: Vec<(String, AssessmentKind)> = collect_assessments(&modules)
            .into_iter()
            .map(|item| (item.module_code, item.kind))
            .collect();
        assert_eq!(
            order,
            vec![
                ("CS101".to_string(), AssessmentKind::Quiz),
                ("CS101".to_string(), AssessmentKind::Exam),
                ("MA102".to_string(), AssessmentKind::Quiz),
            ]
        );
    }

    #[test]
    fn project_deadline_is_used_as_date() {
        let modules = vec![module(
            "IS111",
            Assessments {
                projects: vec![Project {
                    name: "App".to_string(),
                    deadline: date("2025-04-10"),
                    weightage: Number::from(30),
                }],
                ..Assessments::default()
            },
        )];

        let items = collect_assessments(&modules);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].kind, AssessmentKind::Project);
        assert_eq!(items[0].date, date("2025-04-10"));
        assert_eq!(items[0].label, "IS111 Module - App");
    }

    #[test]
    fn window_keeps_inclusive_range() {
        let modules = vec![module(
            "CS101",
            Assessments {
                quizzes: vec![
                    quiz("Past", "2024-08-31"),
                    quiz("Start", "2024-09-01"),
                    quiz("End", "2024-09-08"),
                    quiz("After", "2024-09-09"),
                ],
                ..Assessments::default()
            },
        )];

        let kept: Vec<String> = within_window(collect_assessments(&modules), date("2024-09-01"), 7)
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(kept, vec!["CS101 Module - Start", "CS101 Module - End"]);
    }

    #[test]
    fn window_end_clamps_negative_days() {
        assert_eq!(window_end(date("2024-09-01"), -3), date("2024-09-01"));
        assert_eq!(window_end(date("2024-09-01"), 30), date("2024-10-01"));
    }

    #[test]
    fn window_end_saturates_on_huge_windows() {
        assert_eq!(window_end(date("2024-09-01"), 1_000_000_000), NaiveDate::MAX);
        assert_eq!(window_end(date("2024-09-01"), i64::MAX), NaiveDate::MAX);
    }

    #[test]
    fn huge_window_keeps_everything_from_reference() {
        let modules = vec![module(
            "CS101",
            Assessments {
                quizzes: vec![quiz("Past", "2024-08-31"), quiz("Far", "2099-01-01")],
                ..Assessments::default()
            },
        )];

        let kept = within_window(collect_assessments(&modules), date("2024-09-01"), i64::MAX);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label, "CS101 Module - Far");
    }

    #[test]
    fn today_matches_utc_calendar_date() {
        assert_eq!(today(), Utc::now().date_naive());
    }
}
