use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Module, UpcomingAssessment};
use crate::upcoming;

const WIDTH: usize = 80;

fn banner(output: &mut String, indent: usize, title: &str) {
    let rule = "=".repeat(WIDTH);
    let _ = writeln!(output);
    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output, "{}{}", " ".repeat(indent), title);
    let _ = writeln!(output, "{rule}");
    let _ = writeln!(output);
}

pub fn partition_by_su(modules: &[Module]) -> (Vec<&Module>, Vec<&Module>) {
    modules.iter().partition(|module| module.su_eligible)
}

pub fn total_credits(modules: &[Module]) -> f64 {
    modules
        .iter()
        .filter_map(|module| module.credits.as_f64())
        .fold(0.0, |total, credits| total + credits)
}

pub fn total_weightage(module: &Module) -> f64 {
    let assessments = &module.assessments;
    let quizzes = assessments.quizzes.iter().map(|quiz| &quiz.weightage);
    let projects = assessments.projects.iter().map(|project| &project.weightage);
    let exams = assessments.exams.iter().map(|exam| &exam.weightage);

    quizzes
        .chain(projects)
        .chain(exams)
        .filter_map(|weightage| weightage.as_f64())
        .fold(0.0, |total, weightage| total + weightage)
}

fn write_module(output: &mut String, module: &Module) {
    let _ = writeln!(output, "📚 {}: {}", module.code, module.name);
    let _ = writeln!(output, "   Credits: {}", module.credits);

    let su_status = if module.su_eligible { "✅ Yes" } else { "❌ No" };
    let _ = writeln!(output, "   S/U Eligible: {su_status}");

    let bidding = &module.bidding;
    let _ = writeln!(output);
    let _ = writeln!(output, "   💰 BIDDING ({}):", bidding.year);
    let _ = writeln!(
        output,
        "      Range: {} - {} points",
        bidding.min_points, bidding.max_points
    );
    let _ = writeln!(output, "      Average: {} points", bidding.average);

    let assessments = &module.assessments;

    if !assessments.quizzes.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "   📝 QUIZZES:");
        for quiz in &assessments.quizzes {
            let _ = writeln!(
                output,
                "      • {}: {} ({}%)",
                quiz.name, quiz.date, quiz.weightage
            );
        }
    }

    if !assessments.projects.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "   💼 PROJECTS:");
        for project in &assessments.projects {
            let _ = writeln!(
                output,
                "      • {}: Deadline {} ({}%)",
                project.name, project.deadline, project.weightage
            );
        }
    }

    if !assessments.exams.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "   📖 EXAMS:");
        for exam in &assessments.exams {
            let _ = writeln!(
                output,
                "      • {}: {} ({}%)",
                exam.name, exam.date, exam.weightage
            );
        }
    }
}

pub fn all_modules(modules: &[Module]) -> String {
    let mut output = String::new();
    banner(&mut output, 25, "MODULE MANAGEMENT SYSTEM");

    for module in modules {
        write_module(&mut output, module);
        let _ = writeln!(output, "{}", "-".repeat(WIDTH));
        let _ = writeln!(output);
    }

    let _ = writeln!(
        output,
        "Total credits: {} across {} modules",
        total_credits(modules),
        modules.len()
    );

    output
}

pub fn module_detail(module: &Module) -> String {
    let mut output = String::new();
    write_module(&mut output, module);
    let _ = writeln!(output);
    let _ = writeln!(output, "   Total weightage: {}%", total_weightage(module));
    output
}

pub fn su_eligible_modules(modules: &[Module]) -> String {
    let (eligible, _) = partition_by_su(modules);
    let mut output = String::new();
    banner(&mut output, 20, "S/U ELIGIBLE MODULES");

    if eligible.is_empty() {
        let _ = writeln!(output, "No S/U eligible modules found.");
        return output;
    }

    for module in eligible {
        let _ = writeln!(output, "✅ {}: {}", module.code, module.name);
    }
    let _ = writeln!(output);

    output
}

pub fn non_su_eligible_modules(modules: &[Module]) -> String {
    let (_, not_eligible) = partition_by_su(modules);
    let mut output = String::new();
    banner(&mut output, 20, "NON S/U ELIGIBLE MODULES");

    if not_eligible.is_empty() {
        let _ = writeln!(output, "All modules are S/U eligible.");
        return output;
    }

    for module in not_eligible {
        let _ = writeln!(output, "❌ {}: {}", module.code, module.name);
    }
    let _ = writeln!(output);

    output
}

fn bidding_title(modules: &[Module]) -> String {
    match modules.first().map(|module| &module.bidding.year) {
        Some(first) if modules.iter().all(|module| &module.bidding.year == first) => {
            format!("BIDDING SUMMARY ({first})")
        }
        _ => "BIDDING SUMMARY".to_string(),
    }
}

pub fn bidding_summary(modules: &[Module]) -> String {
    let mut output = String::new();
    banner(&mut output, 25, &bidding_title(modules));

    let _ = writeln!(
        output,
        "{:<12} {:<45} {:<6} {:<6} {:<6}",
        "Module Code", "Module Name", "Min", "Max", "Avg"
    );
    let _ = writeln!(output, "{}", "-".repeat(WIDTH));

    for module in modules {
        let bidding = &module.bidding;
        let _ = writeln!(
            output,
            "{:<12} {:<45} {:<6} {:<6} {:<6}",
            module.code,
            module.name,
            bidding.min_points.to_string(),
            bidding.max_points.to_string(),
            bidding.average.to_string()
        );
    }
    let _ = writeln!(output);

    output
}

/// Renders every assessment sorted by date. `days` only feeds the title unless
/// a `reference` date is given, in which case items outside
/// `[reference, reference + days]` are dropped.
pub fn upcoming_assessments(
    modules: &[Module],
    days: i64,
    reference: Option<NaiveDate>,
) -> String {
    let mut items = upcoming::collect_assessments(modules);
    if let Some(reference) = reference {
        items = upcoming::within_window(items, reference, days);
    }

    let mut output = String::new();
    banner(
        &mut output,
        20,
        &format!("UPCOMING ASSESSMENTS (Next {days} days)"),
    );

    if items.is_empty() {
        let _ = writeln!(output, "No assessments scheduled.");
    }

    for item in &items {
        write_upcoming(&mut output, item);
    }
    let _ = writeln!(output);

    output
}

fn write_upcoming(output: &mut String, item: &UpcomingAssessment) {
    let _ = writeln!(
        output,
        "{:<8} | {} | {:<8} | {} ({}%)",
        item.kind.label(),
        item.date,
        item.module_code,
        item.label,
        item.weightage
    );
}
