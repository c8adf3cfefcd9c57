//! Plan and warning output

use crate::engine::{Action, PlannedChange};

fn symbol(action: Action) -> &'static str {
    match action {
        Action::Create => "+",
        Action::Update => "~",
        Action::Replace => "-/+",
        Action::Delete => "-",
        Action::Forget => "x",
        Action::NoChange => " ",
    }
}

/// Count changes per action: (create, update, replace, delete, forget)
fn summary(changes: &[PlannedChange]) -> String {
    let count = |action: Action| changes.iter().filter(|c| c.action == action).count();
    format!(
        "Plan: {} to create, {} to update, {} to replace, {} to delete, {} to forget.",
        count(Action::Create),
        count(Action::Update),
        count(Action::Replace),
        count(Action::Delete),
        count(Action::Forget)
    )
}

fn plan_lines(changes: &[PlannedChange]) -> Vec<String> {
    changes
        .iter()
        .filter(|c| c.action != Action::NoChange)
        .map(|c| format!("{:>3} {} ({})", symbol(c.action), c.address, c.action))
        .collect()
}

/// True when applying would change nothing
pub fn plan_is_empty(changes: &[PlannedChange]) -> bool {
    changes.iter().all(|c| c.action == Action::NoChange)
}

/// Print the planned changes followed by a summary line
pub fn output_plan(changes: &[PlannedChange]) {
    if plan_is_empty(changes) {
        println!("No changes. The site matches the manifest.");
        return;
    }
    for line in plan_lines(changes) {
        println!("{}", line);
    }
    println!();
    println!("{}", summary(changes));
}

/// Print non-fatal warnings to stderr
pub fn output_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}
