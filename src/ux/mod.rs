use colored::Colorize;
use std::io::{self, Write};

use crate::resolve::Resolution;
use crate::schema::ValidationResult;
use crate::score::{Category, QualityScore};

pub fn show_definition_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    println!("\n{}", "Schema warnings:".yellow().bold());
    for w in warnings {
        println!(" - {}", w);
    }
}

pub fn show_validation(result: &ValidationResult) {
    println!("\n=== VALIDATION ===");
    if result.valid {
        println!("{}", "all supplied values check out".green());
        return;
    }
    for (name, issue) in &result.errors {
        println!(
            "{} {}  {}",
            "[INVALID]".red().bold(),
            name.bold(),
            issue.message
        );
    }
}

pub fn show_resolution(resolution: &Resolution) {
    println!("\n=== RESOLVED PROMPT ===");
    println!("{}", resolution.text);
    if !resolution.substituted.is_empty() {
        println!(
            "{} {}",
            "filled:".green().bold(),
            resolution.substituted.join(", ")
        );
    }
    if !resolution.complete() {
        println!(
            "{} {}",
            "missing:".yellow().bold(),
            resolution.missing.join(", ")
        );
    }
}

fn category_label(category: Category) -> String {
    let label = category.label();
    match category {
        Category::Excellent => label.green().bold().to_string(),
        Category::Good => label.cyan().bold().to_string(),
        Category::NeedsImprovement => label.yellow().bold().to_string(),
        Category::Poor => label.red().bold().to_string(),
    }
}

pub fn show_score(quality: &QualityScore) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━ Quality ━━━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!(
        "  {}: {}/100   {}: {}",
        "Score".bold(),
        quality.score,
        "Category".bold(),
        category_label(quality.category)
    );
    println!(
        "{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );

    for s in &quality.strengths {
        println!("  {} {}", "+".green().bold(), s);
    }
    for w in &quality.weaknesses {
        println!("  {} {}", "-".red().bold(), w);
    }
    for s in &quality.suggestions {
        println!("  {} {}", "?".cyan().bold(), s);
    }
}

pub fn show_step_banner(index: usize, total: usize, title: &str) {
    println!(
        "\n{} {}",
        format!("[step {}/{}]", index + 1, total).cyan().bold(),
        title.bold()
    );
}

pub fn warn(reason: &str) {
    println!("{} {}", "!".yellow().bold(), reason);
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}

/// Read one line of input; empty string on EOF.
pub fn prompt_line(label: &str) -> String {
    print!("{}: ", label);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        s.trim().to_string()
    } else {
        String::new()
    }
}
