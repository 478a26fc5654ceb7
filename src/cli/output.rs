//! CLI output formatting helpers

use crate::rag::SearchResult;

/// Truncate a string to `max_len` characters, appending an ellipsis
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len).collect();
        format!("{truncated}...")
    }
}

/// Print a ranked result list as a compact table
pub fn print_results(results: &[SearchResult]) {
    if results.is_empty() {
        println!("No records retrieved.");
        return;
    }

    println!("{:<4} {:<8} {:<9} Question", "#", "Score", "Source");
    println!("{}", "-".repeat(72));
    for (idx, result) in results.iter().enumerate() {
        println!(
            "{:<4} {:<8.4} {:<9} {}",
            idx + 1,
            result.score,
            format!("{:?}", result.source).to_lowercase(),
            truncate_str(&result.record.question, 48)
        );
    }
}

/// Print a section header for strategy comparisons
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(72));
    println!("  {title}");
    println!("{}", "=".repeat(72));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer string", 8), "a longer...");
    }
}
