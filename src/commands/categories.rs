//! Categories command handler.

use sample_core::Category;
use std::fmt::Write as _;

/// Table of every category token with its domain and required member type.
pub fn render_categories() -> String {
    let image = Category::image(0, 0);
    let rows = Category::SIMPLE
        .iter()
        .map(|category| (category.to_string(), *category))
        .chain(std::iter::once((
            "image(width: W, height: H)".to_string(),
            image,
        )));

    let mut out = String::new();
    let _ = writeln!(out, "{:<28} {:<8} TYPE", "CATEGORY", "DOMAIN");
    for (token, category) in rows {
        let domain = category.domain();
        let _ = writeln!(out, "{token:<28} {:<8} {}", domain.to_string(), domain.expected_type());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_every_category() {
        let table = render_categories();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("CATEGORY"));
        assert!(table.contains("creditCardNumber"));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("price") && line.ends_with("f64")));
        assert!(lines[12].starts_with("image(width: W, height: H)"));
        assert!(lines[12].ends_with("Url"));
    }
}
