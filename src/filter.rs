/// Something that can be matched by the name search box.
pub trait Named {
    fn name(&self) -> &str;
}

/// Trimmed keyword, or `None` when it would match everything.
pub fn normalize_keyword(keyword: &str) -> Option<&str> {
    let trimmed = keyword.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Keep the items whose name contains `keyword`, in their existing order.
pub fn filter_by_name<T: Named>(items: Vec<T>, keyword: &str) -> Vec<T> {
    match normalize_keyword(keyword) {
        Some(needle) => items
            .into_iter()
            .filter(|item| item.name().contains(needle))
            .collect(),
        None => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str);

    impl Named for Row {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|row| row.0).collect()
    }

    #[test]
    fn keeps_only_substring_matches() {
        let rows = vec![Row("九州丨奉孝"), Row("九州丨XX")];
        assert_eq!(names(&filter_by_name(rows, "XX")), ["九州丨XX"]);
    }

    #[test]
    fn blank_keyword_keeps_everything() {
        let rows = vec![Row("b"), Row("a")];
        assert_eq!(names(&filter_by_name(rows, "   ")), ["b", "a"]);
        assert_eq!(normalize_keyword(""), None);
    }

    #[test]
    fn match_is_case_sensitive_after_trimming() {
        let rows = vec![Row("九州丨XX")];
        assert_eq!(names(&filter_by_name(rows, "  XX ")), ["九州丨XX"]);
        let rows = vec![Row("九州丨XX")];
        assert!(filter_by_name(rows, "xx").is_empty());
    }

    #[test]
    fn survivors_keep_relative_order() {
        let rows = vec![Row("zed-1"), Row("amy"), Row("zed-2"), Row("zed-0")];
        assert_eq!(
            names(&filter_by_name(rows, "zed")),
            ["zed-1", "zed-2", "zed-0"]
        );
    }
}
