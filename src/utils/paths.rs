/// File name for a benchmark report: every run of colon or space characters
/// collapses to a single underscore, then `.xml` is appended.
pub fn report_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut in_separator = false;
    for c in name.chars() {
        if c == ':' || c == ' ' {
            if !in_separator {
                out.push('_');
            }
            in_separator = true;
        } else {
            out.push(c);
            in_separator = false;
        }
    }
    out.push_str(".xml");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_runs_collapse() {
        assert_eq!(
            report_file_name("integral: to_chars benchmark"),
            "integral_to_chars_benchmark.xml"
        );
    }

    #[test]
    fn test_plain_name_untouched() {
        assert_eq!(report_file_name("charbuf"), "charbuf.xml");
    }

    #[test]
    fn test_mixed_run_is_one_underscore() {
        assert_eq!(report_file_name("a :: b"), "a_b.xml");
    }
}
