//! Degree → radian argument wrapping.
//!
//! Runs on a line whose identifiers are already renamed, so it only knows the
//! 2.0 spellings of the affected calls. Only single-line calls are seen; a call
//! whose first argument continues on the next line is left alone silently.

use regex::Regex;
use std::sync::LazyLock;

use super::diagnostics::{Notice, WarningKind};
use super::rules::{ANGLE_CONVERSION, DEGREE_CALLS};

static DEGREE_CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = DEGREE_CALLS.iter().map(|name| regex::escape(name)).collect();
    // First argument is everything up to the first comma on the line.
    Regex::new(&format!(r"(?P<name>{})\((?P<arg>.*?),", names.join("|"))).unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    pub notices: Vec<Notice>,
}

/// Wrap the first argument of each degree-taking call whose name starts at one
/// of `renamed_at` (ascending byte offsets) in `HMM_AngleDeg()`.
///
/// Calls already spelled the 2.0 way in the input take radians and are left
/// alone. An argument containing `(` is a call or compound expression; the call
/// is kept as is and an [`WarningKind::UnsafeWrap`] notice is produced instead.
pub fn wrap_renamed_calls(line: &str, renamed_at: &[usize]) -> WrappedLine {
    let mut text = String::with_capacity(line.len());
    let mut notices = Vec::new();
    let mut last = 0;

    for &start in renamed_at {
        if start < last {
            continue;
        }
        let Some(caps) = DEGREE_CALL_PATTERN.captures_at(line, start) else {
            break;
        };
        let Some(whole) = caps.get(0).filter(|m| m.start() == start) else {
            continue;
        };
        let (_, [name, arg]) = caps.extract();

        text.push_str(&line[last..start]);
        last = whole.end();

        if arg.contains('(') {
            notices.push(Notice::new(
                WarningKind::UnsafeWrap,
                format!(
                    "{} now takes radians, but we were unable to automatically wrap the first argument with {}().",
                    name,
                    ANGLE_CONVERSION
                ),
            ));
            text.push_str(whole.as_str());
        } else {
            text.push_str(&format!("{}({}({}),", name, ANGLE_CONVERSION, arg));
        }
    }

    text.push_str(&line[last..]);
    WrappedLine { text, notices }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Treat every prefixed name on the line as freshly renamed.
    fn wrap_all(line: &str) -> WrappedLine {
        let starts: Vec<usize> = line.match_indices("HMM_").map(|(i, _)| i).collect();
        wrap_renamed_calls(line, &starts)
    }

    #[test]
    fn simple_argument_is_wrapped() {
        let wrapped = wrap_all("HMM_Perspective_RH_NO(fov, ar, n, f)");
        assert_eq!(wrapped.text, "HMM_Perspective_RH_NO(HMM_AngleDeg(fov), ar, n, f)");
        assert!(wrapped.notices.is_empty());
    }

    #[test]
    fn rotate_literal_is_wrapped() {
        let wrapped = wrap_all("m = HMM_Rotate_RH(90.0f, axis);");
        assert_eq!(wrapped.text, "m = HMM_Rotate_RH(HMM_AngleDeg(90.0f), axis);");
    }

    #[test]
    fn nested_call_warns_and_leaves_line() {
        let line = "HMM_Rotate_RH(GetAngle(), axis)";
        let wrapped = wrap_all(line);
        assert_eq!(wrapped.text, line);
        assert_eq!(wrapped.notices.len(), 1);
        assert_eq!(wrapped.notices[0].kind, WarningKind::UnsafeWrap);
        assert!(wrapped.notices[0].message.starts_with("HMM_Rotate_RH now takes radians"));
    }

    #[test]
    fn unrenamed_names_are_not_matched() {
        let line = "HMM_Perspective(fov, ar, n, f)";
        assert_eq!(wrap_all(line).text, line);
    }

    #[test]
    fn call_without_comma_on_line_is_left_silently() {
        let line = "HMM_Rotate_RH(angle";
        let wrapped = wrap_all(line);
        assert_eq!(wrapped.text, line);
        assert!(wrapped.notices.is_empty());
    }

    #[test]
    fn every_call_on_the_line_is_handled() {
        let wrapped = wrap_all("a = HMM_Rotate_RH(x, u); b = HMM_Rotate_RH(f(y), v);");
        assert_eq!(
            wrapped.text,
            "a = HMM_Rotate_RH(HMM_AngleDeg(x), u); b = HMM_Rotate_RH(f(y), v);"
        );
        assert_eq!(wrapped.notices.len(), 1);
    }

    #[test]
    fn only_selected_calls_are_wrapped() {
        let line = "HMM_Rotate_RH(a, u) * HMM_Rotate_RH(b, v)";
        let second = line.rfind("HMM_Rotate_RH").unwrap();
        let wrapped = wrap_renamed_calls(line, &[second]);
        assert_eq!(wrapped.text, "HMM_Rotate_RH(a, u) * HMM_Rotate_RH(HMM_AngleDeg(b), v)");
    }

    #[test]
    fn unselected_nested_call_does_not_warn() {
        let wrapped = wrap_renamed_calls("HMM_Rotate_RH(GetAngle(), axis)", &[]);
        assert!(wrapped.notices.is_empty());
    }

    #[test]
    fn partially_converted_expression_warns() {
        let wrapped = wrap_all("HMM_Rotate_RH(HMM_AngleDeg(a) * 2.0f, axis)");
        assert_eq!(wrapped.notices.len(), 1);
    }

    #[test]
    fn unselected_outer_call_does_not_hide_selected_inner_call() {
        let line = "HMM_Rotate_RH(HMM_Rotate_RH(y, a), b)";
        let wrapped = wrap_renamed_calls(line, &[14]);
        assert_eq!(wrapped.text, "HMM_Rotate_RH(HMM_Rotate_RH(HMM_AngleDeg(y), a), b)");
        assert!(wrapped.notices.is_empty());
    }

    #[test]
    fn offset_not_at_a_degree_call_is_ignored() {
        let line = "HMM_Dot(a, b) + HMM_Rotate_RH(c, d)";
        assert_eq!(wrap_renamed_calls(line, &[0]).text, line);
    }
}
