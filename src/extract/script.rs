use regex::Regex;
use std::sync::LazyLock;

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:python)?\s*").expect("valid fence regex"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\A\s*(?:\d+\.\s*)?(?:\*\*)?manim code:?(?:\*\*)?:?[ \t]*\n?")
        .expect("valid heading regex")
});
static DANGLING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\A|\n)[ \t]*(?:\*\*)?\d+\.(?:\*\*)?[ \t]*\z").expect("valid numbering regex")
});

/// Strip the wrapping the models put around an animation script so it can be
/// handed to the renderer as-is.
pub fn clean_animation_script(script: &str) -> String {
    let lines: Vec<&str> = script.trim().lines().collect();
    let lines = match lines.first() {
        Some(first) if first.trim().starts_with(r"\boxed{") => {
            &lines[1..lines.len().saturating_sub(1).max(1)]
        }
        _ => &lines[..],
    };
    let script = lines.join("\n");
    let script = FENCE_OPEN.replace_all(&script, "");
    let script = script.replace("```", "");
    let script = HEADING.replace(script.trim(), "");
    let script = DANGLING_NUMBER.replace(script.trim_end(), "");
    script.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_code_fences() {
        let raw = "```python\nfrom manim import *\n\nclass MathExplanation(Scene):\n    pass\n```";
        assert_eq!(
            clean_animation_script(raw),
            "from manim import *\n\nclass MathExplanation(Scene):\n    pass"
        );
    }

    #[test]
    fn removes_boxed_wrapper() {
        let raw = "\\boxed{\nfrom manim import *\n}";
        assert_eq!(clean_animation_script(raw), "from manim import *");
    }

    #[test]
    fn removes_section_heading_and_trailing_number() {
        let raw = "1. Manim Code:\n```python\nfrom manim import *\n```\n\n2.";
        assert_eq!(clean_animation_script(raw), "from manim import *");
    }

    #[test]
    fn plain_code_is_untouched() {
        let raw = "from manim import *\nclass A(Scene):\n    def construct(self):\n        self.wait(3)";
        assert_eq!(clean_animation_script(raw), raw);
    }
}
