// Shared prompt fragments and template filling.
// Each feature that calls the model defines its own prompts.rs alongside it.

/// Closing instruction appended to every prompt that expects a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Return ONLY valid JSON. Do NOT include any text outside the JSON value. \
Do NOT include explanations or apologies.";

/// Fills `{key}` placeholders in a single left-to-right pass.
///
/// Inserted values are never rescanned, so resume-derived text that happens
/// to contain `{something}` is copied verbatim. Braces that do not open a
/// known key (JSON schema examples) are left alone.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values.iter().find(|(key, _)| {
            tail.strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_occurrence() {
        let filled = fill_template("{a} and {b} and {a}", &[("a", "1"), ("b", "2")]);
        assert_eq!(filled, "1 and 2 and 1");
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        let filled = fill_template("A: {a}\nB: {b}", &[("a", "{b}, x"), ("b", "y")]);
        assert_eq!(filled, "A: {b}, x\nB: y");
    }

    #[test]
    fn test_unknown_braces_are_kept() {
        let template = "{\n  \"question\": \"{q}\"\n} {unknown} {";
        let filled = fill_template(template, &[("q", "why?")]);
        assert_eq!(filled, "{\n  \"question\": \"why?\"\n} {unknown} {");
    }

    #[test]
    fn test_key_prefix_does_not_match_longer_placeholder() {
        let filled = fill_template("{name} {names}", &[("name", "Ada")]);
        assert_eq!(filled, "Ada {names}");
    }
}
