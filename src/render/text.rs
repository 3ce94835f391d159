use std::fmt::Write;

use crate::persona::Persona;
use crate::reddit::RawActivity;

/// One line per field, each followed by the persona's citation list.
pub fn render_text(persona: &Persona, raw: &RawActivity) -> String {
    let sources = persona.sources.join(", ");
    let mut out = format!("User Persona for u/{}\n", raw.handle);
    for (label, value) in persona.fields() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "- {label}: {value} [Sources: {sources}]");
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sentinel_rendering() {
        let text = render_text(&Persona::sentinel("ghost"), &RawActivity::missing("ghost"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "User Persona for u/ghost");
        assert_eq!(lines[1], "- Name: Ghost User [Sources: ]");
        assert_eq!(
            lines[7],
            "- About: No data available for u/ghost. [Sources: ]"
        );
        assert!(text.ends_with("- Personality: Unknown [Sources: ]\n"));
    }

    #[test]
    fn sources_repeated_on_every_line() {
        let mut persona = Persona::sentinel("x");
        persona.sources = vec!["https://a".into(), "https://b".into()];
        let text = render_text(&persona, &RawActivity::missing("x"));
        assert_eq!(
            text.matches("[Sources: https://a, https://b]").count(),
            14
        );
    }
}
