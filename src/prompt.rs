//! Prompt templates returned by the tools
//!
//! The server never calls a model itself. Each tool renders one of these
//! templates and hands the text back so the caller's model can do the
//! summarizing.

/// Section headings the rulebook summary must use
pub const RULEBOOK_SECTIONS: [&str; 2] = ["Setup", "Guide"];

/// Categories the feedback writeup must use
pub const FEEDBACK_CATEGORIES: [&str; 2] = ["Strengths", "Growth Areas"];

/// Values a feedback writer may frame observations against
pub const FEEDBACK_VALUES: [&str; 4] = [
    "Ownership: follows work through to the outcome, not just the task",
    "Collaboration: makes the people around them more effective",
    "Craft: cares about the quality of what ships",
    "Candor: says the hard thing early and kindly",
];

/// Render the board game rulebook summary prompt around extracted text.
pub fn render_rulebook_summary(rulebook_text: &str) -> String {
    let [setup, guide] = RULEBOOK_SECTIONS;

    format!(
        r#"Summarize the board game rulebook below so that a group can start playing quickly.

Write exactly two sections, each as a bulleted list:

## {setup}
- Everything needed before the first turn: components to lay out, starting resources, player order.

## {guide}
- How a turn is played, the actions available, and how the game ends.

Guidelines:
- Lead the {guide} with the objective and the win condition.
- Do not state the obvious (shuffling a deck, taking turns clockwise unless the rules say otherwise).
- Be concise; group related rules into a single bullet instead of repeating context.
- Keep the rulebook's own names for components and actions.

Rulebook:
"""
{rulebook_text}
""""#
    )
}

/// Render the peer feedback prompt for one person.
pub fn render_feedback(name: &str, description: &str) -> String {
    let [strengths, growth_areas] = FEEDBACK_CATEGORIES;
    let values = FEEDBACK_VALUES
        .iter()
        .map(|value| format!("- {}", value))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Write peer feedback for {name} based on the observations below.

Address {name} directly in the second person ("you").
Organize the feedback into two categories, each as a bulleted list:

## {strengths}
- What {name} does well, tied to a concrete observation.

## {growth_areas}
- Where {name} can improve, phrased as a specific and actionable suggestion.

Keep each bullet to one or two sentences and do not invent events that are not in the observations.
Where it fits naturally, you may frame a point in terms of one of these values:
{values}

Observations about {name}:
"""
{description}
""""#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rulebook_summary_contains_text_and_sections() {
        let text = "Each player takes 5 wood.\nThe first to 10 points wins.\n";
        let prompt = render_rulebook_summary(text);

        assert!(prompt.contains(text));
        for section in RULEBOOK_SECTIONS {
            assert!(prompt.contains(section), "missing section {}", section);
        }
    }

    #[test]
    fn test_rulebook_summary_empty_text() {
        let prompt = render_rulebook_summary("");
        assert!(prompt.contains("## Setup\n"));
        assert!(prompt.contains("## Guide\n"));
        assert!(prompt.ends_with("\"\"\"\n\n\"\"\""));
    }

    #[test]
    fn test_feedback_contains_fields_and_categories() {
        let prompt = render_feedback("Alex", "Shipped the Q3 launch on time.");

        assert!(prompt.contains("Alex"));
        assert!(prompt.contains("Shipped the Q3 launch on time."));
        for category in FEEDBACK_CATEGORIES {
            assert!(prompt.contains(category), "missing category {}", category);
        }
        assert!(prompt.contains("## Strengths\n"));
        assert!(prompt.contains("## Growth Areas\n"));
    }

    #[test]
    fn test_feedback_lists_values() {
        let prompt = render_feedback("Sam", "Ran the retro.");
        for value in FEEDBACK_VALUES {
            assert!(prompt.contains(value));
        }
    }

    #[test]
    fn test_interpolation_is_not_rescanned() {
        let prompt = render_feedback("{description}", "{name}");
        assert!(prompt.contains("Write peer feedback for {description} based"));
        assert!(prompt.contains("\"\"\"\n{name}\n\"\"\""));
    }
}
