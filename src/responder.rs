//! Response generation.
//!
//! Currently a canned acknowledgment. The intended design feeds
//! [`build_prompt`]'s output to an external text-generation service and
//! returns its completion; until that backend is wired in, `generate_response`
//! stays a deterministic placeholder and callers must not rely on anything
//! beyond its signature.

use crate::config::PersonalityProfile;

/// Generate the outbound response for an inbound message.
///
/// Pure function of the personality profile and the inbound text. The output
/// always embeds the inbound text verbatim.
// TODO: replace the canned template with a call to a generation backend,
// prompted with build_prompt(personality, inbound).
pub fn generate_response(_personality: &PersonalityProfile, inbound: &str) -> String {
    format!("Thank you for contacting us. We received: '{inbound}'")
}

/// Assemble the prompt material a generation backend would receive.
pub fn build_prompt(personality: &PersonalityProfile, inbound: &str) -> String {
    let traits: Vec<String> = personality
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect();

    format!(
        "Based on this personality:\n{}\nUser message: {inbound}\nGenerate an appropriate response:",
        traits.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn support_bot() -> PersonalityProfile {
        PersonalityProfile::new()
            .with("name", "Support Bot")
            .with("tone", "professional and friendly")
            .with("expertise", "customer support")
    }

    #[test]
    fn response_embeds_inbound_text_verbatim() {
        let out = generate_response(&support_bot(), "Hello, I need help");
        assert!(out.contains("Hello, I need help"));
    }

    #[test]
    fn response_is_deterministic() {
        let p = support_bot();
        assert_eq!(
            generate_response(&p, "same input"),
            generate_response(&p, "same input")
        );
    }

    #[test]
    fn response_ignores_personality_for_now() {
        let out_full = generate_response(&support_bot(), "hi");
        let out_empty = generate_response(&PersonalityProfile::new(), "hi");
        assert_eq!(out_full, out_empty);
    }

    #[test]
    fn prompt_includes_personality_and_message() {
        let prompt = build_prompt(&support_bot(), "Where is my order?");
        assert!(prompt.contains("name: Support Bot"));
        assert!(prompt.contains("tone: professional and friendly"));
        assert!(prompt.contains("Where is my order?"));
    }

    #[test]
    fn prompt_with_empty_personality_still_carries_message() {
        let prompt = build_prompt(&PersonalityProfile::new(), "hi");
        assert!(prompt.contains("User message: hi"));
    }
}
