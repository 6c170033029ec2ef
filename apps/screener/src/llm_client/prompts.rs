// Cross-cutting prompt fragments shared by every agent.
// Agent-specific system prompts live in agents/prompts.rs.

/// Appended to every agent system prompt.
pub const JSON_ONLY_SYSTEM: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies outside the JSON.";

/// Joins an agent's role prompt with the shared JSON instruction.
pub fn with_json_instruction(system_prompt: &str) -> String {
    format!("{}\n\n{}", system_prompt.trim_end(), JSON_ONLY_SYSTEM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_instruction_is_appended_once() {
        let prompt = with_json_instruction("You are a reviewer.\n");
        assert!(prompt.starts_with("You are a reviewer.\n\n"));
        assert_eq!(prompt.matches("valid JSON only").count(), 1);
    }
}
