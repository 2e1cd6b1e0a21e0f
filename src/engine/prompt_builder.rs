use crate::model::event::Event;
use crate::model::narration::OptionBounds;

/// Builds the full prompt sent to the narration service.
/// This struct only formats text: no parsing, no networking, no engine logic.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(
        history: &[Event],
        last_user_action: &str,
        current_narration: &str,
        requested: usize,
        bounds: OptionBounds,
    ) -> String {
        let mut prompt = String::new();

        push_system_prompt(&mut prompt);
        push_history_section(&mut prompt, history);
        push_last_narration(&mut prompt, current_narration);
        push_last_user_action(&mut prompt, last_user_action);
        push_reply_contract(&mut prompt, requested, bounds);

        prompt
    }
}

fn push_system_prompt(prompt: &mut String) {
    prompt.push_str(
        "You are a creative interactive story engine.\n\
Given the story history, the last narration and the last user action, \
continue the story and offer the player their next choices.\n\n",
    );
}

fn push_history_section(prompt: &mut String, history: &[Event]) {
    prompt.push_str("STORY HISTORY:\n");
    for event in history {
        prompt.push_str(&format!("{}: {}\n", event.role, event.description));
    }
    prompt.push('\n');
}

fn push_last_narration(prompt: &mut String, narration: &str) {
    prompt.push_str("LAST NARRATION: ");
    prompt.push_str(narration);
    prompt.push_str("\n\n");
}

fn push_last_user_action(prompt: &mut String, action: &str) {
    prompt.push_str("LAST USER ACTION: ");
    prompt.push_str(action);
    prompt.push_str("\n\n");
}

fn push_reply_contract(prompt: &mut String, requested: usize, bounds: OptionBounds) {
    prompt.push_str(&format!(
        "Reply with exactly one JSON object and nothing else, using this schema:\n\
{{\n  \"narration\": \"...\",\n  \"options\": [\"...\", \"...\"]\n}}\n\
- \"narration\" is a string describing what happens next.\n\
- \"options\" is a list of {requested} short actions the player can take \
(never fewer than {min} and never more than {max}).\n\
No extra commentary.\n",
        min = bounds.min,
        max = bounds.max,
    ));
}
