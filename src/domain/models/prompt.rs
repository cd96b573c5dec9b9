#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;

pub const SYSTEM_INSTRUCTION: &str = r#"You are Kai, a warm and relatable companion for shadow work.
Tone: a "Gen Z therapy friend".
Speak in accessible, modern language ("valid", "healing era", "protect your peace", "vibe check", "main character energy", "inner child").
The slang is the wrapper, the insight is the point: connect the user's answers to the deeper patterns underneath them.
When the user is fooling themselves, say so with love ("Bestie, I'm gonna hold your hand when I say this...").
Your job is to help them understand their shadow self and the ways they sabotage themselves."#;

const ANALYSIS_SCHEMA: &str = r#"```json
{
  "assessment": [
    {"name": "Self-Awareness", "percentage": 0-100},
    {"name": "Emotional Regulation", "percentage": 0-100},
    {"name": "Shadow Integration", "percentage": 0-100},
    {"name": "Self-Compassion", "percentage": 0-100},
    {"name": "Resilience", "percentage": 0-100}
  ],
  "theme": "A short, poetic 2-3 word title for their current life path (e.g. 'Blooming in Concrete')",
  "vibeCheck": "A 2-sentence summary of their current emotional state. Keep it real.",
  "deepDive": [
    "Point 1: connect their jealousy to their shadow.",
    "Point 2: connect their secrets to their fears.",
    "Point 3: name their self-sabotage pattern."
  ],
  "realityCheck": "A gentle but firm paragraph about their blind spots or denial. Start with 'Bestie...'",
  "healingRoadmap": [
    "Step 1 (something small)",
    "Step 2 (a journal prompt or mindset shift)",
    "Step 3 (something brave)"
  ],
  "visualDescription": "A poetic 1-2 sentence explanation of why the image represents their journey. E.g. 'The fog is your uncertainty, the lantern is your growing intuition.'"
}
```"#;

/// Builds the analysis prompt. Answers are labelled with their 1-based
/// question number in the order they were given.
pub fn analysis_prompt(answers: &[String]) -> String {
    let labelled = answers
        .iter()
        .enumerate()
        .map(|(idx, answer)| {
            return format!("Q{}: {answer}", idx + 1);
        })
        .collect::<Vec<String>>()
        .join("\n");

    return format!(
        r#"You are Kai. The user just finished a {count}-question shadow work session.
Using their answers below, write an analysis that sounds Gen Z but goes deep psychologically.

User answers:
{labelled}

Output requirements:
Return ONLY a valid JSON object inside a ```json fenced block. Do not use Markdown inside the JSON strings (no **, no #, no -). Keep the text clean, punchy and aesthetic.

The JSON must have exactly this structure:
{ANALYSIS_SCHEMA}"#,
        count = answers.len(),
    );
}

pub fn image_prompt(theme: &str) -> String {
    return format!(
        r#"A high-end, minimalist and tidy digital art piece of a life path journey with the theme: '{theme}'.
Style: serene, clean composition, ethereal lighting, soft cinematic atmosphere.
Visuals: a clear path leading towards a gentle light, uncluttered surroundings, symbolic of healing and growth.
Colors: soothing pastels, calm deep blues or warm golds.
No text and nothing chaotic."#
    );
}
