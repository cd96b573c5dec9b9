/// A complete analysis reply the way the model tends to send it: chatty
/// preamble, a fenced JSON block, and some markdown leaking into the strings.
pub fn analysis_response_fixture() -> &'static str {
    return r##"
Okay bestie, I read everything. Here's the breakdown.

```json
{
  "assessment": [
    {"name": "Self-Awareness", "percentage": 72},
    {"name": "Emotional Regulation", "percentage": 48},
    {"name": "Shadow Integration", "percentage": 35.5},
    {"name": "Self-Compassion", "percentage": 41},
    {"name": "Resilience", "percentage": 80}
  ],
  "theme": "**Blooming in Concrete**",
  "vibeCheck": "You're tired of performing okay. It's giving quiet burnout.",
  "deepDive": [
    "- The jealousy is pointing at a life you want but won't admit to wanting.",
    "**Secrets** keep you safe, but they also keep you alone.",
    "You quit right before the finish line so nobody can judge the result."
  ],
  "realityCheck": "Bestie, I'm gonna hold your hand when I say this: `not trying` is still a choice.",
  "healingRoadmap": [
    "# Drink water and text one friend back.",
    "Journal: what would I do if I knew nobody was watching?",
    "Finish one thing you started, out loud."
  ],
  "visualDescription": "The road is your progress, the light is the version of you that already made it."
}
```

Take care of yourself, okay?
"##
    .trim();
}

/// generateContent reply holding a text part followed by an inline PNG.
pub fn image_response_fixture() -> &'static str {
    return r#"{
  "candidates": [
    {
      "content": {
        "role": "model",
        "parts": [
          {"text": "Here is the picture you asked for."},
          {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}}
        ]
      },
      "finishReason": "STOP"
    }
  ]
}"#;
}

/// generateContent reply without any inline image data.
pub fn text_only_image_response_fixture() -> &'static str {
    return r#"{
  "candidates": [
    {
      "content": {
        "role": "model",
        "parts": [
          {"text": "I can't draw that, sorry."}
        ]
      }
    }
  ]
}"#;
}
