use super::analysis_prompt;
use super::image_prompt;

#[test]
fn it_labels_answers_with_question_numbers() {
    let answers = vec![
        "Impatience".to_string(),
        "When my friend got promoted".to_string(),
        "I still write poetry".to_string(),
    ];
    let prompt = analysis_prompt(&answers);

    assert!(prompt.contains("Q1: Impatience\nQ2: When my friend got promoted\nQ3: I still write poetry\n"));
    assert!(prompt.contains("3-question shadow work session"));
}

#[test]
fn it_asks_for_the_full_schema() {
    let prompt = analysis_prompt(&["a".to_string()]);

    for key in [
        "\"assessment\"",
        "\"theme\"",
        "\"vibeCheck\"",
        "\"deepDive\"",
        "\"realityCheck\"",
        "\"healingRoadmap\"",
        "\"visualDescription\"",
    ] {
        assert!(prompt.contains(key), "missing {key}");
    }
    assert!(prompt.contains("```json"));
}

#[test]
fn it_embeds_the_theme_in_the_image_prompt() {
    let prompt = image_prompt("Blooming in Concrete");
    let first_line = prompt.lines().next().unwrap();

    insta::assert_snapshot!(first_line, @"A high-end, minimalist and tidy digital art piece of a life path journey with the theme: 'Blooming in Concrete'.");
}
