//! Turns a validated [`GenerationRequest`] into provider instructions.
//!
//! The output is a pure function of the request: no clock, randomness or
//! configuration is consulted, so identical requests produce byte-identical
//! prompts.

use crate::constants::prompts::{
    ADDITIONAL_INSTRUCTIONS_HEADING, EXERCISE_INCLUDE, EXERCISE_WITH_SOLUTION_INCLUDE,
    EXERCISE_WITH_SOLUTION_MATH_EXAMPLE, FORMATTING_RULES_HEAD, FORMATTING_RULES_TAIL,
    LEARNING_PAGE_INCLUDE, LEARNING_PAGE_MATH_EXAMPLE, SYSTEM_PROMPT,
};
use crate::models::domain::{ComposedPrompt, ContentType, GenerationRequest, LearningContext};

pub fn build_prompt(request: &GenerationRequest) -> ComposedPrompt {
    let mut sections = vec![intro(request)];

    if let Some(context) = context_block(&request.context) {
        sections.push(context);
    }

    sections.push(include_list(request.content_type).to_string());
    sections.push(formatting_rules(request.content_type, &request.language));

    if let Some(custom) = request
        .custom_prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        sections.push(format!("{} {}", ADDITIONAL_INSTRUCTIONS_HEADING, custom));
    }

    ComposedPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: sections.join("\n\n"),
    }
}

fn intro(request: &GenerationRequest) -> String {
    match request.content_type {
        ContentType::LearningPage => format!(
            "Create a comprehensive learning page about \"{}\" in the subject of \"{}\".\nDifficulty level: {}.",
            request.topic, request.subject, request.difficulty
        ),
        ContentType::Exercise => format!(
            "Create a {} level exercise about \"{}\" in the subject of \"{}\".\nDifficulty level: {}.",
            request.difficulty, request.topic, request.subject, request.difficulty
        ),
        ContentType::ExerciseWithSolution => format!(
            "Create a {} level exercise with complete solution path about \"{}\" in the subject of \"{}\".\nDifficulty level: {}.",
            request.difficulty, request.topic, request.subject, request.difficulty
        ),
    }
}

/// `None` when no context field is set, so no empty heading is emitted.
fn context_block(context: &LearningContext) -> Option<String> {
    let lines = context.lines();
    if lines.is_empty() {
        return None;
    }

    let body: Vec<String> = lines
        .into_iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect();

    Some(format!("Context:\n{}", body.join("\n")))
}

fn include_list(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::LearningPage => LEARNING_PAGE_INCLUDE,
        ContentType::Exercise => EXERCISE_INCLUDE,
        ContentType::ExerciseWithSolution => EXERCISE_WITH_SOLUTION_INCLUDE,
    }
}

fn formatting_rules(content_type: ContentType, language: &str) -> String {
    let example = match content_type {
        ContentType::LearningPage => Some(LEARNING_PAGE_MATH_EXAMPLE),
        ContentType::Exercise => None,
        ContentType::ExerciseWithSolution => Some(EXERCISE_WITH_SOLUTION_MATH_EXAMPLE),
    };

    let language_rule = format!("LANGUAGE: Write the ENTIRE response in {}", language);
    let numbered = example
        .into_iter()
        .chain(FORMATTING_RULES_TAIL)
        .chain(std::iter::once(language_rule.as_str()))
        .enumerate()
        .map(|(i, rule)| format!("{}. {}", i + 4, rule))
        .collect::<Vec<_>>();

    format!("{}\n{}", FORMATTING_RULES_HEAD, numbered.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::ProviderKind;

    fn request(content_type: ContentType) -> GenerationRequest {
        GenerationRequest::new(content_type, "Mathematics", "Quadratic equations", "medium")
    }

    #[test]
    fn test_system_prompt_is_fixed() {
        let prompt = build_prompt(&request(ContentType::Exercise));
        assert!(prompt
            .system
            .starts_with("You are an expert educational content creator"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let mut req = request(ContentType::ExerciseWithSolution);
        req.context.country = Some("Germany".to_string());
        req.custom_prompt = Some("Keep it short".to_string());

        let first = build_prompt(&req);
        let second = build_prompt(&req.clone());
        assert_eq!(first, second);
        assert_eq!(first.user.as_bytes(), second.user.as_bytes());
    }

    #[test]
    fn test_context_block_orders_present_fields_only() {
        let mut req = request(ContentType::LearningPage);
        req.context.grade = Some("5".to_string());
        req.context.country = Some("X".to_string());

        let prompt = build_prompt(&req).user;
        let country = prompt.find("Country: X").expect("country line");
        let grade = prompt.find("Grade Level: 5").expect("grade line");

        assert!(prompt.contains("Context:\nCountry: X\nGrade Level: 5"));
        assert!(country < grade);
        assert!(!prompt.contains("State/Location:"));
        assert!(!prompt.contains("School Type:"));
    }

    #[test]
    fn test_full_context_uses_fixed_order() {
        let mut req = request(ContentType::Exercise);
        req.context.grade = Some("7".to_string());
        req.context.school_type = Some("Gymnasium".to_string());
        req.context.state = Some("Bavaria".to_string());
        req.context.country = Some("Germany".to_string());

        let prompt = build_prompt(&req).user;
        assert!(prompt.contains(
            "Context:\nCountry: Germany\nState/Location: Bavaria\nSchool Type: Gymnasium\nGrade Level: 7"
        ));
    }

    #[test]
    fn test_no_context_block_without_context() {
        let prompt = build_prompt(&request(ContentType::LearningPage)).user;
        assert!(!prompt.contains("Context:"));
    }

    #[test]
    fn test_context_comes_before_type_body() {
        let mut req = request(ContentType::LearningPage);
        req.context.state = Some("Tyrol".to_string());

        let prompt = build_prompt(&req).user;
        let context = prompt.find("Context:").unwrap();
        let include = prompt.find("Include:").unwrap();
        assert!(context < include);
    }

    #[test]
    fn test_exercise_forbids_solution() {
        let prompt = build_prompt(&request(ContentType::Exercise)).user;
        assert!(prompt.contains("DO NOT include the solution"));
        assert!(!prompt.contains("Step-by-step solution"));
    }

    #[test]
    fn test_exercise_with_solution_requires_steps() {
        let prompt = build_prompt(&request(ContentType::ExerciseWithSolution)).user;
        assert!(prompt.contains("Step-by-step solution path"));
        assert!(prompt.contains("Key concepts and reasoning"));
        assert!(prompt.contains("complete solution path about \"Quadratic equations\""));
    }

    #[test]
    fn test_learning_page_requires_explanations() {
        let prompt = build_prompt(&request(ContentType::LearningPage)).user;
        assert!(prompt.contains("- Clear explanations"));
        assert!(prompt.contains("- Key concepts"));
        assert!(prompt.contains("- Examples"));
        assert!(prompt.contains("Difficulty level: medium."));
    }

    #[test]
    fn test_every_template_carries_formatting_contract() {
        for content_type in ContentType::ALL {
            let prompt = build_prompt(&request(content_type)).user;
            assert!(prompt.contains("NO code blocks"));
            assert!(prompt.contains(r"Display math (centered): \[ formula \]"));
            assert!(prompt.contains(r"Inline math (in text): \( formula \)"));
            assert!(prompt.contains("DO NOT use $ or $$"));
            assert!(prompt.contains(r"write \[ not \\["));
            assert!(prompt.contains("Write the ENTIRE response in English"));
        }
    }

    #[test]
    fn test_rules_are_numbered_consecutively() {
        let prompt = build_prompt(&request(ContentType::Exercise)).user;
        assert!(prompt.contains("\n4. DO NOT use $ or $$"));
        assert!(prompt.contains("\n5. DO NOT escape the backslashes"));
        assert!(prompt.contains("\n6. LANGUAGE:"));

        let prompt = build_prompt(&request(ContentType::LearningPage)).user;
        assert!(prompt.contains("\n4. Example: The quadratic formula"));
        assert!(prompt.contains("\n7. LANGUAGE:"));
    }

    #[test]
    fn test_language_is_injected() {
        let mut req = request(ContentType::Exercise);
        req.language = "Deutsch".to_string();

        let prompt = build_prompt(&req).user;
        assert!(prompt.contains("Write the ENTIRE response in Deutsch"));
    }

    #[test]
    fn test_custom_prompt_is_appended_last() {
        let mut req = request(ContentType::LearningPage);
        req.custom_prompt = Some("Skip the summary and add a quiz".to_string());

        let prompt = build_prompt(&req).user;
        assert!(prompt.ends_with(
            "\n\nAdditional instructions: Skip the summary and add a quiz"
        ));
    }

    #[test]
    fn test_blank_custom_prompt_is_ignored() {
        let mut req = request(ContentType::LearningPage);
        req.custom_prompt = Some("   ".to_string());

        let prompt = build_prompt(&req).user;
        assert!(!prompt.contains("Additional instructions"));
    }

    #[test]
    fn test_provider_does_not_affect_prompt() {
        let openai = request(ContentType::Exercise);
        let mut mistral = openai.clone();
        mistral.provider = ProviderKind::Mistral;

        assert_eq!(build_prompt(&openai), build_prompt(&mistral));
    }
}
