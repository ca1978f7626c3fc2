use crate::llm::generate::{GenerationParams, TextGenerator};

/// Languages recognised in a free-form query, in match priority order.
const KNOWN_LANGUAGES: &[&str] = &["python", "javascript", "java", "cpp", "typescript"];

const DEFAULT_LANGUAGE: &str = "python";
const DEFAULT_EXTENSION: &str = "py";

/// Short, near-deterministic completions: the output is one search line.
const ENHANCE_PARAMS: GenerationParams = GenerationParams {
    max_new_tokens: 30,
    temperature: 0.1,
    top_p: 0.9,
};

/// Turn a free-form description into a GitHub code search expression.
///
/// Always returns a query containing a `language:` qualifier. Generation
/// failures and unusable completions fall back to a locally built query.
pub async fn enhance_query(generator: &dyn TextGenerator, user_query: &str) -> String {
    let prompt = build_prompt(user_query);

    let enhanced = match generator.generate(&prompt, ENHANCE_PARAMS).await {
        Ok(generated) => {
            let cleaned = clean_generated_query(&generated);
            if cleaned.contains("language:") {
                cleaned
            } else {
                tracing::debug!("Generated query lacks a language qualifier: {cleaned:?}");
                language_fallback(user_query)
            }
        }
        Err(e) => {
            tracing::warn!("Query enhancement failed, using fallback: {e}");
            failure_fallback(user_query)
        }
    };

    tracing::info!("Original search query: {user_query}");
    tracing::info!("Enhanced search query: {enhanced}");
    enhanced
}

fn build_prompt(user_query: &str) -> String {
    format!(
        "Create a GitHub code search query for: \"{user_query}\"\n\
         Format: [keywords] language:[lang] filename:*.[ext]\n\
         Examples:\n\
         - \"merge sort implementation\" language:python filename:*.py\n\
         - \"binary tree traversal\" language:javascript filename:*.js\n\
         Response:"
    )
}

/// First line, surrounding quotes and any `Response:` label removed.
fn clean_generated_query(generated: &str) -> String {
    let first_line = generated.trim().lines().next().unwrap_or_default();

    let unquoted = first_line
        .strip_prefix(['"', '\''])
        .unwrap_or(first_line);
    let unquoted = unquoted.strip_suffix(['"', '\'']).unwrap_or(unquoted);

    strip_response_label(unquoted).trim().to_string()
}

fn strip_response_label(text: &str) -> &str {
    let trimmed = text.trim_start();
    let label = "response";
    match trimmed.get(..label.len()) {
        Some(head) if head.eq_ignore_ascii_case(label) => {
            let rest = &trimmed[label.len()..];
            rest.strip_prefix(':').unwrap_or(rest).trim_start()
        }
        _ => text,
    }
}

/// Leftmost whole-word, case-insensitive mention of a known language.
fn detect_language(user_query: &str) -> Option<&'static str> {
    user_query
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .find_map(|word| {
            KNOWN_LANGUAGES
                .iter()
                .find(|lang| word.eq_ignore_ascii_case(lang))
                .copied()
        })
}

fn language_fallback(user_query: &str) -> String {
    let language = detect_language(user_query).unwrap_or(DEFAULT_LANGUAGE);
    format!("{user_query} language:{language}")
}

fn failure_fallback(user_query: &str) -> String {
    match detect_language(user_query) {
        Some(language) => format!("{user_query} language:{language}"),
        None => format!("{user_query} language:{DEFAULT_LANGUAGE} filename:*.{DEFAULT_EXTENSION}"),
    }
}
