use crate::llm::generate::{GenerationParams, TextGenerator};

/// Returned verbatim whenever the generation service cannot produce an analysis.
pub const ANALYSIS_FALLBACK: &str = "Failed to analyze code. Please try again later.";

const ANALYZE_PARAMS: GenerationParams = GenerationParams {
    max_new_tokens: 200,
    temperature: 0.2,
    top_p: 0.9,
};

/// Explain a code snippet in plain language.
///
/// Never fails: any generation error yields [`ANALYSIS_FALLBACK`].
pub async fn analyze_code(generator: &dyn TextGenerator, code: &str, language: &str) -> String {
    let prompt = build_prompt(code, language);

    match generator.generate(&prompt, ANALYZE_PARAMS).await {
        Ok(analysis) => analysis.trim().to_string(),
        Err(e) => {
            tracing::warn!("Code analysis failed: {e}");
            ANALYSIS_FALLBACK.to_string()
        }
    }
}

fn build_prompt(code: &str, language: &str) -> String {
    format!(
        "Analyze this {language} code and provide a concise explanation of:\n\
         1. What the code does\n\
         2. Key algorithms or patterns used\n\
         3. Potential improvements or best practices\n\
         \n\
         Code to analyze:\n\
         ```{language}\n\
         {code}\n\
         ```\n\
         \n\
         Provide the analysis in a clear, concise format."
    )
}
