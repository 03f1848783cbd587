/*!
 * Prompt builders for the translation service.
 *
 * Prompts pair with an assistant priming string that opens a code fence;
 * the model is expected to continue with the payload and close the fence,
 * which is what the reply extraction in `core` relies on.
 */

/// Fence language and priming for template translation requests
pub const TEMPLATE_FENCE: &str = "```jinja2\n";

/// Fence language and priming for plain-text requests
pub const TEXT_FENCE: &str = "```txt\n";

/// Prompt for translating a site template
pub fn template_prompt(filename: &str, target_language: &str) -> String {
    format!(
        "Translate the following Jinja2 HTML template (filename: {filename}) to {target_language}.

CRITICAL RULES:
- Translate ONLY the user-visible text content
- Keep ALL Jinja2 syntax unchanged ({{{{ }}}}, {{% %}}, filters, variables, etc.)
- Keep ALL HTML structure, tags, attributes, and CSS classes unchanged
- Keep ALL URLs, links, and technical identifiers unchanged
- Preserve exact whitespace and formatting
- Output ONLY the translated template with no explanations

Template to translate:"
    )
}

/// Prompt for translating a spot review
pub fn comment_prompt(rating: i64, target_language: &str) -> String {
    format!(
        "This is a review from a website where hitchhikers share experiences \
         on hitchhiking from spots around the world. Translate the following \
         review (rating: {rating}/5) of a hitchhiking location to \
         {target_language}, with no other output:"
    )
}

/// Prompt for detecting the language of a review
pub fn detection_prompt() -> String {
    "Reply with only the two-letter ISO 639-1 language code of the following \
     text, with no other output:"
        .to_string()
}
