//! Prompt Builder

use crate::types::SystemContext;

/// Compose the single prompt sent to the model.
pub fn build_prompt(query: &str, context: &SystemContext) -> String {
    format!(
        "You are a Linux automation assistant.\n\
         The user's query is: \"{query}\".\n\
         Local system context: {context}.\n\
         Your task is to generate a JSON array containing one or more objects.\n\
         Each object MUST have exactly one key \"command\" whose value is a single, simple, \
         executable shell command that accomplishes the query on the {os} system using {pm}.\n\
         Do not output any extra keys, commentary, markdown, or escape characters.\n\
         Output exactly and only a valid JSON array.",
        query = query,
        context = context,
        os = context.os_name,
        pm = context.package_manager,
    )
}
