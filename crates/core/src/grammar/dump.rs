use super::parser::ParseResult;

/// Serialize a parse result (document, commands, diagnostics) to pretty JSON.
pub fn to_pretty_json(result: &ParseResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
