/// Builds the natural-language request sent to the model. `naming_format` is
/// passed through verbatim as guidance; nothing here parses it.
pub fn build_prompt(url: &str, original_filename: &str, naming_format: &str) -> String {
    format!(
        "Suggest a clear, descriptive filename for a file downloaded from {url} \
         with original name {original_filename}. Follow format: {naming_format}"
    )
}
