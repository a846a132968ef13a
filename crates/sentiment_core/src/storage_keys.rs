pub const INPUT_SUFFIX: &str = ".txt";
pub const OUTPUT_SUFFIX: &str = ".json";

/// Output key for an input key: a trailing `.txt` becomes `.json`.
///
/// Keys without the suffix are returned unchanged, so the result object lands
/// under the same key in the output bucket.
pub fn derive_output_key(input_key: &str) -> String {
    match input_key.strip_suffix(INPUT_SUFFIX) {
        Some(stem) => format!("{stem}{OUTPUT_SUFFIX}"),
        None => input_key.to_string(),
    }
}
