//! # Error Suggestions
//!
//! Helpers for error messages that say what went wrong AND how to fix it.
//!
//! ```rust,ignore
//! use wildintel_tools::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Data path not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::data_path_not_found(path));
//! ```

use std::path::Path;

use crate::media::Extension;

/// Error for a settings file named with `--config` that does not exist.
pub fn settings_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Settings file not found: {path}\n\n\
         hint: Run 'wildintel-tools config init' to create the project settings\n\
         hint: Use --config to point at a different file\n\
         hint: Unset WILDINTEL_CONFIG to use the per-project default",
        path = path.display()
    )
}

/// Error for a data root that does not exist or is not a directory.
pub fn data_path_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Data path not found: {path}\n\n\
         hint: Pass the directory that contains the collection folders (e.g. R0001)\n\
         hint: Set data_dir in the [general] settings section to use a default",
        path = path.display()
    )
}

/// Error for a missing data path when no default is configured either.
pub fn data_path_required() -> anyhow::Error {
    anyhow::anyhow!(
        "No data path given\n\n\
         hint: Pass the data directory as the first argument\n\
         hint: Or set data_dir in the [general] settings section"
    )
}

/// Error for an unknown media extension, suggesting the closest known one.
pub fn unknown_extension(name: &str) -> anyhow::Error {
    let known: Vec<&str> = Extension::all().iter().map(|e| e.as_str()).collect();
    let normalized = name.trim().trim_start_matches('.').to_ascii_lowercase();

    let did_you_mean = find_similar(&normalized, &known)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "Unknown media extension: {name}{did_you_mean}\n\n\
         Supported extensions are: {exts}",
        exts = known.join(", ")
    )
}

/// Error returned when a command's report ends in `failed` or `partial`.
pub fn report_has_errors(status: &str, errors: usize, report_path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Finished with status '{status}' ({errors} errors)\n\n\
         hint: The full list is in {path}",
        path = report_path.display()
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            (distance <= 2 && distance < input.len()).then_some((candidate, distance))
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }

    previous[b_chars.len()]
}
