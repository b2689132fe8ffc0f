//! Choosing which files in an addons directory are templates.

/// File extensions recognised as addon templates. Matching is case-sensitive.
pub const TEMPLATE_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Returns `true` when `file_name` ends in a recognised template extension.
///
/// The extension is the text after the last `.` of the final path component,
/// so a bare `.yaml` counts while `notes.yaml.txt` does not.
///
/// # Examples
///
/// ```
/// use addon_merge::is_template_file;
///
/// assert!(is_template_file("bucket.yml"));
/// assert!(!is_template_file("bucket.YAML"));
/// assert!(!is_template_file("README"));
/// ```
#[must_use]
pub fn is_template_file(file_name: &str) -> bool {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    base.rsplit_once('.')
        .is_some_and(|(_, ext)| TEMPLATE_EXTENSIONS.contains(&ext))
}

/// Filter `file_names` down to templates and sort them into processing order.
///
/// Processing order is lexical by file name, which keeps merged output
/// reproducible regardless of directory listing order. An empty result is
/// valid.
///
/// # Examples
///
/// ```
/// use addon_merge::select_template_files;
///
/// let selected = select_template_files(["queue.yml", "notes.txt", "bucket.yaml", "table.json"]);
/// assert_eq!(selected, ["bucket.yaml", "queue.yml"]);
/// ```
#[must_use]
pub fn select_template_files<I, S>(file_names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selected: Vec<String> = file_names
        .into_iter()
        .filter_map(|candidate| {
            let name = candidate.as_ref();
            if is_template_file(name) {
                Some(name.to_owned())
            } else {
                tracing::trace!(file = name, "skipping non-template addon file");
                None
            }
        })
        .collect();
    selected.sort_unstable();
    selected
}
