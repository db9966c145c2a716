use shelf_core::AppViewModel;

const EMPTY_HINT: &str = "No files staged. Enter tab-separated paths to stage them, :clear or :quit.";

/// Console rendering of the whole list.
pub fn render(view: &AppViewModel) -> String {
    if view.rows.is_empty() {
        return format!("{EMPTY_HINT}\n");
    }
    let mut out = format!("Staged files ({}):\n", view.rows.len());
    for line in view.lines() {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}
