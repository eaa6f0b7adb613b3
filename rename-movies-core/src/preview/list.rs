use super::display_name;
use crate::plan::RenamePlan;
use nu_ansi_term::Color;
use std::fmt::Write;

/// One `source -> target` line per entry, file names only.
pub fn render_list(plan: &RenamePlan, use_color: bool) -> String {
    let mut out = String::new();

    for entry in plan.entries() {
        let from = display_name(&entry.source);
        let to = display_name(&entry.target);
        if use_color {
            let _ = writeln!(out, "{} -> {}", Color::Red.paint(from), Color::Green.paint(to));
        } else {
            let _ = writeln!(out, "{from} -> {to}");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_list_plain() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("IMG_1.mp4");
        let b = temp_dir.path().join("IMG_2.mp4");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();
        let mut plan = RenamePlan::new();
        plan.push(&a, "Cat Nap.mp4").unwrap();
        plan.push(&b, "Cat Nap.mp4").unwrap();

        assert_eq!(
            render_list(&plan, false),
            "IMG_1.mp4 -> Cat Nap.mp4\nIMG_2.mp4 -> Cat Nap-1.mp4\n"
        );
    }

    #[test]
    fn test_render_list_colored() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("IMG_1.mp4");
        fs::write(&a, "").unwrap();
        let mut plan = RenamePlan::new();
        plan.push(&a, "Cat Nap.mp4").unwrap();

        let out = render_list(&plan, true);
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("Cat Nap.mp4"));
    }
}
