use anyhow::Context;
use camino::Utf8Path;
use walkdir::WalkDir;

/// Copy `<templates>/<checkId>` to `<output>/<checkId>` for every check id.
///
/// A check without a template directory is an error.
pub fn copy_check_templates(
    templates: &Utf8Path,
    output: &Utf8Path,
    check_ids: &[&str],
) -> anyhow::Result<()> {
    for check_id in check_ids {
        let src = templates.join(check_id);
        let dst = output.join(check_id);
        copy_dir(&src, &dst).with_context(|| format!("copy template {src} to {dst}"))?;
    }
    Ok(())
}

fn copy_dir(src: &Utf8Path, dst: &Utf8Path) -> anyhow::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dst.as_std_path().join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("create directory: {}", target.display()))?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("copy file: {}", entry.path().display()))?;
        }
    }
    Ok(())
}
