use std::fs;

use anyhow::{Context, Result};
use camino::Utf8Path;

use crate::filemaker::{RunReport, confirm_overwrite, last_segment};
use crate::templates;

const OVERWRITE_NOTE: &str = "[NOTE!] This will delete the folder and it's contents.";

/// Create a C project skeleton for every requested name.
///
/// An existing project directory is wiped and recreated only after the
/// operator confirms; declines and I/O errors are recorded and the batch
/// moves on to the next name.
pub fn create_projects(names: &[String], verbose: bool) -> Result<()> {
    let mut report = RunReport::default();
    for name in names {
        create_project(name, &mut report, |path| {
            confirm_overwrite(path, Some(OVERWRITE_NOTE))
        })?;
    }
    report.print("project", verbose);
    Ok(())
}

fn create_project(
    name: &str,
    report: &mut RunReport,
    confirm: impl Fn(&Utf8Path) -> Result<bool>,
) -> Result<()> {
    let root = Utf8Path::new(name);

    if root.is_dir() {
        if !confirm(root)? {
            report.record_failure(root.to_owned());
            return Ok(());
        }
        if let Err(err) = fs::remove_dir_all(root) {
            println!("[project] Error: {root}: {err}");
            report.record_failure(root.to_owned());
            return Ok(());
        }
    }

    match build_skeleton(root) {
        Ok(()) => {
            tracing::debug!(%root, "project skeleton created");
            report.record_success(root.to_owned());
        }
        Err(err) => {
            println!("[project] Error: {root}: {err:#}");
            report.record_failure(root.to_owned());
        }
    }
    Ok(())
}

/// Lay down the directory tree plus README, main source and Makefile.
fn build_skeleton(root: &Utf8Path) -> Result<()> {
    for sub in ["lib", "include", "src"] {
        let dir = root.join(sub);
        fs::create_dir_all(&dir).with_context(|| format!("creating directory {dir}"))?;
    }

    let title = last_segment(root.as_str());

    let readme = root.join("README.md");
    fs::write(&readme, format!("# {title}")).with_context(|| format!("writing {readme}"))?;

    let main_src = root.join("src").join("main.c");
    fs::write(&main_src, "").with_context(|| format!("writing {main_src}"))?;

    let makefile = root.join("Makefile");
    fs::write(&makefile, templates::makefile(title)?)
        .with_context(|| format!("writing {makefile}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> Utf8PathBuf {
        let mut dir = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        dir.push(format!("touchkit-test-{ts}"));
        Utf8PathBuf::from_path_buf(dir).unwrap()
    }

    #[test]
    fn skeleton_matches_expected_tree() {
        let root = unique_temp_dir();
        fs::create_dir_all(&root).unwrap();
        let project = root.join("demo");

        let mut report = RunReport::default();
        create_project(project.as_str(), &mut report, |_| {
            panic!("fresh project must not prompt")
        })
        .unwrap();

        assert!(project.join("lib").is_dir());
        assert!(project.join("include").is_dir());
        assert!(project.join("src").is_dir());
        assert_eq!(
            fs::read_to_string(project.join("README.md")).unwrap(),
            "# demo"
        );
        assert_eq!(
            fs::read_to_string(project.join("src").join("main.c")).unwrap(),
            ""
        );
        let makefile = fs::read_to_string(project.join("Makefile")).unwrap();
        assert!(makefile.starts_with("TARGET = demo\n"));

        assert_eq!(report.successes(), [project]);
        assert!(report.failures().is_empty());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn declined_overwrite_keeps_existing_directory() {
        let root = unique_temp_dir();
        let project = root.join("demo");
        fs::create_dir_all(&project).unwrap();
        let marker = project.join("precious.txt");
        fs::write(&marker, "keep me").unwrap();

        let mut report = RunReport::default();
        create_project(project.as_str(), &mut report, |_| Ok(false)).unwrap();

        assert_eq!(fs::read_to_string(&marker).unwrap(), "keep me");
        assert!(!project.join("Makefile").exists());
        assert_eq!(report.failures(), [project]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn confirmed_overwrite_recreates_directory() {
        let root = unique_temp_dir();
        let project = root.join("demo");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("stale.txt"), "old").unwrap();

        let mut report = RunReport::default();
        create_project(project.as_str(), &mut report, |_| Ok(true)).unwrap();

        assert!(!project.join("stale.txt").exists());
        assert!(project.join("Makefile").exists());
        assert_eq!(report.successes(), [project]);

        let _ = fs::remove_dir_all(&root);
    }
}
