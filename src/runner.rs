use anyhow::{Result, bail};
use chrono::Local;

use crate::cli::{Cli, Command, TouchArgs};
use crate::filemaker::{FileMaker, last_segment, strip_extension};
use crate::{meme, project, templates};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Header(args) => handle_header(args),
        Command::Makefile(args) => handle_makefile(args),
        Command::Py(args) => handle_py(args),
        Command::Project(args) => handle_project(args),
        Command::Meme(args) => meme::run(args),
    }
}

fn require_files(args: &TouchArgs) -> Result<()> {
    if args.files.is_empty() {
        bail!("no FILE arguments given; see --help");
    }
    Ok(())
}

fn handle_header(args: TouchArgs) -> Result<()> {
    require_files(&args)?;

    let mut maker = FileMaker::new("header", ".h");
    for file in &args.files {
        let name = strip_extension(file, ".h");
        maker.create(name, &templates::header(name)?)?;
    }
    maker.finish(args.verbose);
    Ok(())
}

fn handle_makefile(args: TouchArgs) -> Result<()> {
    require_files(&args)?;

    // The output file is literally `Makefile`; the argument only names
    // the build target.
    let mut maker = FileMaker::new("makefile", "");
    for file in &args.files {
        let target = last_segment(file);
        maker.create("Makefile", &templates::makefile(target)?)?;
    }
    maker.finish(args.verbose);
    Ok(())
}

fn handle_py(args: TouchArgs) -> Result<()> {
    require_files(&args)?;

    let today = Local::now();
    let date = today.format("%d/%m/%Y").to_string();
    let year = today.format("%Y").to_string();

    let mut maker = FileMaker::new("py", ".py");
    for file in &args.files {
        let name = last_segment(strip_extension(file, ".py"));
        maker.create(file, &templates::python_stub(name, &date, &year)?)?;
    }
    maker.finish(args.verbose);
    Ok(())
}

fn handle_project(args: TouchArgs) -> Result<()> {
    require_files(&args)?;
    project::create_projects(&args.files, args.verbose)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;
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

    fn touch_args(files: Vec<String>) -> TouchArgs {
        TouchArgs {
            verbose: false,
            files,
        }
    }

    #[test]
    fn touch_commands_require_file_arguments() {
        assert!(handle_header(touch_args(vec![])).is_err());
        assert!(handle_py(touch_args(vec![])).is_err());
        assert!(handle_project(touch_args(vec![])).is_err());
    }

    #[test]
    fn header_command_produces_guarded_header() {
        let root = unique_temp_dir();
        fs::create_dir_all(&root).unwrap();
        let name = root.join("foo");

        handle_header(touch_args(vec![name.to_string()])).unwrap();

        let body = fs::read_to_string(root.join("foo.h")).unwrap();
        assert_eq!(body, templates::header(name.as_str()).unwrap());
        assert!(body.ends_with("\n\n#endif\n"));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn header_command_does_not_double_extensions() {
        let root = unique_temp_dir();
        fs::create_dir_all(&root).unwrap();
        let name = root.join("bar.h");

        handle_header(touch_args(vec![name.to_string()])).unwrap();

        assert!(root.join("bar.h").exists());
        assert!(!root.join("bar.h.h").exists());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn py_command_documents_the_bare_module_name() {
        let root = unique_temp_dir();
        fs::create_dir_all(&root).unwrap();
        let name = root.join("widget.py");

        handle_py(touch_args(vec![name.to_string()])).unwrap();

        let body = fs::read_to_string(root.join("widget.py")).unwrap();
        assert!(body.starts_with("# -*- coding: utf-8 -*-\n\"\"\"\nwidget\n"));
        assert!(body.contains(&Local::now().format("%Y").to_string()));

        let _ = fs::remove_dir_all(&root);
    }
}
