use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};

/// Per-run record of created and rejected paths, read once for the summary.
#[derive(Debug, Default)]
pub struct RunReport {
    successes: Vec<Utf8PathBuf>,
    failures: Vec<Utf8PathBuf>,
}

impl RunReport {
    pub fn record_success(&mut self, path: Utf8PathBuf) {
        self.successes.push(path);
    }

    pub fn record_failure(&mut self, path: Utf8PathBuf) {
        self.failures.push(path);
    }

    pub fn successes(&self) -> &[Utf8PathBuf] {
        &self.successes
    }

    pub fn failures(&self) -> &[Utf8PathBuf] {
        &self.failures
    }

    /// Print the end-of-run summary. Never touches the file system.
    pub fn print(&self, tool: &str, verbose: bool) {
        println!("{}: {} file(s) created.", tool, self.successes.len());
        if verbose {
            for (idx, path) in self.successes.iter().enumerate() {
                println!("  {}. {}", idx + 1, path);
            }
        }

        if !self.failures.is_empty() {
            println!(
                "There were {} files that could not be created:",
                self.failures.len()
            );
            for (idx, path) in self.failures.iter().enumerate() {
                println!("  {}. {}", idx + 1, path);
            }
        }
    }
}

/// Writes rendered template bodies to disk behind an overwrite check and
/// accumulates the outcome of every requested name for the final summary.
pub struct FileMaker {
    tool: &'static str,
    extension: &'static str,
    report: RunReport,
}

impl FileMaker {
    pub fn new(tool: &'static str, extension: &'static str) -> Self {
        Self {
            tool,
            extension,
            report: RunReport::default(),
        }
    }

    /// Write `body` to `name + extension`, prompting before overwriting.
    ///
    /// I/O errors are reported and recorded as failures; they never
    /// propagate past this boundary. Only an unresolvable prompt errors.
    pub fn create(&mut self, name: &str, body: &str) -> Result<()> {
        self.create_with(name, body, |path| confirm_overwrite(path, None))
    }

    fn create_with(
        &mut self,
        name: &str,
        body: &str,
        confirm: impl Fn(&Utf8Path) -> Result<bool>,
    ) -> Result<()> {
        let Some(cleaned) = self.clean(name, confirm)? else {
            return Ok(());
        };

        let target = Utf8PathBuf::from(format!("{cleaned}{}", self.extension));
        match fs::write(&target, body) {
            Ok(()) => {
                tracing::debug!(tool = self.tool, %target, "file written");
                self.report.record_success(target);
            }
            Err(err) => {
                println!("[{}] Error: {}: {}", self.tool, target, err);
                self.report.record_failure(target);
            }
        }
        Ok(())
    }

    /// Resolve `name` to a writable, extension-free target.
    ///
    /// Returns `None` (with a failure recorded) when the target is a
    /// directory or the operator declines to overwrite.
    fn clean(
        &mut self,
        name: &str,
        confirm: impl Fn(&Utf8Path) -> Result<bool>,
    ) -> Result<Option<String>> {
        let path = Utf8Path::new(name);
        let qualified = Utf8PathBuf::from(format!("{name}{}", self.extension));

        if path.is_dir() {
            println!(
                "{}: {} is a directory, please provide a name for the file.",
                self.tool, path
            );
            self.report.record_failure(path.to_owned());
            return Ok(None);
        }

        if (path.exists() || qualified.exists()) && !confirm(path)? {
            self.report.record_failure(path.to_owned());
            return Ok(None);
        }

        Ok(Some(strip_extension(name, self.extension).to_owned()))
    }

    /// Print the run summary, consuming the maker.
    pub fn finish(self, verbose: bool) {
        self.report.print(self.tool, verbose);
    }

    #[cfg(test)]
    fn report(&self) -> &RunReport {
        &self.report
    }
}

/// Strip `extension` as a trailing suffix only, so a name that merely
/// contains it elsewhere (`my.py.backup.py`) is left intact.
pub fn strip_extension<'a>(name: &'a str, extension: &str) -> &'a str {
    if extension.is_empty() {
        return name;
    }
    name.strip_suffix(extension).unwrap_or(name)
}

/// Last `/`-separated segment of a name, used for README titles and
/// Makefile targets.
pub fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Blocking yes/no gate shown before replacing an existing target.
///
/// Loops until the operator answers; unrecognized input requires an
/// acknowledgement keypress before re-prompting.
pub fn confirm_overwrite(target: &Utf8Path, warning: Option<&str>) -> Result<bool> {
    loop {
        println!("{target} already exists.");
        println!("Would you like to overwrite it?");
        if let Some(warning) = warning {
            println!("{warning}");
        }

        let response = prompt("[Y]es or [N]o: ")?;
        match response.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => {
                println!("{other} is not recognized.");
                prompt("Press [enter] to continue")?;
            }
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout()
        .flush()
        .with_context(|| format!("writing prompt `{label}`"))?;
    let mut buf = String::new();
    let read = io::stdin()
        .read_line(&mut buf)
        .with_context(|| format!("reading input for `{label}`"))?;
    if read == 0 {
        bail!("input closed while waiting for `{label}`");
    }
    Ok(buf.trim_end_matches(['\n', '\r']).to_owned())
}
