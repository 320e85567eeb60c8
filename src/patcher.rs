//! Patch orchestration: load script, load template, update, write

use log::debug;
use std::path::{Path, PathBuf};

use crate::report::Reporter;
use crate::script::load_script;
use crate::template::{TargetKey, Template};
use crate::PatchError;

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Template was written to `output`
    Written { output: PathBuf, bytes: usize },
    /// Dry run: the serialized document that would have been written
    Preview(Vec<u8>),
}

/// One script-into-template patch
#[derive(Debug, Clone)]
pub struct PatchJob {
    pub script: PathBuf,
    pub template: PathBuf,
    /// Defaults to `template` (in-place update)
    pub output: PathBuf,
    pub target: TargetKey,
    pub indent: usize,
    pub dry_run: bool,
}

impl PatchJob {
    /// Create a job that patches `template` in place
    pub fn new(script: impl Into<PathBuf>, template: impl Into<PathBuf>, target: TargetKey) -> Self {
        let template = template.into();
        Self {
            script: script.into(),
            output: template.clone(),
            template,
            target,
            indent: crate::DEFAULT_INDENT,
            dry_run: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// Nothing is written unless the script and template load and the target
    /// key exists. The template is fully read before the output is opened, so
    /// `output` may equal `template`.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<PatchOutcome, PatchError> {
        debug!("Running patch job: {:?}", self);

        reporter.step(&format!("Reading script from: {}", self.script.display()));
        let body = load_script(&self.script)?;

        reporter.step(&format!("Reading template from: {}", self.template.display()));
        let mut template = Template::load(&self.template)?;

        reporter.step(&format!("Updating {} variable...", self.target.key));
        if let Err(e) = template.apply_update(&self.target, &body) {
            reporter.failure(&format!(
                "Could not find {} in template {}",
                self.target.key, self.target.section
            ));
            return Err(e);
        }
        reporter.success(&format!("Updated {}", self.target.key));

        if self.dry_run {
            debug!("Dry run, skipping write to {}", self.output.display());
            return Ok(PatchOutcome::Preview(template.to_pretty_bytes(self.indent)?));
        }

        self.write(&template, &self.output, reporter)
    }

    fn write(&self, template: &Template, output: &Path, reporter: &mut dyn Reporter) -> Result<PatchOutcome, PatchError> {
        reporter.step(&format!("Writing updated template to: {}", output.display()));
        let bytes = template.write(output, self.indent)?;
        reporter.success("Template updated successfully");
        Ok(PatchOutcome::Written {
            output: output.to_path_buf(),
            bytes,
        })
    }
}
