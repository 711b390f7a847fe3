use crate::error::Mutect2Error;
use crate::logic::invoke::Invocation;
use std::io::Write;
use std::path::PathBuf;

pub const MUTECT2_TOOL_NAME: &str = "Mutect2";
pub const DEFAULT_GATK_PATH: &str = "gatk";

/// Translate an option key into GATK argument syntax.
///
/// `native_pair_hmm_threads` and `native-pair-hmm-threads` both become
/// `--native-pair-hmm-threads`.
pub fn key_to_flag(key: &str) -> String {
    format!("--{}", key.trim_start_matches('-').replace('_', "-"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    Value(String),
    Values(Vec<String>),
}

/// Ordered set of GATK tool options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOptions {
    options: Vec<(String, OptionValue)>,
}

impl ToolOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(&mut self, key: &str, enabled: bool) -> &mut Self {
        self.options.push((key.to_string(), OptionValue::Flag(enabled)));
        self
    }

    pub fn value<T: ToString>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.options.push((key.to_string(), OptionValue::Value(value.to_string())));
        }
        self
    }

    pub fn values<T: ToString>(&mut self, key: &str, values: &[T]) -> &mut Self {
        if !values.is_empty() {
            self.options.push((
                key.to_string(),
                OptionValue::Values(values.iter().map(|x| x.to_string()).collect()),
            ));
        }
        self
    }

    /// One entry per GATK argument, each as it would appear on a single line
    /// of an arguments file (`--flag` or `--key value`).
    pub fn argument_lines(&self) -> Vec<Vec<String>> {
        let mut lines = Vec::new();
        for (key, value) in &self.options {
            match value {
                OptionValue::Flag(true) => lines.push(vec![key_to_flag(key)]),
                OptionValue::Flag(false) => (),
                OptionValue::Value(v) => lines.push(vec![key_to_flag(key), v.clone()]),
                OptionValue::Values(values) => {
                    for v in values {
                        lines.push(vec![key_to_flag(key), v.clone()]);
                    }
                }
            }
        }
        lines
    }

    pub fn to_args(&self) -> Vec<String> {
        self.argument_lines().into_iter().flatten().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.argument_lines().is_empty()
    }

    pub fn write_arguments_file<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for line in self.argument_lines() {
            writeln!(writer, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutect2Request {
    pub gatk_path: String,
    pub java_heap: Option<String>,
    pub reference: String,
    pub inputs: Vec<String>,
    pub output: String,
    pub intervals: Vec<String>,
    pub f1r2_tar_gz: Option<String>,
    pub bam_output: Option<String>,
    pub tool_options: ToolOptions,
    pub arguments_file: Option<PathBuf>,
    pub passthrough: Vec<String>,
    pub working_directory: Option<PathBuf>,
}

impl Mutect2Request {
    pub fn new(reference: &str, inputs: &[&str], output: &str) -> Self {
        Mutect2Request {
            gatk_path: DEFAULT_GATK_PATH.to_string(),
            java_heap: None,
            reference: reference.to_string(),
            inputs: inputs.iter().map(|x| x.to_string()).collect(),
            output: output.to_string(),
            intervals: Vec::new(),
            f1r2_tar_gz: None,
            bam_output: None,
            tool_options: ToolOptions::new(),
            arguments_file: None,
            passthrough: Vec::new(),
            working_directory: None,
        }
    }

    pub fn validate(&self) -> Result<(), Mutect2Error> {
        if self.gatk_path.trim().is_empty() {
            return Err(Mutect2Error::MissingArgument("gatk4-path"));
        }
        if self.reference.trim().is_empty() {
            return Err(Mutect2Error::MissingArgument("reference"));
        }
        if self.inputs.is_empty() || self.inputs.iter().any(|x| x.trim().is_empty()) {
            return Err(Mutect2Error::MissingArgument("input"));
        }
        if self.output.trim().is_empty() {
            return Err(Mutect2Error::MissingArgument("output"));
        }
        if matches!(&self.java_heap, Some(x) if x.trim().is_empty()) {
            return Err(Mutect2Error::MissingArgument("java-heap"));
        }
        Ok(())
    }

    /// Full argument vector; the first element is the GATK binary.
    pub fn build_args(&self) -> Result<Vec<String>, Mutect2Error> {
        self.validate()?;

        let mut args = vec![self.gatk_path.clone()];
        if let Some(java_heap) = self.java_heap.as_deref() {
            args.push("--java-options".to_string());
            args.push(format!("-XX:+UseSerialGC -Xmx{}", java_heap));
        }
        args.push(MUTECT2_TOOL_NAME.to_string());
        args.push("--reference".to_string());
        args.push(self.reference.clone());
        for input in &self.inputs {
            args.push("--input".to_string());
            args.push(input.clone());
        }
        args.push("--output".to_string());
        args.push(self.output.clone());
        for interval in &self.intervals {
            args.push("--intervals".to_string());
            args.push(interval.clone());
        }
        if let Some(f1r2) = self.f1r2_tar_gz.as_ref() {
            args.push("--f1r2-tar-gz".to_string());
            args.push(f1r2.clone());
        }
        if let Some(bam_output) = self.bam_output.as_ref() {
            args.push("--bam-output".to_string());
            args.push(bam_output.clone());
        }
        if let Some(arguments_file) = self.arguments_file_path()? {
            if !self.tool_options.is_empty() {
                args.push("--arguments_file".to_string());
                args.push(arguments_file.display().to_string());
            }
        } else {
            args.extend(self.tool_options.to_args());
        }
        args.extend(self.passthrough.iter().cloned());
        Ok(args)
    }

    /// Arguments file resolved against the current directory, so GATK finds
    /// it even when started in another working directory.
    pub fn arguments_file_path(&self) -> Result<Option<PathBuf>, Mutect2Error> {
        match self.arguments_file.as_ref() {
            Some(path) if path.is_relative() => Ok(Some(std::env::current_dir()?.join(path))),
            Some(path) => Ok(Some(path.clone())),
            None => Ok(None),
        }
    }

    /// Write tool options to the configured arguments file, if any.
    pub fn write_arguments_file(&self) -> Result<(), Mutect2Error> {
        if let Some(path) = self.arguments_file_path()? {
            if !self.tool_options.is_empty() {
                let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
                self.tool_options.write_arguments_file(&mut writer)?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    pub fn invocation(&self) -> Result<Invocation, Mutect2Error> {
        let mut invocation = Invocation::from_argv(self.build_args()?)?;
        if let Some(dir) = self.working_directory.as_ref() {
            invocation.current_dir(dir);
        }
        Ok(invocation)
    }
}
