use crate::error::Mutect2Error;
use log::{debug, info};
use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Number of stderr lines kept for error reports.
pub const STDERR_TAIL_LINES: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stderr_tail: Vec<String>,
}

impl Invocation {
    pub fn new(program: &str) -> Self {
        Invocation {
            program: program.to_string(),
            args: Vec::new(),
            working_dir: None,
            envs: Vec::new(),
        }
    }

    /// Build from a full argument vector whose first element is the program.
    pub fn from_argv(argv: Vec<String>) -> Result<Self, Mutect2Error> {
        let mut argv = argv.into_iter();
        let program = argv
            .next()
            .filter(|x| !x.trim().is_empty())
            .ok_or(Mutect2Error::MissingArgument("program"))?;
        let mut invocation = Invocation::new(&program);
        invocation.args.extend(argv);
        Ok(invocation)
    }

    pub fn arg(&mut self, arg: &str) -> &mut Self {
        self.args.push(arg.to_string());
        self
    }

    pub fn current_dir(&mut self, dir: &Path) -> &mut Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Human readable command line. Arguments containing whitespace are quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|x| {
                if x.is_empty() || x.contains(char::is_whitespace) || x.contains('"') {
                    format!("\"{}\"", x.replace('\\', "\\\\").replace('"', "\\\""))
                } else {
                    x.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Launch the program and block until it exits.
    ///
    /// Standard output is inherited. Standard error is forwarded to the log
    /// line by line and its last lines are kept for the error report.
    pub fn run(&self) -> Result<ProcessOutput, Mutect2Error> {
        if let Some(dir) = self.working_dir.as_ref() {
            if !dir.is_dir() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Working directory does not exist: {}", dir.display()),
                )
                .into());
            }
        }

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        if let Some(dir) = self.working_dir.as_ref() {
            command.current_dir(dir);
        }
        for (key, value) in &self.envs {
            command.env(key, value);
        }

        info!("Running: {}", self.command_line());
        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Mutect2Error::BinaryNotFound(self.program.clone())
            } else {
                e.into()
            }
        })?;

        let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
        if let Some(stderr) = child.stderr.take() {
            let mut reader = BufReader::new(stderr);
            let mut line = Vec::new();
            while reader.read_until(b'\n', &mut line)? > 0 {
                let text = String::from_utf8_lossy(&line).trim_end().to_string();
                info!("[{}] {}", self.program, text);
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(text);
                line.clear();
            }
        }

        let status = child.wait()?;
        debug!("{} exited with {}", self.program, status);
        match status.code() {
            Some(0) => Ok(ProcessOutput {
                exit_code: 0,
                stderr_tail: tail.into_iter().collect(),
            }),
            exit_code => Err(Mutect2Error::ExternalToolFailure {
                exit_code,
                stderr_tail: tail.into_iter().collect::<Vec<_>>().join("\n"),
            }),
        }
    }
}
