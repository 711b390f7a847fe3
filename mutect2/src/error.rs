use thiserror::Error;

#[derive(Debug, Error)]
pub enum Mutect2Error {
    #[error("Cannot find external binary: {0}")]
    BinaryNotFound(String),
    #[error("External tool failed ({}):\n{}", describe_exit(.exit_code), .stderr_tail)]
    ExternalToolFailure {
        exit_code: Option<i32>,
        stderr_tail: String,
    },
    #[error("Required argument is empty: {0}")]
    MissingArgument(&'static str),
    #[error("Invalid interval at line {line}: {message}")]
    InvalidInterval { line: usize, message: String },
    #[error("I/O Error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Mutect2Error {
    /// Exit code the wrapper should terminate with, when the failure came from the child.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Mutect2Error::ExternalToolFailure {
                exit_code: Some(code),
                ..
            } if *code != 0 => Some(*code),
            _ => None,
        }
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exit_code() {
        let failure = Mutect2Error::ExternalToolFailure {
            exit_code: Some(3),
            stderr_tail: "A USER ERROR has occurred".to_string(),
        };
        assert_eq!(failure.exit_code(), Some(3));
        assert_eq!(
            failure.to_string(),
            "External tool failed (exit code 3):\nA USER ERROR has occurred"
        );

        let killed = Mutect2Error::ExternalToolFailure {
            exit_code: None,
            stderr_tail: String::new(),
        };
        assert_eq!(killed.exit_code(), None);
        assert!(killed.to_string().contains("terminated by signal"));

        assert_eq!(Mutect2Error::MissingArgument("reference").exit_code(), None);
    }
}
