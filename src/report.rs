//! Console progress reporting

use colored::*;

/// Receives human-readable progress lines while a patch runs
pub trait Reporter {
    /// A step is starting
    fn step(&mut self, message: &str);

    /// A step finished successfully
    fn success(&mut self, message: &str);

    /// The run is stopping without writing output
    fn failure(&mut self, message: &str);
}

/// Prints progress to stdout (or stderr) and failures to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter {
    to_stderr: bool,
}

impl ConsoleReporter {
    /// Keep stdout free for a document printed after the run
    pub fn stderr() -> Self {
        Self { to_stderr: true }
    }

    fn line(&self, line: String) {
        if self.to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

impl Reporter for ConsoleReporter {
    fn step(&mut self, message: &str) {
        self.line(format!("{} {}", "→".cyan(), message));
    }

    fn success(&mut self, message: &str) {
        self.line(format!("{} {}", "✓".green(), message));
    }

    fn failure(&mut self, message: &str) {
        eprintln!("{} {}", "✗".red(), message.red());
    }
}

/// Collects messages in memory; used by tests
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub steps: Vec<String>,
    pub successes: Vec<String>,
    pub failures: Vec<String>,
}

impl Reporter for RecordingReporter {
    fn step(&mut self, message: &str) {
        self.steps.push(message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn failure(&mut self, message: &str) {
        self.failures.push(message.to_string());
    }
}
