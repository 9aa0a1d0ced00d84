// src/invocation.rs

//! Invocation parameters for one probe run.
//!
//! [`InvocationSpec`] is immutable input: [`InvocationSpec::argv`] builds a
//! fresh argument vector on every call, so no state leaks between runs.

use std::fmt;

/// Transport mechanism the trace utility uses to elicit hop responses.
///
/// Anything other than the three known methods is carried verbatim and
/// maps to no method flag, leaving the probe type to the caller-supplied
/// extra arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeMethod {
    Udp,
    Tcp,
    Icmp,
    Custom(String),
}

impl ProbeMethod {
    /// The utility flag selecting this method, if any.
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            ProbeMethod::Udp => Some("-U"),
            ProbeMethod::Tcp => Some("-T"),
            ProbeMethod::Icmp => Some("-I"),
            ProbeMethod::Custom(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProbeMethod::Udp => "udp",
            ProbeMethod::Tcp => "tcp",
            ProbeMethod::Icmp => "icmp",
            ProbeMethod::Custom(s) => s,
        }
    }
}

impl From<&str> for ProbeMethod {
    fn from(s: &str) -> Self {
        match s {
            "udp" => ProbeMethod::Udp,
            "tcp" => ProbeMethod::Tcp,
            "icmp" => ProbeMethod::Icmp,
            other => ProbeMethod::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ProbeMethod {
    fn default() -> Self {
        ProbeMethod::Udp
    }
}

/// Everything needed to invoke the trace utility once.
#[derive(Debug, Clone)]
pub struct InvocationSpec {
    /// Target host to trace.
    pub url: String,

    /// Probe method; its flag is appended after `cmd_arguments`.
    pub method: ProbeMethod,

    /// Extra argument tokens passed through to the utility, in order.
    pub cmd_arguments: Vec<String>,
}

impl InvocationSpec {
    pub fn new(url: impl Into<String>, method: ProbeMethod) -> Self {
        Self {
            url: url.into(),
            method,
            cmd_arguments: Vec::new(),
        }
    }

    pub fn with_arguments(mut self, args: impl IntoIterator<Item = String>) -> Self {
        self.cmd_arguments = args.into_iter().collect();
        self
    }

    /// Build the full argument vector for one launch:
    ///
    /// `[utility] + cmd_arguments + [method flag] + [url]`
    ///
    /// The method flag goes *after* the extra arguments because the
    /// utility honors the last occurrence of a conflicting flag; the
    /// explicit method therefore always wins over a stale flag in
    /// `cmd_arguments`.
    pub fn argv(&self, utility: &str) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.cmd_arguments.len() + 3);
        argv.push(utility.to_string());
        argv.extend(self.cmd_arguments.iter().cloned());
        if let Some(flag) = self.method.flag() {
            argv.push(flag.to_string());
        }
        argv.push(self.url.clone());
        argv
    }
}
