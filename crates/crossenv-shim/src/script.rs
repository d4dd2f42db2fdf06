//! POSIX shell forwarding scripts.

/// Quote a word for `/bin/sh`. Single quotes disable every expansion; an
/// embedded quote is closed, escaped and reopened.
pub fn quote(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');
    for c in word.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// A script that replaces itself with `program args... "$@"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardScript {
    program: String,
    args:    Vec<String>,
}

impl ForwardScript {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args:    Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str { &self.program }

    pub fn render(&self) -> String {
        let mut line = format!("exec {}", quote(&self.program));
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote(arg));
        }
        format!("#!/bin/sh\n{line} \"$@\"\n")
    }
}
