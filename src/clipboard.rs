use std::cell::RefCell;
use std::process::Stdio;

use anyhow::{Context as _, anyhow};
use tokio::io::AsyncWriteExt as _;

/// Write-only access to a clipboard. Writes may fail for any reason.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Records every submitted payload; optionally rejects them all, the way a
/// browser denies clipboard access in an insecure context.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    deny: bool,
    writes: RefCell<Vec<String>>,
    contents: RefCell<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn denied() -> Self {
        Self {
            deny: true,
            ..Self::default()
        }
    }

    /// Every payload submitted, accepted or not.
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        self.writes.borrow_mut().push(text.to_string());
        if self.deny {
            return Err(anyhow!("clipboard write denied"));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

/// Pipes the payload into an external program such as `wl-copy`, `xclip` or
/// `pbcopy`.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Parses a whitespace separated command line, e.g. `xclip -selection clipboard`.
    pub fn from_command_line(cmd: &str) -> anyhow::Result<Self> {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| anyhow!("empty clipboard command"))?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Picks the usual clipboard program for the current platform.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            return Self::new("pbcopy", Vec::new());
        }
        if cfg!(target_os = "windows") {
            return Self::new("clip", Vec::new());
        }
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            return Self::new("wl-copy", Vec::new());
        }
        Self::new("xclip", vec!["-selection".to_string(), "clipboard".to_string()])
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("spawn {}", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow!("{} has no stdin", self.program))?;
        stdin
            .write_all(text.as_bytes())
            .await
            .with_context(|| format!("write to {}", self.program))?;
        drop(stdin);

        let status = child
            .wait()
            .await
            .with_context(|| format!("wait for {}", self.program))?;
        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_clipboard_records_denied_writes() {
        let clipboard = MemoryClipboard::denied();
        assert!(clipboard.write_text("hello").await.is_err());
        assert_eq!(clipboard.writes(), vec!["hello".to_string()]);
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn command_line_parsing() {
        let clipboard = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.program(), "xclip");
        assert_eq!(clipboard.args, vec!["-selection", "clipboard"]);
        assert!(CommandClipboard::from_command_line("   ").is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_program_fails() {
        let clipboard = CommandClipboard::new("apphub-no-such-clipboard-tool", Vec::new());
        assert!(clipboard.write_text("x").await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_receives_payload() {
        let clipboard = CommandClipboard::new("sh", vec!["-c".into(), "cat >/dev/null".into()]);
        clipboard.write_text("hello").await.unwrap();
    }
}
