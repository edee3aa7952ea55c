use crate::{Error, Result};

const DEFAULT_TRACE_LOG_LIMIT: usize = 10_000;

#[derive(Debug, Clone)]
pub(crate) struct Trace {
    enabled: bool,
    logs: Vec<String>,
    log_limit: usize,
    to_stderr: bool,
}

impl Default for Trace {
    fn default() -> Self {
        Self {
            enabled: false,
            logs: Vec::new(),
            log_limit: DEFAULT_TRACE_LOG_LIMIT,
            to_stderr: true,
        }
    }
}

impl Trace {
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_stderr(&mut self, enabled: bool) {
        self.to_stderr = enabled;
    }

    pub(crate) fn set_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::InvalidConfig(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.log_limit = max_entries;
        if self.logs.len() > self.log_limit {
            let overflow = self.logs.len() - self.log_limit;
            self.logs.drain(..overflow);
        }
        Ok(())
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    pub(crate) fn line(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        if self.to_stderr {
            eprintln!("{line}");
        }
        if self.logs.len() >= self.log_limit {
            self.logs.remove(0);
        }
        self.logs.push(line);
    }
}
