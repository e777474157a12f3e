use super::*;

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) fetch: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            fetch: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: false,
        }
    }
}

impl TraceState {
    pub(crate) fn push(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        if self.to_stderr {
            eprintln!("{line}");
        }
        self.logs.push_back(line);
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
    }
}
