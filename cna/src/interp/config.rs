//! Interpreter configuration

/// Run-time knobs for an [`Interpreter`](super::Interpreter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Seed for `random()`; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Flush the output stream after every print/write
    pub flush: bool,
}

impl Config {
    pub fn new() -> Self {
        Config {
            seed: None,
            flush: true,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
