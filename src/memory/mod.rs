// src/memory/mod.rs
// Bounded conversation memory: the last K exchanges replayed into each call.
// Derived from history on every call, never stored.

use crate::error::ChatError;
use crate::session::ChatMessage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest allowed memory length
pub const MIN_MEMORY_LENGTH: usize = 1;
/// Largest allowed memory length
pub const MAX_MEMORY_LENGTH: usize = 10;
/// Memory length used when nothing is configured
pub const DEFAULT_MEMORY_LENGTH: usize = 5;

/// Number of previous exchanges to remember (1..=10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct MemoryLength(usize);

impl MemoryLength {
    pub fn new(k: usize) -> Result<Self, ChatError> {
        if (MIN_MEMORY_LENGTH..=MAX_MEMORY_LENGTH).contains(&k) {
            Ok(Self(k))
        } else {
            Err(ChatError::InvalidInput(format!(
                "memory length must be between {} and {}, got {}",
                MIN_MEMORY_LENGTH, MAX_MEMORY_LENGTH, k
            )))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for MemoryLength {
    fn default() -> Self {
        Self(DEFAULT_MEMORY_LENGTH)
    }
}

impl TryFrom<usize> for MemoryLength {
    type Error = ChatError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Self::new(k)
    }
}

impl From<MemoryLength> for usize {
    fn from(k: MemoryLength) -> Self {
        k.0
    }
}

impl FromStr for MemoryLength {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let k: usize = s
            .trim()
            .parse()
            .map_err(|_| ChatError::InvalidInput(format!("memory length is not a number: {}", s)))?;
        Self::new(k)
    }
}

impl fmt::Display for MemoryLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The most recent `k` entries of `history`, oldest first.
pub fn window(history: &[ChatMessage], k: MemoryLength) -> &[ChatMessage] {
    let start = history.len().saturating_sub(k.get());
    &history[start..]
}

/// Render windowed turns the way the prompt templates expect them.
pub fn format_history(turns: &[ChatMessage]) -> String {
    turns
        .iter()
        .map(|m| format!("Human: {}\nAI: {}", m.human, m.ai))
        .collect::<Vec<_>>()
        .join("\n")
}
