/// Per-invocation quotas for custom code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SandboxConfig {
    /// Instruction budget per `decide` call.
    pub max_fuel:          u64,
    /// Upper bound on guest linear memory.
    pub max_memory_bytes:  usize,
    /// Wall-clock deadline per call, in milliseconds.
    pub max_call_ms:       u64,
    /// Submissions larger than this are rejected before parsing.
    pub max_code_bytes:    usize,
    /// Compiled modules kept in memory; the oldest is evicted first.
    pub max_cache_entries: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            max_fuel:          1_000_000,
            max_memory_bytes:  1024 * 1024,
            max_call_ms:       50,
            max_code_bytes:    64 * 1024,
            max_cache_entries: 32,
        }
    }
}
