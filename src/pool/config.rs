// src/pool/config.rs
//! Configuration for [`super::Pool`].

/// Capacity for an object pool: a plain, `Default`-able struct rather than a builder,
/// since there is only one knob.
#[derive(Debug, Clone, Copy)]
pub struct ObjectPoolConfig {
    /// Number of slots the pool holds.
    pub capacity: usize,
}

impl Default for ObjectPoolConfig {
    fn default() -> Self {
        Self { capacity: 16 }
    }
}
