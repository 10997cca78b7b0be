//! Reusable byte buffers for response bodies
//!
//! Buffers are checked out as a [`PooledBuffer`] guard and go back to the pool
//! when the guard drops, so every exit path (including `?` on an error)
//! returns them. The lock is only held for the push/pop itself.

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

pub struct BufferPool {
    buffers: Mutex<Vec<Vec<u8>>>,
    buffer_size: usize,
    max_buffers: usize,
    max_buffer_bytes: usize,
}

impl BufferPool {
    pub fn new(buffer_size: usize, max_buffers: usize, max_buffer_bytes: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::new()),
            buffer_size,
            max_buffers,
            max_buffer_bytes,
        }
    }

    /// Take an empty buffer, reusing a pooled allocation when one is available.
    pub fn checkout(&self) -> PooledBuffer<'_> {
        let reused = self.lock().pop();
        let buffer = reused.unwrap_or_else(|| Vec::with_capacity(self.buffer_size));

        PooledBuffer {
            buffer: Some(buffer),
            pool: self,
        }
    }

    fn checkin(&self, mut buffer: Vec<u8>) {
        if buffer.capacity() > self.max_buffer_bytes {
            return;
        }

        let mut buffers = self.lock();
        if buffers.len() < self.max_buffers {
            buffer.clear();
            buffers.push(buffer);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        // A panic while holding the lock cannot leave the Vec half-updated.
        self.buffers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_stats(&self) -> BufferStats {
        BufferStats {
            available_buffers: self.lock().len(),
            max_buffers: self.max_buffers,
            buffer_size: self.buffer_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BufferStats {
    pub available_buffers: usize,
    pub max_buffers: usize,
    pub buffer_size: usize,
}

/// A buffer on loan from a [`BufferPool`]
pub struct PooledBuffer<'a> {
    buffer: Option<Vec<u8>>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        self.buffer.as_ref().expect("buffer present until drop")
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        self.buffer.as_mut().expect("buffer present until drop")
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.checkin(buffer);
        }
    }
}
