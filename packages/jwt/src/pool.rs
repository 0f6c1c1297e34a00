//! Free-list pool for reusable hashing state
//!
//! A checkout hands out exclusive ownership of one value; dropping the guard
//! resets the value and returns it to the free list. New values are cloned
//! from a template, so keyed MAC state is set up once per signer.

use digest::Reset;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

const DEFAULT_CAPACITY: usize = 32;

pub(crate) struct Pool<T: Clone + Reset> {
    template: T,
    free: Mutex<Vec<T>>,
    capacity: usize,
}

impl<T: Clone + Reset> Pool<T> {
    pub(crate) fn new(template: T) -> Self {
        Self::with_capacity(template, DEFAULT_CAPACITY)
    }

    pub(crate) fn with_capacity(template: T, capacity: usize) -> Self {
        Self {
            template,
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    pub(crate) fn checkout(&self) -> Pooled<'_, T> {
        let item = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_else(|| self.template.clone());
        Pooled {
            pool: self,
            item: Some(item),
        }
    }

    fn checkin(&self, mut item: T) {
        item.reset();
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.capacity {
            free.push(item);
        }
    }

    #[cfg(test)]
    fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Exclusive handle to a pooled value.
pub(crate) struct Pooled<'a, T: Clone + Reset> {
    pool: &'a Pool<T>,
    item: Option<T>,
}

impl<T: Clone + Reset> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.item {
            Some(item) => item,
            None => unreachable!("pooled value taken before drop"),
        }
    }
}

impl<T: Clone + Reset> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.item {
            Some(item) => item,
            None => unreachable!("pooled value taken before drop"),
        }
    }
}

impl<T: Clone + Reset> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.checkin(item);
        }
    }
}
