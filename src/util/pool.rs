//! Per-thread pools for transient query scratch space.
//!
//! A query allocates a handful of short-lived buffers (intersection work
//! buffers, the orchestrator's accumulation list). Reusing them across
//! queries keeps the hot path free of allocator traffic: `Vec::clear`
//! preserves capacity, so after warmup a pooled buffer never reallocates.
//!
//! Each value type gets its own scope on the current thread. [`Pool::obtain`]
//! hands out a recycled or fresh handle and tracks it in the scope's live
//! set; [`Pool::release`] returns one handle to the free list;
//! [`Pool::release_all`] drains a type's live set back to free (the
//! orchestrator calls this at the end of every query); [`Pool::drain`]
//! clears every scope on the thread.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A value that can live in the scratch pool.
pub trait Poolable: Default + 'static {
    /// Restore the value to its fresh state, keeping allocated capacity.
    fn reset(&mut self);
}

impl Poolable for Vec<u64> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl Poolable for String {
    fn reset(&mut self) {
        self.clear();
    }
}

/// Shared handle to a pooled value.
pub type Handle<T> = Rc<RefCell<T>>;

#[derive(Default)]
struct Scope {
    free: Vec<Rc<dyn Any>>,
    live: Vec<Rc<dyn Any>>,
}

thread_local! {
    static SCOPES: RefCell<HashMap<TypeId, Scope>> = RefCell::new(HashMap::new());
}

/// Thread-local scratch pool operations.
pub struct Pool;

impl Pool {
    /// Obtain a handle, recycling a free instance when one exists.
    ///
    /// Recycled values are [`Poolable::reset`] before they are handed out.
    /// The handle is tracked in the type's live set until released.
    pub fn obtain<T: Poolable>() -> Handle<T> {
        SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            let scope = scopes.entry(TypeId::of::<T>()).or_default();
            let handle: Handle<T> = match scope.free.pop() {
                Some(any) => match any.downcast::<RefCell<T>>() {
                    Ok(handle) => {
                        handle.borrow_mut().reset();
                        handle
                    }
                    Err(_) => Rc::new(RefCell::new(T::default())),
                },
                None => Rc::new(RefCell::new(T::default())),
            };
            scope.live.push(handle.clone());
            handle
        })
    }

    /// Return one handle to its type's free list.
    pub fn release<T: Poolable>(handle: Handle<T>) {
        SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            let scope = scopes.entry(TypeId::of::<T>()).or_default();
            let erased: Rc<dyn Any> = handle;
            if let Some(pos) = scope.live.iter().position(|h| Rc::ptr_eq(h, &erased)) {
                scope.live.swap_remove(pos);
            }
            scope.free.push(erased);
        });
    }

    /// Drain the live set of one type back to its free list.
    pub fn release_all<T: Poolable>() {
        SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            if let Some(scope) = scopes.get_mut(&TypeId::of::<T>()) {
                scope.free.append(&mut scope.live);
            }
        });
    }

    /// Clear every type scope on this thread, dropping all pooled values.
    pub fn drain() {
        SCOPES.with(|scopes| scopes.borrow_mut().clear());
    }

    /// Number of free instances in one type's scope.
    pub fn free_count<T: Poolable>() -> usize {
        SCOPES.with(|scopes| {
            scopes
                .borrow()
                .get(&TypeId::of::<T>())
                .map(|scope| scope.free.len())
                .unwrap_or(0)
        })
    }
}
