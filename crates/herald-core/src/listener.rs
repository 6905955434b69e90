#![forbid(unsafe_code)]

//! The listener capability.
//!
//! A listener has exactly one operation: being told that a value changed.
//! Whatever it does with the value is its own business; the [`Subject`]
//! only needs to call it.
//!
//! Listeners receive `&self`, so any state they keep lives behind `Cell` or
//! `RefCell`. Closures taking `&T` are listeners through the blanket impl.
//!
//! [`Subject`]: crate::Subject

/// Capability notified with the new value after every mutation.
pub trait Listener<T: ?Sized> {
    /// Called synchronously by the subject, once per notification pass.
    fn on_value_changed(&self, value: &T);
}

impl<T: ?Sized, F> Listener<T> for F
where
    F: Fn(&T),
{
    fn on_value_changed(&self, value: &T) {
        self(value)
    }
}
