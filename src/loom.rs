#[cfg(not(loom))]
pub(crate) mod export {
  pub(crate) mod sync {
    pub(crate) use parking_lot::Mutex;

    pub(crate) mod atomic {
      pub(crate) use std::sync::atomic::AtomicBool;
      pub(crate) use std::sync::atomic::AtomicU8;
      pub(crate) use std::sync::atomic::AtomicU32;
      pub(crate) use std::sync::atomic::Ordering;
    }
  }
}

#[cfg(loom)]
pub(crate) mod export {
  pub(crate) mod sync {
    /// `loom` mutex with the non-poisoning `lock` of `parking_lot`.
    pub(crate) struct Mutex<T>(loom::sync::Mutex<T>);

    impl<T> Mutex<T> {
      #[inline]
      pub(crate) fn new(value: T) -> Self {
        Self(loom::sync::Mutex::new(value))
      }

      #[inline]
      pub(crate) fn lock(&self) -> loom::sync::MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(|poison| poison.into_inner())
      }
    }

    pub(crate) mod atomic {
      pub(crate) use loom::sync::atomic::AtomicBool;
      pub(crate) use loom::sync::atomic::AtomicU8;
      pub(crate) use loom::sync::atomic::AtomicU32;
      pub(crate) use loom::sync::atomic::Ordering;
    }
  }
}

#[doc(inline)]
pub(crate) use self::export::*;
