use bitflags::bitflags;

bitflags! {
  /// Host hooks a [`Listener`] can be activated for.
  ///
  /// [`Listener`]: crate::listener::Listener
  #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
  pub struct HookSet: u8 {
    /// Runtime error signals.
    const ERROR = 1 << 0;
    /// Uncaught exceptions.
    const EXCEPTION = 1 << 1;
    /// Process end.
    const SHUTDOWN = 1 << 2;
  }
}

impl HookSet {
  /// Every hook.
  pub const ALL: Self = Self::all();
}

impl Default for HookSet {
  #[inline]
  fn default() -> Self {
    Self::ALL
  }
}
