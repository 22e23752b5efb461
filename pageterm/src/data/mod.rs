use core::ops::Deref;
use spin::Mutex;

/// Spin lock around a [`TerminalLogger`](crate::diag::TerminalLogger).
///
/// `log::Log` and `spin::Mutex` are both foreign, so the sink's `Log` impl
/// is written for this wrapper; it derefs to the inner mutex.
pub struct CrateMutex<T>(pub Mutex<T>);

impl<T> CrateMutex<T> {
    pub const fn new(t: T) -> Self {
        Self(Mutex::new(t))
    }
}

impl<T> Deref for CrateMutex<T> {
    type Target = Mutex<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
