use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

/// Addresses a 2D row-major buffer of stride `w` as a flat index.
#[macro_export]
macro_rules! index2d {
    ($x:expr, $y:expr, $w:expr) => {
        $w * $y + $x
    };
    ($t:ty, $x:expr, $y:expr, $w:expr) => {
        (($w as $t) * ($y as $t) + ($x as $t)) as $t
    };
}

/// A cheaply-clonable handle to a value that both the engine and the host
/// hold onto at once: the engine reads through it while composing a
/// scanline, the host (including from inside `hblank`) writes through it to
/// drive transforms. Single-threaded only, matching the cooperative
/// scheduling model of `draw_frame`.
///
/// Wraps a `RefCell` rather than an `UnsafeCell`: layer mutation happens at
/// most once per scanline, so the checked borrow costs nothing that matters
/// here and catches accidental re-entrant mutation instead of risking UB.
#[derive(Debug)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Shared<T> {
        Shared(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Shared<T> {
        Shared(self.0.clone())
    }
}

impl<T> Deref for Shared<T> {
    type Target = RefCell<T>;

    fn deref(&self) -> &RefCell<T> {
        &self.0
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Shared<T> {
        Shared::new(T::default())
    }
}
