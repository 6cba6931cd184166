//! Two-slot cell value with explicit stage / commit.

/// A cell's datum: the committed value plus an optional staged proposal.
///
/// [`get`](Value::get) always returns the committed value, never the staged
/// one. This is what makes a synchronous generation order-independent: no
/// behaviour can observe another cell's proposal before the commit pass.
///
/// # Examples
///
/// ```
/// use weft_core::Value;
///
/// let mut v = Value::new(1);
/// v.stage(2);
/// assert_eq!(v.get(), 1);
/// assert!(v.is_staged());
/// v.commit();
/// assert_eq!(v.get(), 2);
/// assert!(!v.is_staged());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Value<T> {
    current: T,
    staged: Option<T>,
}

impl<T> Value<T> {
    /// Create a value with nothing staged.
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            staged: None,
        }
    }

    /// Borrow the committed value.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Borrow the staged proposal, if any.
    pub fn staged(&self) -> Option<&T> {
        self.staged.as_ref()
    }

    /// Propose the next value. Replaces any earlier proposal.
    pub fn stage(&mut self, value: T) {
        self.staged = Some(value);
    }

    /// Apply the staged proposal.
    ///
    /// Returns `true` if a value was applied. With nothing staged this is a
    /// no-op returning `false`, which lets a behaviour skip a generation.
    pub fn commit(&mut self) -> bool {
        match self.staged.take() {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    /// Whether a proposal is pending.
    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }
}

impl<T: Clone> Value<T> {
    /// The committed value.
    pub fn get(&self) -> T {
        self.current.clone()
    }
}
