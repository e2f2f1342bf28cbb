/// An integer key that can be stored in the APMA.
///
/// One value of the type is reserved to mean "empty slot" and can never be
/// stored. For every primitive integer this value is `0`.
///
/// # Example
/// ```
/// use apma::Key;
///
/// let a = u64::reserved();
/// let b = 5u64;
///
/// assert!(a.is_reserved());
/// assert!(!b.is_reserved());
/// ```
pub trait Key: Copy + Ord + std::fmt::Debug {
    /// Returns the reserved value of the type. This value must be unique and
    /// consistent.
    fn reserved() -> Self;

    /// Returns `true` if the key is the reserved value, and `false`
    /// otherwise.
    fn is_reserved(&self) -> bool {
        *self == Self::reserved()
    }
}

macro_rules! impl_key {
    ($($t:ty),*) => {
        $(
            impl Key for $t {
                fn reserved() -> Self {
                    0
                }
            }
        )*
    };
}

impl_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
