use std::{borrow::Cow, mem::size_of, rc::Rc, sync::Arc};

/// Logical size of a cached value, in bytes.
///
/// This is what the cache charges against its budget, together with the length of the key.
/// It does not need to match the real heap footprint of the value; it only needs to be stable
/// for as long as the value sits in the cache.
pub trait ByteLen {
    fn byte_len(&self) -> usize;
}

impl ByteLen for str {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for String {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for [u8] {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for Vec<u8> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for Cow<'_, str> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl ByteLen for Cow<'_, [u8]> {
    fn byte_len(&self) -> usize {
        self.len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for Box<T> {
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for Rc<T> {
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for Arc<T> {
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen + ?Sized> ByteLen for &T {
    fn byte_len(&self) -> usize {
        (**self).byte_len()
    }
}

impl<T: ByteLen> ByteLen for Option<T> {
    fn byte_len(&self) -> usize {
        self.as_ref().map_or(0, ByteLen::byte_len)
    }
}

/// Plain values whose logical size is their in-memory size.
macro_rules! fixed_size {
    ($($t:ty),* $(,)?) => {
        $(
            impl ByteLen for $t {
                fn byte_len(&self) -> usize {
                    size_of::<Self>()
                }
            }
        )*
    };
}

fixed_size!(u8, u16, u32, u64, u128, usize);
fixed_size!(i8, i16, i32, i64, i128, isize);
fixed_size!(f32, f64, bool, char);
