use crate::HybridVec;
use core::{fmt, marker::PhantomData};
use serde_core::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
};

impl<T: Serialize, const N: usize> Serialize for HybridVec<T, N> {
    /// Serialize a `HybridVec` as a sequence.
    ///
    /// The format is the same whether the data is inline or on the heap.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for HybridVec<T, N> {
    /// Deserialize a `HybridVec` from a sequence.
    ///
    /// A size hint is used to grow the buffer once up front; the data moves
    /// to the heap when it does not fit inline.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HybridVecVisitor<T, const N: usize> {
            _marker: PhantomData<T>,
        }

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for HybridVecVisitor<T, N> {
            type Value = HybridVec<T, N>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut vec = HybridVec::new();
                if let Some(hint) = seq.size_hint() {
                    vec.try_reserve(hint).map_err(serde_core::de::Error::custom)?;
                }

                while let Some(element) = seq.next_element()? {
                    vec.try_push(element)
                        .map_err(serde_core::de::Error::custom)?;
                }

                Ok(vec)
            }
        }

        deserializer.deserialize_seq(HybridVecVisitor {
            _marker: PhantomData,
        })
    }
}
