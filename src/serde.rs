//! Serde support for [`CardinalitySketch`], behind the `with_serde` feature.
//!
//! A sketch serializes as the tuple `(precision, representation)`. The mixer
//! is a function value and cannot round-trip; deserialization restores the
//! default mixer ([`crate::ranhash`]). Sketches built with a custom mixer
//! therefore keep their stored state across a round trip but must not be
//! inserted into afterwards unless the default mixer is what they were built
//! with.

use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::representation::Representation;
use crate::sketch::CardinalitySketch;

impl Serialize for CardinalitySketch {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.precision)?;
        tuple.serialize_element(&self.representation)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for CardinalitySketch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (precision, representation): (u8, Representation) =
            Deserialize::deserialize(deserializer)?;
        let mut sketch = CardinalitySketch::new(precision).map_err(D::Error::custom)?;
        if representation.precision() != precision {
            return Err(D::Error::custom(format!(
                "representation was built for precision {}, sketch claims {}",
                representation.precision(),
                precision
            )));
        }
        if let Representation::Dense(registers) = &representation {
            if registers.len() != 1usize << precision {
                return Err(D::Error::custom(format!(
                    "dense payload has {} registers, precision {} requires {}",
                    registers.len(),
                    precision,
                    1usize << precision
                )));
            }
        }
        sketch.representation = representation;
        Ok(sketch)
    }
}

#[cfg(test)]
mod tests {
    use crate::CardinalitySketch;
    use test_case::test_case;

    #[test_case(0; "empty")]
    #[test_case(1; "single item")]
    #[test_case(100; "sparse")]
    #[test_case(10_000; "dense")]
    fn round_trips_state_and_estimate(n: u64) {
        let mut sketch = CardinalitySketch::new(12).unwrap();
        for item in 0..n {
            sketch.add(item);
        }

        let serialized = serde_json::to_string(&sketch).expect("serialization failed");
        let restored: CardinalitySketch =
            serde_json::from_str(&serialized).expect("deserialization failed");

        assert_eq!(restored, sketch);
        assert_eq!(restored.cardinality(), sketch.cardinality());
        assert_eq!(restored.ertl_cardinality(), sketch.ertl_cardinality());
        assert_eq!(restored.is_sparse(), sketch.is_sparse());
    }

    #[test]
    fn rejects_invalid_payloads() {
        assert!(serde_json::from_str::<CardinalitySketch>("{ not json }").is_err());
        // precision out of range
        assert!(serde_json::from_str::<CardinalitySketch>(
            "[3,{\"Sparse\":{\"p\":3,\"entries\":[]}}]"
        )
        .is_err());
        // representation precision disagrees with the sketch precision
        assert!(serde_json::from_str::<CardinalitySketch>(
            "[12,{\"Sparse\":{\"p\":14,\"entries\":[]}}]"
        )
        .is_err());
    }
}
