use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::EnumIter;

/// Why a stored rating changed.
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum RatingAdjustmentType {
    Initial = 0,
    Attempt = 1,
    Decay = 2
}

impl TryFrom<i32> for RatingAdjustmentType {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(RatingAdjustmentType::Initial),
            1 => Ok(RatingAdjustmentType::Attempt),
            2 => Ok(RatingAdjustmentType::Decay),
            _ => Err(())
        }
    }
}
