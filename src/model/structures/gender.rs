use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter};

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display)]
#[repr(u8)]
pub enum Gender {
    Men = 0,
    Women = 1
}

impl TryFrom<i32> for Gender {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Gender::Men),
            1 => Ok(Gender::Women),
            _ => Err(())
        }
    }
}
