use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;
use strum_macros::{Display, EnumIter};

#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display)]
#[repr(u8)]
pub enum Sport {
    #[strum(to_string = "MMA")]
    Mma = 0,
    Kickboxing = 1,
    Grappling = 2,
    #[strum(to_string = "Bare Knuckle")]
    BareKnuckleBoxing = 3
}

impl TryFrom<i32> for Sport {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Sport::Mma),
            1 => Ok(Sport::Kickboxing),
            2 => Ok(Sport::Grappling),
            3 => Ok(Sport::BareKnuckleBoxing),
            _ => Err(())
        }
    }
}
