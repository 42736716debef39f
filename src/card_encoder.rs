use crate::Result;
use crate::card::Card;

/// A sink that serializes cards one at a time.
pub trait CardEncoder {
    fn write_card(&mut self, card: &Card) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
