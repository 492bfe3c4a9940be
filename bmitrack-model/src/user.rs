/// A named owner of a sequence of measurements. Names are unique within
/// the store; users are created explicitly and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub id: i64,
    pub name: String,
}
