use serde::Serialize;

use super::PersonId;

/// A connection of the logged in account, as returned by the connections listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub display_name: String,
}
