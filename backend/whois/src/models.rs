use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Every Directus response wraps its payload in `data`.
#[derive(Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// A person as returned by WHOIS. Only `id` has a fixed type; attributes are
/// kept as whatever JSON the source holds so one odd record can not break a
/// page. Attributes outside the known set are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub squads: Vec<Membership>,
    pub fav_color: Option<Value>,
    pub fav_emoji: Option<Value>,
    pub fav_country: Option<Value>,
    pub birthdate: Option<Value>,
    pub avatar: Option<Value>,
    pub fav_kitchen: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub squad_id: Option<SquadRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadRef {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub id: i64,
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
