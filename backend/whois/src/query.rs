use std::{fmt, str::FromStr};

use serde_json::{Map, Value, json};

use crate::error::WhoisError;

pub const PERSON_COLLECTION: &str = "person";
pub const SQUAD_COLLECTION: &str = "squad";

pub const PERSON_FIELDS: [&str; 9] = [
    "id",
    "name",
    "squads.squad_id.name",
    "fav_color",
    "fav_emoji",
    "fav_country",
    "birthdate",
    "avatar",
    "fav_kitchen",
];
pub const DETAIL_FIELDS: [&str; 2] = ["*", "squads.squad_id.name"];

pub const LISTING_SORT: &str = "birthdate";

/// Attribute a listing page puts forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    Avatar,
    FavEmoji,
    FavCountry,
    Birthdate,
    FavKitchen,
    FavColor,
}

impl DisplayField {
    pub const ALL: [DisplayField; 6] = [
        DisplayField::Avatar,
        DisplayField::FavEmoji,
        DisplayField::FavCountry,
        DisplayField::Birthdate,
        DisplayField::FavKitchen,
        DisplayField::FavColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayField::Avatar => "avatar",
            DisplayField::FavEmoji => "fav_emoji",
            DisplayField::FavCountry => "fav_country",
            DisplayField::Birthdate => "birthdate",
            DisplayField::FavKitchen => "fav_kitchen",
            DisplayField::FavColor => "fav_color",
        }
    }

    /// Attribute that has to be filled in before a person shows up on this
    /// page. Birthdate is already part of the scope and avatars are optional.
    pub fn required_attribute(self) -> Option<&'static str> {
        match self {
            DisplayField::Avatar | DisplayField::Birthdate => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for DisplayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayField {
    type Err = WhoisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| WhoisError::InvalidParameter(s.to_string()))
    }
}

/// Directus filter tree, serialized as JSON for the `filter` parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter(Value);

impl Filter {
    /// `path` may be dotted to reach into relations, e.g. `squads.squad_id.name`.
    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        let value: Value = value.into();

        Self::nested(path, json!({ "_eq": value }))
    }

    pub fn not_null(path: &str) -> Self {
        Self::nested(path, json!({ "_nnull": true }))
    }

    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        let clauses: Vec<Value> = filters.into_iter().map(|filter| filter.0).collect();

        Self(json!({ "_and": clauses }))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn nested(path: &str, condition: Value) -> Self {
        let value = path.rsplit('.').fold(condition, |inner, key| {
            let mut object = Map::new();
            object.insert(key.to_string(), inner);

            Value::Object(object)
        });

        Self(value)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Squad every listing page is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingScope {
    pub squad_name: String,
}

impl ListingScope {
    pub fn new(squad_name: impl Into<String>) -> Self {
        Self {
            squad_name: squad_name.into(),
        }
    }

    fn clauses(&self) -> Vec<Filter> {
        vec![
            Filter::eq("squads.squad_id.name", self.squad_name.as_str()),
            Filter::not_null("birthdate"),
        ]
    }
}

/// Person listing request. The only way to build one is from a scope and a
/// display field, so every page asks for the same fields within the same squad.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    display: DisplayField,
    filter: Filter,
}

impl ListingQuery {
    pub fn new(scope: &ListingScope, display: DisplayField) -> Self {
        let mut clauses = scope.clauses();

        if let Some(attribute) = display.required_attribute() {
            clauses.push(Filter::not_null(attribute));
        }

        Self {
            display,
            filter: Filter::and(clauses),
        }
    }

    pub fn display(&self) -> DisplayField {
        self.display
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("fields", PERSON_FIELDS.join(",")),
            ("filter", self.filter.to_string()),
            ("sort", LISTING_SORT.to_string()),
        ]
    }
}

/// Tribe and cohort the squad list is loaded for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadScope {
    pub tribe: String,
    pub cohort: String,
}

impl SquadScope {
    pub fn filter(&self) -> Filter {
        Filter::and([
            Filter::eq("cohort", self.cohort.as_str()),
            Filter::eq("tribe.name", self.tribe.as_str()),
        ])
    }

    pub fn params(&self) -> [(&'static str, String); 1] {
        [("filter", self.filter().to_string())]
    }
}
