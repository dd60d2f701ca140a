//! # WHOIS
//!
//! Client for the FDND WHOIS API, a Directus instance holding every person,
//! squad and tribe of the programme.
//!
//!
//!
//! ## Collections
//! - `items/person`: one record per student (name, birthdate, favourites, avatar, squad memberships)
//! - `items/squad`: one record per squad, scoped to a tribe and a cohort
//!
//! Both respond with a `{"data": ...}` envelope holding a single record or a list of records.
//!
//!
//!
//! ## Query Parameters
//! - `fields`: comma separated attributes, dotted paths expand relations (`squads.squad_id.name`)
//! - `filter`: JSON encoded filter tree (`{"_and": [{"birthdate": {"_nnull": true}}]}`)
//! - `sort`: attribute to sort by, prefixed with `-` for descending
//!
//! Listing pages only ever differ by a [`DisplayField`]. The squad scope and the
//! requested fields are fixed inside [`ListingQuery::new`] so two pages can not drift apart.
//!
//!
//!
//! ## Commands
//!
//! Inspect a listing by hand.
//! ```sh
//! curl -G https://fdnd.directus.app/items/person \
//!   --data-urlencode 'fields=id,name,birthdate' \
//!   --data-urlencode 'filter={"squads":{"squad_id":{"name":{"_eq":"1G"}}}}' \
//!   --data-urlencode 'sort=birthdate'
//! ```
pub mod error;
pub mod models;
pub mod query;
pub mod remote;

pub use error::WhoisError;
pub use models::{Membership, Person, Squad, SquadRef};
pub use query::{DisplayField, Filter, ListingQuery, ListingScope, SquadScope};
pub use remote::WhoisClient;
