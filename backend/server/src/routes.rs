use std::sync::Arc;

use axum::{
    extract::{self, Path},
    response::{Html, Redirect},
    routing::{MethodRouter, get},
};
use tracing::debug;
use whois::{DisplayField, ListingQuery};

use crate::{error::AppError, state::State};

/// Every listing page, keyed by path. They share one query builder and one
/// template and only differ in the attribute they put forward.
pub const LISTING_ROUTES: [(&str, DisplayField); 6] = [
    ("/", DisplayField::Avatar),
    ("/emoji/", DisplayField::FavEmoji),
    ("/land/", DisplayField::FavCountry),
    ("/verjaardag/", DisplayField::Birthdate),
    ("/eten/", DisplayField::FavKitchen),
    ("/kleur/", DisplayField::FavColor),
];

pub fn listing_route(show: DisplayField) -> MethodRouter<Arc<State>> {
    get(
        move |extract::State(state): extract::State<Arc<State>>| async move {
            render_listing(&state, show).await
        },
    )
}

pub async fn render_listing(state: &State, show: DisplayField) -> Result<Html<String>, AppError> {
    let query = ListingQuery::new(&state.listing_scope, show);
    let persons = state.whois.fetch_persons(&query).await?;

    debug!("Listing {} with {} persons", query.display(), persons.len());

    let html = state.views.listing(&persons, query.display(), &state.squads)?;

    Ok(Html(html))
}

pub async fn detail_handler(
    extract::State(state): extract::State<Arc<State>>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    render_detail(&state, &id).await
}

pub async fn render_detail(state: &State, id: &str) -> Result<Html<String>, AppError> {
    let person = state.whois.fetch_person(id).await?;
    let html = state.views.detail(&person, &state.squads)?;

    Ok(Html(html))
}

/// Form posts are accepted and dropped.
pub async fn submit_handler() -> Redirect {
    Redirect::to("/")
}
